//! Conversion of raw oscilloscope records into physical units.

use crate::{Error, Result, Signal};

// The visible vertical scale spans 8 divisions over a 200-code band of the
// signed 8-bit range, i.e. 25 codes per division. Fixed property of the
// instrument, not a knob.
const CODES_PER_DIVISION: f64 = 25.0;

// The display spans 14 horizontal divisions with the time origin at screen
// center.
const HORIZONTAL_DIVISIONS: f64 = 14.0;

/// Vertical calibration of one channel, as read back from the instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelCalibration {
    pub volts_per_division: f64,
    pub offset_volts: f64,
}

/// Horizontal sweep metadata for one acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepDescriptor {
    pub time_per_division: f64,
    pub sample_rate: f64,
    pub sample_count: usize,
}

/// Reinterpret a raw binary block as signed sample codes without copying.
///
/// Instrument transports deliver waveform records as plain bytes; the ADC
/// codes inside are two's-complement 8-bit values.
pub fn codes_from_bytes(bytes: &[u8]) -> &[i8] {
    bytemuck::cast_slice(bytes)
}

/// Scale raw ADC codes to voltages using the channel's vertical calibration.
pub fn scale_codes(codes: &[i8], volts_per_division: f64,
                   offset_volts: f64) -> Result<Vec<f64>> {
    if volts_per_division <= 0.0 {
        return Err(Error::InvalidArgument("volts per division must be positive"));
    }
    let scale = volts_per_division / CODES_PER_DIVISION;
    Ok(codes.iter().map(|&code| code as f64 * scale - offset_volts).collect())
}

/// Time axis of one acquisition: `sample_count` instants starting at the left
/// edge of the screen with uniform spacing `1 / sample_rate`.
///
/// Every instant is computed from its index, so an axis can be iterated any
/// number of times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    origin: f64,
    step: f64,
    count: usize,
}

impl TimeAxis {
    pub fn new(time_per_division: f64, sample_rate: f64,
               sample_count: usize) -> Result<TimeAxis> {
        if sample_rate <= 0.0 {
            return Err(Error::InvalidArgument("sample rate must be positive"));
        }
        Ok(TimeAxis {
            origin: -(time_per_division * HORIZONTAL_DIVISIONS) / 2.0,
            step: sample_rate.recip(),
            count: sample_count,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The instant at `index`, or `None` past the end of the axis.
    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.origin + index as f64 * self.step)
    }

    pub fn iter(&self) -> TimeAxisIter {
        TimeAxisIter { axis: *self, index: 0 }
    }
}

impl IntoIterator for TimeAxis {
    type Item = f64;
    type IntoIter = TimeAxisIter;

    fn into_iter(self) -> TimeAxisIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct TimeAxisIter {
    axis: TimeAxis,
    index: usize,
}

impl Iterator for TimeAxisIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let instant = self.axis.get(self.index)?;
        self.index += 1;
        Some(instant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.axis.count - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TimeAxisIter {}

/// Convert one captured record into a physical-unit signal ready for the
/// estimators.
///
/// Pairs the reconstructed time axis with the scaled voltages. The record
/// must contain exactly the number of samples the sweep describes.
pub fn capture(codes: &[i8], calibration: &ChannelCalibration,
               sweep: &SweepDescriptor) -> Result<Signal> {
    if codes.len() != sweep.sample_count {
        return Err(Error::LengthMismatch {
            expected: sweep.sample_count,
            actual: codes.len(),
        });
    }
    let axis = TimeAxis::new(sweep.time_per_division, sweep.sample_rate,
                             sweep.sample_count)?;
    let voltages = scale_codes(codes, calibration.volts_per_division,
                               calibration.offset_volts)?;
    log::debug!("captured {} samples at {} V/div, {} s/div", codes.len(),
        calibration.volts_per_division, sweep.time_per_division);
    Signal::new(axis.iter().collect(), voltages)
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_all_close(actual: &[f64], expected: &[f64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len());
        for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tolerance,
                "element {}: {} differs from {} by more than {}", index, a, e, tolerance);
        }
    }

    #[test]
    fn test_zero_code_maps_to_negative_offset() {
        assert_eq!(scale_codes(&[0], 2.0, 0.5).unwrap(), [-0.5]);
    }

    #[test]
    fn test_one_division_of_codes() {
        assert_eq!(scale_codes(&[25], 1.0, 0.0).unwrap(), [1.0]);
    }

    #[test]
    fn test_scale_full_range() {
        let volts = scale_codes(&[-128, -25, 0, 25, 127], 1.0, 0.0).unwrap();
        assert_all_close(&volts, &[-5.12, -1.0, 0.0, 1.0, 5.08], 1e-12);
    }

    #[test]
    fn test_scale_rejects_bad_vdiv() {
        assert_eq!(scale_codes(&[0], 0.0, 0.0).unwrap_err(),
                   Error::InvalidArgument("volts per division must be positive"));
        assert!(scale_codes(&[0], -1.0, 0.0).is_err());
    }

    #[test]
    fn test_time_axis_example() {
        let axis = TimeAxis::new(1.0, 10.0, 5).unwrap();
        assert_eq!(axis.len(), 5);
        let times = axis.iter().collect::<Vec<_>>();
        assert_eq!(times[0], -7.0);
        assert_all_close(&times, &[-7.0, -6.9, -6.8, -6.7, -6.6], 1e-12);
    }

    #[test]
    fn test_time_axis_is_restartable() {
        let axis = TimeAxis::new(2e-3, 1e6, 100).unwrap();
        let first = axis.iter().collect::<Vec<_>>();
        let again = axis.iter().collect::<Vec<_>>();
        assert_eq!(first, again);
        assert_eq!(axis.iter().len(), 100);
    }

    #[test]
    fn test_time_axis_indexing() {
        let axis = TimeAxis::new(1.0, 10.0, 5).unwrap();
        assert_eq!(axis.get(0), Some(-7.0));
        assert_eq!(axis.get(4), axis.iter().last());
        assert_eq!(axis.get(5), None);
    }

    #[test]
    fn test_time_axis_empty() {
        let axis = TimeAxis::new(1.0, 10.0, 0).unwrap();
        assert!(axis.is_empty());
        assert_eq!(axis.iter().next(), None);
    }

    #[test]
    fn test_time_axis_rejects_bad_rate() {
        assert_eq!(TimeAxis::new(1.0, 0.0, 5).unwrap_err(),
                   Error::InvalidArgument("sample rate must be positive"));
        assert!(TimeAxis::new(1.0, -10.0, 5).is_err());
    }

    #[test]
    fn test_capture_matches_manual_zip() {
        let codes = [-50, 0, 50, 100];
        let calibration = ChannelCalibration { volts_per_division: 2.0, offset_volts: 0.1 };
        let sweep = SweepDescriptor {
            time_per_division: 1e-3,
            sample_rate: 1e6,
            sample_count: 4,
        };
        let signal = capture(&codes, &calibration, &sweep).unwrap();

        let axis = TimeAxis::new(sweep.time_per_division, sweep.sample_rate,
                                 sweep.sample_count).unwrap();
        let volts = scale_codes(&codes, calibration.volts_per_division,
                                calibration.offset_volts).unwrap();
        let manual = axis.iter().zip(volts).collect::<Vec<_>>();
        assert_eq!(signal.pairs().collect::<Vec<_>>(), manual);
    }

    #[test]
    fn test_capture_rejects_length_mismatch() {
        let calibration = ChannelCalibration { volts_per_division: 1.0, offset_volts: 0.0 };
        let sweep = SweepDescriptor {
            time_per_division: 1e-3,
            sample_rate: 1e6,
            sample_count: 4,
        };
        assert_eq!(capture(&[0; 3], &calibration, &sweep).unwrap_err(),
                   Error::LengthMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn test_codes_from_bytes_reinterprets() {
        assert_eq!(codes_from_bytes(&[0x00, 0xff, 0x7f, 0x80]), [0, -1, 127, -128]);
    }
}
