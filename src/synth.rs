//! Synthetic sampled signals, for driving the estimators without hardware.

use std::f64::consts::PI;

use crate::{Error, Result, Signal};

/// `count` samples of `x(t) = amplitude · sin(2π · frequency · t + phase)`
/// taken at `t = i / sample_rate`.
pub fn sine_samples(amplitude: f64, phase: f64, frequency: f64,
                    sample_rate: f64, count: usize) -> Result<Vec<f64>> {
    if sample_rate <= 0.0 {
        return Err(Error::InvalidArgument("sample rate must be positive"));
    }
    let w = 2.0 * PI * frequency;
    Ok((0..count)
        .map(|i| amplitude * (w * (i as f64 / sample_rate) + phase).sin())
        .collect())
}

/// Uniform time axis `t_i = i / sample_rate` starting at zero.
pub fn sample_times(count: usize, sample_rate: f64) -> Result<Vec<f64>> {
    if sample_rate <= 0.0 {
        return Err(Error::InvalidArgument("sample rate must be positive"));
    }
    Ok((0..count).map(|i| i as f64 / sample_rate).collect())
}

/// A sine wave paired with its time axis.
pub fn sine_signal(amplitude: f64, phase: f64, frequency: f64,
                   sample_rate: f64, count: usize) -> Result<Signal> {
    Signal::new(sample_times(count, sample_rate)?,
                sine_samples(amplitude, phase, frequency, sample_rate, count)?)
}
