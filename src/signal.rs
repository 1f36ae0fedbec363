//! Paired time/sample series and least-squares extraction of a cosine component.

use std::f64::consts::PI;

use crate::{Error, Result};

/// Amplitude and phase of a cosine component: `x(t) ≈ amplitude · cos(ωt + phase)`.
///
/// `amplitude` is never negative and `phase` lies in `(-π, π]`; both fall out
/// of the two-argument arctangent used by the estimators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub amplitude: f64,
    pub phase: f64,
}

/// Canonicalize an angle in radians to the `(-π, π]` range.
pub fn wrap_phase(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI); // [0, 2π)
    if wrapped > PI { wrapped - 2.0 * PI } else { wrapped }
}

/// Container for equal-length time and sample vectors.
///
/// An empty signal can be constructed; every analysis operation on one fails
/// with [`Error::EmptySeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    times: Vec<f64>,
    samples: Vec<f64>,
}

impl Signal {
    /// Pair a time axis with its samples, checking that the lengths agree.
    pub fn new(times: Vec<f64>, samples: Vec<f64>) -> Result<Signal> {
        if times.len() != samples.len() {
            return Err(Error::LengthMismatch {
                expected: times.len(),
                actual: samples.len(),
            });
        }
        Ok(Signal { times, samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Iterate over `(time, sample)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.samples.iter().copied())
    }

    /// Fit `x(t) = amplitude · cos(2π · frequency · t + phase)` by ordinary
    /// least squares against sin/cos basis functions.
    ///
    /// Fails with [`Error::DegenerateFit`] when the normal-equations matrix
    /// is exactly singular, i.e. the time grid carries no information to
    /// separate the two basis functions at this frequency (zero frequency
    /// with any grid, or all sample times identical).
    pub fn least_squares_estimate(&self, frequency: f64) -> Result<Estimate> {
        if frequency < 0.0 {
            return Err(Error::InvalidArgument("frequency must be non-negative"));
        }
        if self.is_empty() {
            return Err(Error::EmptySeries);
        }

        let w = 2.0 * PI * frequency;
        let mut ss = 0.0;
        let mut cc = 0.0;
        let mut sc = 0.0;
        let mut xs = 0.0;
        let mut xc = 0.0;
        for (t, x) in self.pairs() {
            let (s, c) = (w * t).sin_cos();
            ss += s * s;
            cc += c * c;
            sc += s * c;
            xs += x * s;
            xc += x * c;
        }

        let det = ss * cc - sc * sc;
        if det == 0.0 {
            return Err(Error::DegenerateFit);
        }

        let a = (xc * ss - xs * sc) / det;
        let b = (xs * cc - xc * sc) / det;
        Ok(Estimate { amplitude: a.hypot(b), phase: (-b).atan2(a) })
    }
}
