//! Discrete-Fourier-transform lookup of a cosine component.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::{Error, Estimate, Result, Signal};

/// Estimate the amplitude and phase of a cosine component from the FFT bin
/// closest to `frequency`.
///
/// Sample spacing is taken from the first two time values; a single-sample
/// signal uses a nominal unit spacing. When two bins are equidistant from the
/// target, the lowest-index bin wins. Off-bin frequencies give a biased
/// estimate (spectral leakage); at an exact bin the phase follows the same
/// cosine reference model as the least-squares path.
pub fn fft_bin_estimate(signal: &Signal, frequency: f64) -> Result<Estimate> {
    if frequency < 0.0 {
        return Err(Error::InvalidArgument("frequency must be non-negative"));
    }
    if signal.is_empty() {
        return Err(Error::EmptySeries);
    }

    let n = signal.len();
    let times = signal.times();
    let dt = if n > 1 { times[1] - times[0] } else { 1.0 };

    let mut buffer = signal.samples().iter()
        .map(|&x| Complex::new(x, 0.0))
        .collect::<Vec<_>>();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let mut index = 0;
    let mut best = f64::INFINITY;
    for (k, center) in bin_centers(n, dt).enumerate() {
        let distance = (center - frequency).abs();
        if distance < best {
            index = k;
            best = distance;
        }
    }
    log::trace!("bin {} of {} is nearest to {} Hz (off by {} Hz)", index, n, frequency, best);

    let value = buffer[index];
    Ok(Estimate {
        amplitude: 2.0 / n as f64 * value.norm(),
        phase: value.arg(),
    })
}

/// Bin center frequencies of an n-point transform at sample spacing `dt`,
/// in transform order: the non-negative half first, then the negative half
/// folded down from the Nyquist frequency.
fn bin_centers(n: usize, dt: f64) -> impl Iterator<Item = f64> {
    let resolution = (n as f64 * dt).recip();
    (0..n).map(move |k| {
        let k = if k < (n + 1) / 2 { k as isize } else { k as isize - n as isize };
        k as f64 * resolution
    })
}
