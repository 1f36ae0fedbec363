mod signal;
mod spectrum;
mod waveform;
mod synth;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    InvalidArgument(&'static str),
    EmptySeries,
    DegenerateFit,
    LengthMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(what) =>
                write!(f, "invalid argument: {}", what),
            Self::EmptySeries =>
                write!(f, "series contains no samples"),
            Self::DegenerateFit =>
                write!(f, "time grid is degenerate for this frequency"),
            Self::LengthMismatch { expected, actual } =>
                write!(f, "length mismatch: expected {} elements, got {}", expected, actual),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> =
    core::result::Result<T, Error>;

pub use signal::{
    Signal,
    Estimate,
    wrap_phase,
};

pub use spectrum::fft_bin_estimate;

pub use waveform::{
    ChannelCalibration,
    SweepDescriptor,
    TimeAxis,
    TimeAxisIter,
    scale_codes,
    capture,
    codes_from_bytes,
};

pub use synth::{
    sine_samples,
    sample_times,
    sine_signal,
};
