use crate::spectrum::Spectrum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common error type for spectrum utilities and filters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("spectrum has no points")]
    EmptySpectrum,
    #[error("points are not sorted ascending by wave number")]
    UnsortedInput,
    #[error("wave number {0} not present")]
    MissingWaveNumber(f32),
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("filter not trained: {0}")]
    NotTrained(String),
    #[error("unhandled variant: {0}")]
    UnhandledVariant(String),
}

pub type SpectrumResult<T> = Result<T, SpectrumError>;

/// Single-item transform shared by every filter shape.
///
/// Implementations never mutate their input; `&mut self` only grants access
/// to per-run scratch state, which `cleanup` releases.
pub trait Transform: Send {
    fn name(&self) -> &str;

    /// Rejects items the filter cannot handle before any work is done.
    fn check(&self, spectrum: &Spectrum) -> SpectrumResult<()> {
        if spectrum.is_empty() {
            return Err(SpectrumError::InvalidInput(format!(
                "{}: spectrum '{}' has no points",
                self.name(),
                spectrum.id()
            )));
        }
        Ok(())
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum>;

    /// Releases transient per-run resources.
    fn cleanup(&mut self) {}

    /// Exposes the batch capability of filters that have one.
    fn as_trainable(&self) -> Option<&dyn Trainable> {
        None
    }

    fn as_trainable_mut(&mut self) -> Option<&mut dyn Trainable> {
        None
    }
}

/// Filter with a fit phase over a population.
pub trait Trainable: Transform {
    fn is_trained(&self) -> bool;

    fn train(&mut self, spectra: &[Spectrum]) -> SpectrumResult<()>;

    /// Forgets any fitted state.
    fn reset(&mut self);

    /// Trains on `spectra` when untrained, then filters every item.
    fn filter_batch(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
        if !self.is_trained() {
            self.train(spectra)?;
        }
        spectra.iter().map(|spectrum| self.process(spectrum)).collect()
    }
}

/// How a composite combines its sub-filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Output of each sub-filter feeds the next one.
    #[default]
    Series,
    /// Every sub-filter sees the original input; outputs are merged with
    /// the first registered sub-filter winning on shared wave numbers.
    ParallelMerge,
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMode::Series => write!(f, "series"),
            CombineMode::ParallelMerge => write!(f, "parallel_merge"),
        }
    }
}

impl FromStr for CombineMode {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "series" => Ok(CombineMode::Series),
            "parallel_merge" => Ok(CombineMode::ParallelMerge),
            other => Err(SpectrumError::UnhandledVariant(format!(
                "combine mode '{}'",
                other
            ))),
        }
    }
}

/// Filter built from an ordered list of sub-filters.
pub trait Composite: Transform {
    fn mode(&self) -> CombineMode;

    fn sub_filters(&self) -> &[Box<dyn Transform>];

    fn add(&mut self, filter: Box<dyn Transform>);
}
