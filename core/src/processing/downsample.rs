use crate::prelude::{SpectrumError, SpectrumResult, Transform};
use crate::spectrum::Spectrum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownsampleConfig {
    /// Keep every `step`-th point.
    pub step: usize,
    /// Index of the first point kept.
    pub start: usize,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self { step: 2, start: 0 }
    }
}

/// Keeps every `step`-th point starting at `start`.
pub struct Downsample {
    config: DownsampleConfig,
}

impl Downsample {
    pub fn new(config: DownsampleConfig) -> SpectrumResult<Self> {
        if config.step == 0 {
            return Err(SpectrumError::InvalidInput("downsample step must be positive".into()));
        }
        Ok(Self { config })
    }
}

impl Transform for Downsample {
    fn name(&self) -> &str {
        "downsample"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        let points = spectrum
            .points()
            .iter()
            .skip(self.config.start)
            .step_by(self.config.step)
            .copied()
            .collect();
        Ok(spectrum.derive(points))
    }
}
