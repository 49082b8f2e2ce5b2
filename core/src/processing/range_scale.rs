use crate::math::stats::StatsHelper;
use crate::prelude::{SpectrumResult, Transform};
use crate::spectrum::Spectrum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeScaleConfig {
    pub min: f32,
    pub max: f32,
}

impl Default for RangeScaleConfig {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Maps amplitudes linearly onto `[min, max]`.
///
/// The division by the input range is unconditional: a spectrum whose
/// amplitudes are all equal produces NaN.
pub struct RangeScale {
    config: RangeScaleConfig,
}

impl RangeScale {
    pub fn new(config: RangeScaleConfig) -> Self {
        Self { config }
    }
}

impl Transform for RangeScale {
    fn name(&self) -> &str {
        "range_scale"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        let amplitudes = spectrum.amplitudes();
        let (low, high) = StatsHelper::min_max(&amplitudes).unwrap_or((0.0, 0.0));
        let span = self.config.max - self.config.min;
        let scaled: Vec<f32> = amplitudes
            .iter()
            .map(|value| (value - low) / (high - low) * span + self.config.min)
            .collect();
        Ok(spectrum.with_amplitudes(&scaled))
    }
}
