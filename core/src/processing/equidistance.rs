use crate::prelude::{SpectrumResult, Transform};
use crate::spectrum::Spectrum;
use crate::telemetry::log::LogManager;
use crate::utils::resample::resample;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquiDistanceConfig {
    /// Number of output points; `None` keeps the input length.
    pub target_count: Option<usize>,
    pub allow_oversampling: bool,
    /// Re-index wave numbers as `offset + 1, offset + 2, ...`.
    pub offset: Option<u32>,
}

/// Resamples each spectrum onto evenly spaced wave numbers.
pub struct EquiDistance {
    config: EquiDistanceConfig,
    logger: LogManager,
}

impl EquiDistance {
    pub fn new(config: EquiDistanceConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("equi_distance"),
        }
    }
}

impl Transform for EquiDistance {
    fn name(&self) -> &str {
        "equi_distance"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        let output = resample(
            spectrum,
            self.config.target_count,
            self.config.allow_oversampling,
            self.config.offset,
        )?;
        self.logger.detail(&format!(
            "{} resampled {} -> {} points",
            spectrum.id(),
            spectrum.len(),
            output.len()
        ));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resamples_to_requested_count() {
        let mut filter = EquiDistance::new(EquiDistanceConfig {
            target_count: Some(4),
            ..Default::default()
        });
        let input = Spectrum::from_pairs("s", &[0.0, 1.0, 2.5, 3.0, 4.0], &[0.0; 5]);
        let output = filter.process(&input).unwrap();
        assert_eq!(output.len(), 4);
        assert_eq!(output.id(), "s");
        assert_eq!(input.len(), 5);
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut filter = EquiDistance::new(EquiDistanceConfig::default());
        assert!(filter.process(&Spectrum::new("e")).is_err());
    }
}
