use crate::math::matrix::MatrixHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{SpectrumError, SpectrumResult, Trainable, Transform};
use crate::spectrum::Spectrum;
use crate::telemetry::log::LogManager;
use ndarray::Axis;

/// Multiplicative scatter correction.
///
/// Training stores the mean spectrum of the population. Each spectrum is
/// then regressed on that mean (`x = a + b * mean`) and corrected to
/// `(x - a) / b`. Before training, `process` returns its input unchanged.
pub struct MultiplicativeScatterCorrection {
    reference: Option<Vec<f32>>,
    logger: LogManager,
}

impl MultiplicativeScatterCorrection {
    pub fn new() -> Self {
        Self {
            reference: None,
            logger: LogManager::new("msc"),
        }
    }

    /// Mean spectrum learned during training.
    pub fn reference(&self) -> Option<&[f32]> {
        self.reference.as_deref()
    }
}

impl Default for MultiplicativeScatterCorrection {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for MultiplicativeScatterCorrection {
    fn name(&self) -> &str {
        "msc"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        let Some(reference) = self.reference.as_ref() else {
            self.logger.warn(&format!(
                "not trained, passing '{}' through unchanged",
                spectrum.id()
            ));
            return Ok(spectrum.clone());
        };

        if spectrum.len() != reference.len() {
            return Err(SpectrumError::LengthMismatch {
                expected: reference.len(),
                actual: spectrum.len(),
            });
        }

        let amplitudes = spectrum.amplitudes();
        let (intercept, slope) = StatsHelper::linear_regression(reference, &amplitudes);
        let corrected: Vec<f32> = amplitudes
            .iter()
            .map(|value| (value - intercept) / slope)
            .collect();
        Ok(spectrum.with_amplitudes(&corrected))
    }

    fn as_trainable(&self) -> Option<&dyn Trainable> {
        Some(self)
    }

    fn as_trainable_mut(&mut self) -> Option<&mut dyn Trainable> {
        Some(self)
    }
}

impl Trainable for MultiplicativeScatterCorrection {
    fn is_trained(&self) -> bool {
        self.reference.is_some()
    }

    fn train(&mut self, spectra: &[Spectrum]) -> SpectrumResult<()> {
        if spectra.is_empty() {
            return Err(SpectrumError::InvalidInput(
                "msc: no spectra to train on".into(),
            ));
        }
        let matrix = MatrixHelper::amplitude_matrix(spectra)?;
        let mean = matrix
            .mean_axis(Axis(0))
            .ok_or_else(|| SpectrumError::InvalidInput("msc: empty training matrix".into()))?;
        self.reference = Some(mean.to_vec());
        self.logger
            .record(&format!("trained on {} spectra", spectra.len()));
        Ok(())
    }

    fn reset(&mut self) {
        self.reference = None;
    }
}
