use crate::math::savitzky_golay::coefficients;
use crate::prelude::{SpectrumError, SpectrumResult, Transform};
use crate::processing::buffer_pool::BufferPool;
use crate::spectrum::Spectrum;
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavitzkyGolayConfig {
    /// Points used before the centre.
    pub left: usize,
    /// Points used after the centre.
    pub right: usize,
    pub polynomial: usize,
    /// 0 smooths, 1 and above differentiate.
    pub derivative: usize,
}

impl Default for SavitzkyGolayConfig {
    fn default() -> Self {
        Self {
            left: 3,
            right: 3,
            polynomial: 2,
            derivative: 1,
        }
    }
}

/// Savitzky-Golay smoothing / differentiation over point order.
///
/// The first `left` and last `right` points have no full window and are
/// dropped from the output.
pub struct SavitzkyGolay {
    config: SavitzkyGolayConfig,
    weights: Vec<f32>,
    pool: BufferPool,
    logger: LogManager,
}

impl SavitzkyGolay {
    pub fn new(config: SavitzkyGolayConfig) -> SpectrumResult<Self> {
        let weights = coefficients(
            config.left,
            config.right,
            config.polynomial,
            config.derivative,
        )?;
        Ok(Self {
            config,
            weights,
            pool: BufferPool::with_capacity(4),
            logger: LogManager::new("savitzky_golay"),
        })
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl Transform for SavitzkyGolay {
    fn name(&self) -> &str {
        "savitzky_golay"
    }

    fn check(&self, spectrum: &Spectrum) -> SpectrumResult<()> {
        if spectrum.len() < self.weights.len() {
            return Err(SpectrumError::InvalidInput(format!(
                "savitzky_golay: spectrum '{}' has {} points, window needs {}",
                spectrum.id(),
                spectrum.len(),
                self.weights.len()
            )));
        }
        Ok(())
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;

        let points = spectrum.points();
        let window = self.weights.len();
        let mut amplitudes = self.pool.checkout(points.len() + 1 - window);
        for (slot, chunk) in amplitudes.iter_mut().zip(points.windows(window)) {
            *slot = chunk
                .iter()
                .zip(&self.weights)
                .map(|(point, weight)| point.amplitude() * weight)
                .sum();
        }

        let centre = &points[self.config.left..points.len() - self.config.right];
        let output = spectrum.derive(
            centre
                .iter()
                .zip(&amplitudes)
                .map(|(point, &amplitude)| point.with_amplitude(amplitude))
                .collect(),
        );
        self.pool.release(amplitudes);
        self.logger
            .detail(&format!("{} filtered with window {}", spectrum.id(), window));
        Ok(output)
    }

    fn cleanup(&mut self) {
        self.pool.reset();
    }
}
