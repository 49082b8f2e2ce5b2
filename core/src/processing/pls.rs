use crate::math::matrix::MatrixHelper;
use crate::prelude::{SpectrumError, SpectrumResult, Trainable, Transform};
use crate::spectrum::{Spectrum, SpectrumPoint};
use crate::telemetry::log::LogManager;
use ndarray::{Array2, ArrayView2};

/// Fitted projection of amplitude vectors onto latent components.
///
/// The fitting algorithm lives outside this crate; the filter only relies
/// on this contract.
pub trait Projection: Send {
    fn fit(&mut self, features: ArrayView2<f32>) -> SpectrumResult<()>;

    fn is_fitted(&self) -> bool;

    /// One row of component scores per input row.
    fn project(&self, features: ArrayView2<f32>) -> SpectrumResult<Array2<f32>>;

    fn reset(&mut self);
}

/// Partial-least-squares style filter over a whole population.
///
/// Works in batch mode only: single-item `process` calls pass the input
/// through. Batch output spectra hold the component scores at wave numbers
/// `1, 2, ...`.
pub struct Pls<P: Projection> {
    projection: P,
    logger: LogManager,
}

impl<P: Projection> Pls<P> {
    pub fn new(projection: P) -> Self {
        Self {
            projection,
            logger: LogManager::new("pls"),
        }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }
}

impl<P: Projection> Transform for Pls<P> {
    fn name(&self) -> &str {
        "pls"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        self.logger.detail(&format!(
            "single-item call, passing '{}' through",
            spectrum.id()
        ));
        Ok(spectrum.clone())
    }

    fn as_trainable(&self) -> Option<&dyn Trainable> {
        Some(self)
    }

    fn as_trainable_mut(&mut self) -> Option<&mut dyn Trainable> {
        Some(self)
    }
}

impl<P: Projection> Trainable for Pls<P> {
    fn is_trained(&self) -> bool {
        self.projection.is_fitted()
    }

    fn train(&mut self, spectra: &[Spectrum]) -> SpectrumResult<()> {
        if spectra.is_empty() {
            return Err(SpectrumError::InvalidInput(
                "pls: no spectra to train on".into(),
            ));
        }
        let features = MatrixHelper::amplitude_matrix(spectra)?;
        self.projection.fit(features.view())?;
        self.logger
            .record(&format!("fitted projection on {} spectra", spectra.len()));
        Ok(())
    }

    fn reset(&mut self) {
        self.projection.reset();
    }

    fn filter_batch(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
        if !self.is_trained() {
            self.train(spectra)?;
        }
        let features = MatrixHelper::amplitude_matrix(spectra)?;
        let scores = self.projection.project(features.view())?;
        if scores.nrows() != spectra.len() {
            return Err(SpectrumError::LengthMismatch {
                expected: spectra.len(),
                actual: scores.nrows(),
            });
        }

        Ok(spectra
            .iter()
            .zip(scores.rows())
            .map(|(spectrum, row)| {
                spectrum.derive(
                    row.iter()
                        .enumerate()
                        .map(|(component, &score)| {
                            SpectrumPoint::new((component + 1) as f32, score)
                        })
                        .collect(),
                )
            })
            .collect())
    }
}
