use crate::prelude::{SpectrumResult, Transform};
use crate::spectrum::Spectrum;

/// Returns a copy of its input.
#[derive(Debug, Clone, Default)]
pub struct PassThrough;

impl Transform for PassThrough {
    fn name(&self) -> &str {
        "pass_through"
    }

    fn check(&self, _spectrum: &Spectrum) -> SpectrumResult<()> {
        Ok(())
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        Ok(spectrum.clone())
    }
}
