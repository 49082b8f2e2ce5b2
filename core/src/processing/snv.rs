use crate::math::stats::StatsHelper;
use crate::prelude::{SpectrumResult, Transform};
use crate::processing::buffer_pool::BufferPool;
use crate::spectrum::Spectrum;

/// Standard normal variate: centres each spectrum on its mean amplitude and
/// divides by its standard deviation.
///
/// A flat spectrum has zero deviation and comes out as NaN.
pub struct StandardNormalVariate {
    pool: BufferPool,
}

impl StandardNormalVariate {
    pub fn new() -> Self {
        Self {
            pool: BufferPool::with_capacity(2),
        }
    }
}

impl Default for StandardNormalVariate {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for StandardNormalVariate {
    fn name(&self) -> &str {
        "standard_normal_variate"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        let mut amplitudes = self.pool.checkout(spectrum.len());
        for (slot, point) in amplitudes.iter_mut().zip(spectrum.points()) {
            *slot = point.amplitude();
        }

        let mean = StatsHelper::mean(&amplitudes);
        let stddev = StatsHelper::stddev(&amplitudes);
        for value in amplitudes.iter_mut() {
            *value = (*value - mean) / stddev;
        }

        let output = spectrum.with_amplitudes(&amplitudes);
        self.pool.release(amplitudes);
        Ok(output)
    }

    fn cleanup(&mut self) {
        self.pool.reset();
    }
}
