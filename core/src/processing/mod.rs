pub mod buffer_pool;
pub mod config;
pub mod downsample;
pub mod equidistance;
pub mod msc;
pub mod multi;
pub mod passthrough;
pub mod pls;
pub mod range_scale;
pub mod savitzky_golay;
pub mod snv;

pub use buffer_pool::BufferPool;
pub use config::FilterConfig;
pub use downsample::{Downsample, DownsampleConfig};
pub use equidistance::{EquiDistance, EquiDistanceConfig};
pub use msc::MultiplicativeScatterCorrection;
pub use multi::MultiFilter;
pub use passthrough::PassThrough;
pub use pls::{Pls, Projection};
pub use range_scale::{RangeScale, RangeScaleConfig};
pub use savitzky_golay::{SavitzkyGolay, SavitzkyGolayConfig};
pub use snv::StandardNormalVariate;

use crate::prelude::{SpectrumResult, Transform};
use crate::spectrum::Spectrum;

/// Runs `filter` over a batch, using its batch mode when it has one.
pub fn apply_batch(filter: &mut dyn Transform, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
    if let Some(trainable) = filter.as_trainable_mut() {
        return trainable.filter_batch(spectra);
    }
    spectra.iter().map(|spectrum| filter.process(spectrum)).collect()
}
