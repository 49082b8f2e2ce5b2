use crate::prelude::{CombineMode, SpectrumResult, Transform};
use crate::processing::{
    Downsample, DownsampleConfig, EquiDistance, EquiDistanceConfig, MultiFilter,
    MultiplicativeScatterCorrection, PassThrough, RangeScale, RangeScaleConfig, SavitzkyGolay,
    SavitzkyGolayConfig, StandardNormalVariate,
};
use serde::{Deserialize, Serialize};

/// Serializable description of a filter, as written in workflow files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    PassThrough,
    EquiDistance(EquiDistanceConfig),
    Downsample(DownsampleConfig),
    SavitzkyGolay(SavitzkyGolayConfig),
    StandardNormalVariate,
    RangeScale(RangeScaleConfig),
    Msc,
    Multi {
        #[serde(default)]
        mode: CombineMode,
        filters: Vec<FilterConfig>,
    },
}

impl FilterConfig {
    pub fn build(&self) -> SpectrumResult<Box<dyn Transform>> {
        let filter: Box<dyn Transform> = match self {
            FilterConfig::PassThrough => Box::new(PassThrough),
            FilterConfig::EquiDistance(config) => Box::new(EquiDistance::new(config.clone())),
            FilterConfig::Downsample(config) => Box::new(Downsample::new(config.clone())?),
            FilterConfig::SavitzkyGolay(config) => Box::new(SavitzkyGolay::new(config.clone())?),
            FilterConfig::StandardNormalVariate => Box::new(StandardNormalVariate::new()),
            FilterConfig::RangeScale(config) => Box::new(RangeScale::new(config.clone())),
            FilterConfig::Msc => Box::new(MultiplicativeScatterCorrection::new()),
            FilterConfig::Multi { mode, filters } => Box::new(MultiFilter::with_filters(
                *mode,
                filters
                    .iter()
                    .map(FilterConfig::build)
                    .collect::<SpectrumResult<Vec<_>>>()?,
            )),
        };
        Ok(filter)
    }
}
