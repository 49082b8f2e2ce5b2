use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use spectracore::processing::{FilterConfig, MultiFilter, SavitzkyGolayConfig};
use spectracore::{CombineMode, SpectrumResult};
use std::fs;
use std::path::Path;

/// Ordered filter chain applied to the whole population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub mode: CombineMode,
    pub filters: Vec<FilterConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: CombineMode::Series,
            filters: vec![
                FilterConfig::SavitzkyGolay(SavitzkyGolayConfig {
                    derivative: 0,
                    ..Default::default()
                }),
                FilterConfig::Msc,
            ],
        }
    }
}

impl PipelineConfig {
    pub fn build(&self) -> SpectrumResult<MultiFilter> {
        let filters = self
            .filters
            .iter()
            .map(FilterConfig::build)
            .collect::<SpectrumResult<Vec<_>>>()?;
        Ok(MultiFilter::with_filters(self.mode, filters))
    }
}

/// Kennard-Stone settings; distances are measured after `prefilter`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub subset_size: i64,
    #[serde(default)]
    pub invert: bool,
    #[serde(default)]
    pub prefilter: Vec<FilterConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub selection: Option<SelectionConfig>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(count: usize, points: usize, seed: u64, subset_size: Option<i64>) -> Self {
        Self {
            generator: GeneratorConfig {
                count,
                points,
                seed,
                ..Default::default()
            },
            pipeline: PipelineConfig::default(),
            selection: subset_size.map(|subset_size| SelectionConfig {
                subset_size,
                invert: false,
                prefilter: Vec::new(),
            }),
        }
    }
}
