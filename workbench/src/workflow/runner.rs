use crate::workflow::config::{SelectionConfig, WorkflowConfig};
use anyhow::Context;
use spectracore::prelude::{CombineMode, Trainable};
use spectracore::processing::{FilterConfig, MultiFilter};
use spectracore::selection::KennardStone;
use spectracore::telemetry::Metrics;
use spectracore::{Spectrum, SpectrumResult};

pub struct WorkflowResult {
    pub processed: Vec<Spectrum>,
    pub selected: Vec<Spectrum>,
    pub pipeline_metrics: Metrics,
    pub trained: bool,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

fn build_prefilter(filters: &[FilterConfig]) -> SpectrumResult<MultiFilter> {
    let filters = filters
        .iter()
        .map(FilterConfig::build)
        .collect::<SpectrumResult<Vec<_>>>()?;
    Ok(MultiFilter::with_filters(CombineMode::Series, filters))
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, spectra: &[Spectrum]) -> anyhow::Result<WorkflowResult> {
        let mut pipeline = self
            .config
            .pipeline
            .build()
            .context("building filter pipeline")?;
        let processed = pipeline
            .filter_batch(spectra)
            .context("running filter pipeline")?;
        log::info!(
            "pipeline ({}) processed {} spectra",
            self.config.pipeline.mode,
            processed.len()
        );

        let selected = match &self.config.selection {
            Some(selection) => self
                .select(selection, &processed)
                .context("running Kennard-Stone selection")?,
            None => processed.clone(),
        };

        Ok(WorkflowResult {
            trained: pipeline.is_trained(),
            pipeline_metrics: pipeline.metrics(),
            processed,
            selected,
        })
    }

    fn select(
        &self,
        selection: &SelectionConfig,
        spectra: &[Spectrum],
    ) -> anyhow::Result<Vec<Spectrum>> {
        let prefilter =
            build_prefilter(&selection.prefilter).context("building selection prefilter")?;
        let mut selector = KennardStone::new(selection.subset_size, selection.invert)
            .with_prefilter(Box::new(prefilter));
        Ok(selector.select(spectra)?)
    }
}
