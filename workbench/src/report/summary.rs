use crate::workflow::config::WorkflowConfig;
use crate::workflow::runner::WorkflowResult;
use serde::{Deserialize, Serialize};
use spectracore::Spectrum;

/// JSON-serializable outcome of one workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkflowSummary {
    pub input_count: usize,
    pub output_count: usize,
    pub points_per_spectrum: usize,
    pub mode: String,
    pub filters: usize,
    pub trained: bool,
    pub failures: usize,
    pub selected_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectra: Option<Vec<Spectrum>>,
}

impl WorkflowSummary {
    pub fn new(
        config: &WorkflowConfig,
        input_count: usize,
        result: &WorkflowResult,
        emit_spectra: bool,
    ) -> Self {
        Self {
            input_count,
            output_count: result.processed.len(),
            points_per_spectrum: result.processed.first().map_or(0, Spectrum::len),
            mode: config.pipeline.mode.to_string(),
            filters: config.pipeline.filters.len(),
            trained: result.trained,
            failures: result.pipeline_metrics.failed,
            selected_ids: result
                .selected
                .iter()
                .map(|spectrum| spectrum.id().to_string())
                .collect(),
            spectra: emit_spectra.then(|| result.selected.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_population;
    use crate::workflow::runner::Runner;

    #[test]
    fn summary_serializes_selected_ids() {
        let cfg = WorkflowConfig::from_args(5, 32, 1, Some(2));
        let spectra = build_population(&cfg.generator).unwrap();
        let result = Runner::new(cfg.clone()).execute(&spectra).unwrap();

        let summary = WorkflowSummary::new(&cfg, spectra.len(), &result, false);
        assert_eq!(summary.input_count, 5);
        assert_eq!(summary.mode, "series");
        assert_eq!(summary.selected_ids.len(), 2);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("spectra").is_none());
        assert_eq!(json["selected_ids"].as_array().unwrap().len(), 2);

        let with_spectra = WorkflowSummary::new(&cfg, spectra.len(), &result, true);
        assert_eq!(with_spectra.spectra.unwrap().len(), 2);
    }
}
