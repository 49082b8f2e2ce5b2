use crate::prelude::{
    CombineMode, Composite, SpectrumError, SpectrumResult, Trainable, Transform,
};
use crate::processing::apply_batch;
use crate::spectrum::Spectrum;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{Metrics, MetricsRecorder};
use crate::utils::algebra::merge;
use rayon::prelude::*;

/// Runs a list of sub-filters either in series or side by side.
///
/// In parallel-merge mode every sub-filter gets its own copy of the input
/// and their outputs are merged in registration order, so the first
/// registered sub-filter wins on shared wave numbers. Sub-filters are
/// cleaned up after every invocation, successful or not.
pub struct MultiFilter {
    mode: CombineMode,
    filters: Vec<Box<dyn Transform>>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl MultiFilter {
    pub fn new(mode: CombineMode) -> Self {
        Self {
            mode,
            filters: Vec::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("multi_filter"),
        }
    }

    pub fn with_filters(mode: CombineMode, filters: Vec<Box<dyn Transform>>) -> Self {
        let mut multi = Self::new(mode);
        multi.filters = filters;
        multi
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    fn run_series(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        let mut current = spectrum.clone();
        for filter in self.filters.iter_mut() {
            current = filter.process(&current)?;
        }
        Ok(current)
    }

    fn run_parallel(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        let outputs = self
            .filters
            .par_iter_mut()
            .map(|filter| {
                let copy = spectrum.clone();
                filter.process(&copy)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<SpectrumResult<Vec<_>>>()?;
        Ok(merge(outputs).unwrap_or_else(|| spectrum.clone()))
    }

    fn run_series_batch(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
        let mut current = spectra.to_vec();
        for filter in self.filters.iter_mut() {
            current = apply_batch(&mut **filter, &current)?;
        }
        Ok(current)
    }

    fn run_parallel_batch(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
        if self.filters.is_empty() {
            return Ok(spectra.to_vec());
        }

        let outputs = self
            .filters
            .par_iter_mut()
            .map(|filter| {
                let copies = spectra.to_vec();
                apply_batch(&mut **filter, &copies)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<SpectrumResult<Vec<_>>>()?;

        for output in &outputs {
            if output.len() != spectra.len() {
                return Err(SpectrumError::LengthMismatch {
                    expected: spectra.len(),
                    actual: output.len(),
                });
            }
        }

        let mut columns: Vec<_> = outputs.into_iter().map(Vec::into_iter).collect();
        let mut merged = Vec::with_capacity(spectra.len());
        for original in spectra {
            let row: Vec<Spectrum> = columns.iter_mut().filter_map(|column| column.next()).collect();
            merged.push(merge(row).unwrap_or_else(|| original.clone()));
        }
        Ok(merged)
    }

    fn cleanup_sub_filters(&mut self) {
        for filter in self.filters.iter_mut() {
            filter.cleanup();
        }
    }

    fn finish<T>(&mut self, result: SpectrumResult<T>, count: usize) -> SpectrumResult<T> {
        self.cleanup_sub_filters();
        match &result {
            Ok(_) => self.metrics.record_processed(count),
            Err(err) => {
                self.metrics.record_failure();
                self.logger.warn(&format!("{} run failed: {}", self.mode, err));
            }
        }
        result
    }
}

impl Transform for MultiFilter {
    fn name(&self) -> &str {
        "multi_filter"
    }

    fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
        self.check(spectrum)?;
        let result = match self.mode {
            CombineMode::Series => self.run_series(spectrum),
            CombineMode::ParallelMerge => self.run_parallel(spectrum),
        };
        self.finish(result, 1)
    }

    fn cleanup(&mut self) {
        self.cleanup_sub_filters();
    }

    fn as_trainable(&self) -> Option<&dyn Trainable> {
        Some(self)
    }

    fn as_trainable_mut(&mut self) -> Option<&mut dyn Trainable> {
        Some(self)
    }
}

impl Trainable for MultiFilter {
    /// Trained once every trainable sub-filter is.
    fn is_trained(&self) -> bool {
        self.filters
            .iter()
            .filter_map(|filter| filter.as_trainable())
            .all(|trainable| trainable.is_trained())
    }

    /// Trains trainable sub-filters by running the batch through them.
    fn train(&mut self, spectra: &[Spectrum]) -> SpectrumResult<()> {
        if spectra.is_empty() {
            return Err(SpectrumError::InvalidInput(
                "multi_filter: no spectra to train on".into(),
            ));
        }
        self.filter_batch(spectra).map(|_| ())
    }

    fn reset(&mut self) {
        for filter in self.filters.iter_mut() {
            if let Some(trainable) = filter.as_trainable_mut() {
                trainable.reset();
            }
        }
    }

    fn filter_batch(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
        let result = match self.mode {
            CombineMode::Series => self.run_series_batch(spectra),
            CombineMode::ParallelMerge => self.run_parallel_batch(spectra),
        };
        self.logger.detail(&format!(
            "{} batch of {} through {} filters",
            self.mode,
            spectra.len(),
            self.filters.len()
        ));
        self.finish(result, spectra.len())
    }
}

impl Composite for MultiFilter {
    fn mode(&self) -> CombineMode {
        self.mode
    }

    fn sub_filters(&self) -> &[Box<dyn Transform>] {
        &self.filters
    }

    fn add(&mut self, filter: Box<dyn Transform>) {
        self.filters.push(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{
        Downsample, DownsampleConfig, MultiplicativeScatterCorrection, PassThrough, RangeScale,
        RangeScaleConfig,
    };

    /// Adds a constant to every amplitude.
    struct Offset {
        amount: f32,
    }

    impl Offset {
        fn boxed(amount: f32) -> Box<dyn Transform> {
            Box::new(Self { amount })
        }
    }

    impl Transform for Offset {
        fn name(&self) -> &str {
            "offset"
        }

        fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
            self.check(spectrum)?;
            let shifted: Vec<f32> = spectrum
                .amplitudes()
                .iter()
                .map(|a| a + self.amount)
                .collect();
            Ok(spectrum.with_amplitudes(&shifted))
        }
    }

    fn spectrum() -> Spectrum {
        Spectrum::from_pairs("s", &[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0])
    }

    #[test]
    fn series_chains_sub_filters() {
        let mut multi =
            MultiFilter::with_filters(CombineMode::Series, vec![Offset::boxed(1.0), Offset::boxed(10.0)]);
        let output = multi.process(&spectrum()).unwrap();
        assert_eq!(output.amplitudes(), vec![12.0, 13.0, 14.0, 15.0]);
        assert_eq!(multi.metrics().processed, 1);
    }

    #[test]
    fn parallel_merge_prefers_first_registered_filter() {
        let mut multi = MultiFilter::new(CombineMode::ParallelMerge);
        multi.add(Box::new(
            Downsample::new(DownsampleConfig { step: 2, start: 0 }).unwrap(),
        ));
        multi.add(Offset::boxed(100.0));
        let output = multi.process(&spectrum()).unwrap();

        assert_eq!(output.wave_numbers(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(output.amplitudes(), vec![1.0, 102.0, 3.0, 104.0]);
        assert_eq!(multi.sub_filters().len(), 2);
    }

    #[test]
    fn single_sub_filter_is_mode_independent() {
        let input = spectrum();
        let direct = RangeScale::new(RangeScaleConfig::default())
            .process(&input)
            .unwrap();
        for mode in [CombineMode::Series, CombineMode::ParallelMerge] {
            let mut multi = MultiFilter::with_filters(
                mode,
                vec![Box::new(RangeScale::new(RangeScaleConfig::default()))],
            );
            assert_eq!(multi.process(&input).unwrap(), direct);
            assert_eq!(multi.filter_batch(&[input.clone()]).unwrap(), vec![direct.clone()]);
        }
    }

    #[test]
    fn empty_composite_returns_input() {
        for mode in [CombineMode::Series, CombineMode::ParallelMerge] {
            let mut multi = MultiFilter::new(mode);
            assert_eq!(multi.process(&spectrum()).unwrap(), spectrum());
        }
    }

    #[test]
    fn batch_mode_trains_trainable_sub_filters() {
        let mut multi = MultiFilter::with_filters(
            CombineMode::Series,
            vec![
                Box::new(PassThrough),
                Box::new(MultiplicativeScatterCorrection::new()),
            ],
        );
        assert!(!multi.is_trained());

        let doubled = spectrum().with_amplitudes(&[2.0, 4.0, 6.0, 8.0]);
        let output = multi.filter_batch(&[spectrum(), doubled]).unwrap();
        assert!(multi.is_trained());
        assert_eq!(output.len(), 2);
        for (a, b) in output[0].amplitudes().iter().zip(output[1].amplitudes()) {
            assert!((a - b).abs() < 1e-4);
        }

        multi.reset();
        assert!(!multi.is_trained());
    }

    /// Batch filter that drops the last spectrum of every batch.
    struct DropLast;

    impl Transform for DropLast {
        fn name(&self) -> &str {
            "drop_last"
        }

        fn process(&mut self, spectrum: &Spectrum) -> SpectrumResult<Spectrum> {
            Ok(spectrum.clone())
        }

        fn as_trainable(&self) -> Option<&dyn Trainable> {
            Some(self)
        }

        fn as_trainable_mut(&mut self) -> Option<&mut dyn Trainable> {
            Some(self)
        }
    }

    impl Trainable for DropLast {
        fn is_trained(&self) -> bool {
            true
        }

        fn train(&mut self, _spectra: &[Spectrum]) -> SpectrumResult<()> {
            Ok(())
        }

        fn reset(&mut self) {}

        fn filter_batch(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
            Ok(spectra[..spectra.len().saturating_sub(1)].to_vec())
        }
    }

    #[test]
    fn training_on_empty_batch_is_rejected() {
        let mut series = MultiFilter::with_filters(CombineMode::Series, vec![Box::new(PassThrough)]);
        assert!(matches!(series.train(&[]), Err(SpectrumError::InvalidInput(_))));

        let mut empty = MultiFilter::new(CombineMode::ParallelMerge);
        assert!(matches!(empty.train(&[]), Err(SpectrumError::InvalidInput(_))));

        assert!(series.train(&[spectrum()]).is_ok());
    }

    #[test]
    fn parallel_batch_merges_per_spectrum() {
        let mut multi = MultiFilter::with_filters(
            CombineMode::ParallelMerge,
            vec![
                Box::new(Downsample::new(DownsampleConfig { step: 2, start: 0 }).unwrap()),
                Box::new(RangeScale::new(RangeScaleConfig::default())),
            ],
        );
        let a = Spectrum::from_pairs("a", &[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        let b = Spectrum::from_pairs("b", &[1.0, 2.0, 3.0], &[1.0, 3.0, 9.0]);

        let output = multi.filter_batch(&[a, b]).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].id(), "a");
        assert_eq!(output[0].wave_numbers(), vec![1.0, 2.0, 3.0]);
        assert_eq!(output[0].amplitudes(), vec![2.0, 0.5, 6.0]);
        assert_eq!(output[1].id(), "b");
        assert_eq!(output[1].amplitudes(), vec![1.0, 0.25, 9.0]);
        assert_eq!(multi.metrics().processed, 2);
    }

    #[test]
    fn parallel_batch_rejects_sub_filter_length_change() {
        let mut multi = MultiFilter::with_filters(
            CombineMode::ParallelMerge,
            vec![Box::new(PassThrough), Box::new(DropLast)],
        );
        let err = multi.filter_batch(&[spectrum(), spectrum()]).unwrap_err();
        assert_eq!(err, SpectrumError::LengthMismatch { expected: 2, actual: 1 });
        assert_eq!(multi.metrics().failed, 1);
    }

    #[test]
    fn failures_are_counted() {
        let mut multi = MultiFilter::with_filters(
            CombineMode::Series,
            vec![Box::new(
                Downsample::new(DownsampleConfig { step: 10, start: 5 }).unwrap(),
            ), Offset::boxed(1.0)],
        );
        assert!(multi.process(&spectrum()).is_err());
        assert_eq!(multi.metrics().failed, 1);
        assert_eq!(multi.metrics().processed, 0);
    }
}
