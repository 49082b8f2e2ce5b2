use std::sync::Mutex;

/// Counts spectra handled and failures seen by a filter.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub processed: usize,
    pub failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_processed(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += count;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_processed(3);
        recorder.record_processed(1);
        recorder.record_failure();
        assert_eq!(
            recorder.snapshot(),
            Metrics {
                processed: 4,
                failed: 1
            }
        );
    }
}
