use log::{debug, info, warn};

/// Log facade wrapper that prefixes every message with its source filter.
#[derive(Debug, Clone)]
pub struct LogManager {
    source: String,
}

impl LogManager {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn record(&self, message: &str) {
        info!("{}: {}", self.source, message);
    }

    pub fn detail(&self, message: &str) {
        debug!("{}: {}", self.source, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{}: {}", self.source, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("spectracore")
    }
}
