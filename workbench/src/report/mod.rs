pub mod summary;

pub use summary::WorkflowSummary;
