pub mod comparator;
pub mod container;
pub mod point;
pub mod report;

pub use comparator::WaveNumberComparator;
pub use container::Spectrum;
pub use point::SpectrumPoint;
pub use report::{FieldValue, Report};
