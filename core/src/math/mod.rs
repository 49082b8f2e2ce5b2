pub mod interpolation;
pub mod matrix;
pub mod savitzky_golay;
pub mod stats;

pub use matrix::MatrixHelper;
pub use stats::StatsHelper;
