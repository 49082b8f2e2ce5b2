//! Free functions over spectra and sorted point slices.

pub mod algebra;
pub mod analysis;
pub mod gaps;
pub mod resample;
pub mod search;

pub use algebra::{intersect, merge, minus, missing_regions, union};
pub use analysis::{count_regions, count_sign_changes, diff, interpolate, Interpolation};
pub use gaps::{fill_gaps, GapFilling};
pub use resample::resample;
pub use search::{find_closest, find_enclosing, find_exact};
