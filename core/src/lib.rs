//! Signal-indexing and filter-composition core for spectral preprocessing.
//!
//! Spectra are ordered `(wave number, amplitude)` samples. The `utils`
//! module provides sorted lookups, set algebra, gap filling and
//! resampling; `processing` holds the filters and their composition;
//! `selection` implements Kennard-Stone subset selection.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod selection;
pub mod spectrum;
pub mod telemetry;
pub mod utils;

pub use prelude::{CombineMode, SpectrumError, SpectrumResult, Trainable, Transform};
pub use spectrum::{Spectrum, SpectrumPoint};
