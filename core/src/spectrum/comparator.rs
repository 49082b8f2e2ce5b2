use crate::spectrum::SpectrumPoint;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Total order over points by wave number.
///
/// The amplitude never takes part in the comparison, so two points with the
/// same wave number compare equal. That is the property lookups rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveNumberComparator {
    ascending: bool,
}

impl WaveNumberComparator {
    pub const fn ascending() -> Self {
        Self { ascending: true }
    }

    pub const fn descending() -> Self {
        Self { ascending: false }
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn compare(&self, lhs: &SpectrumPoint, rhs: &SpectrumPoint) -> Ordering {
        self.compare_wave_numbers(lhs.wave_number(), rhs.wave_number())
    }

    pub fn compare_wave_numbers(&self, lhs: f32, rhs: f32) -> Ordering {
        let ordering = lhs.total_cmp(&rhs);
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }

    /// Whether `points` is ordered according to this comparator.
    pub fn is_sorted(&self, points: &[SpectrumPoint]) -> bool {
        points
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != Ordering::Greater)
    }

    pub fn sort(&self, points: &mut [SpectrumPoint]) {
        points.sort_by(|lhs, rhs| self.compare(lhs, rhs));
    }
}

impl Default for WaveNumberComparator {
    fn default() -> Self {
        Self::ascending()
    }
}
