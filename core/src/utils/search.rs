//! Binary-search lookups over points sorted ascending by wave number.
//!
//! Misses are reported as `None`; absent wave numbers are an expected
//! outcome, not an error.

use crate::spectrum::{SpectrumPoint, WaveNumberComparator};
use std::cmp::Ordering;

/// Order every lookup in this module searches by.
pub const SEARCH_ORDER: WaveNumberComparator = WaveNumberComparator::ascending();

fn search(points: &[SpectrumPoint], wave_number: f32) -> Result<usize, usize> {
    points.binary_search_by(|point| {
        SEARCH_ORDER.compare_wave_numbers(point.wave_number(), wave_number)
    })
}

/// Index of the point with exactly `wave_number`.
pub fn find_exact(points: &[SpectrumPoint], wave_number: f32) -> Option<usize> {
    search(points, wave_number).ok()
}

/// Position `wave_number` would be inserted at to keep `points` sorted.
///
/// `Ok` carries the index of an exact hit.
pub fn insertion_point(points: &[SpectrumPoint], wave_number: f32) -> Result<usize, usize> {
    search(points, wave_number)
}

/// Index of the point nearest to `wave_number`; `None` only for empty input.
///
/// A miss is refined by scanning the two neighbours either side of the
/// insertion point. Equal distances resolve to the lower index.
pub fn find_closest(points: &[SpectrumPoint], wave_number: f32) -> Option<usize> {
    if points.is_empty() {
        return None;
    }

    let insertion = match search(points, wave_number) {
        Ok(index) => return Some(index),
        Err(insertion) => insertion.min(points.len() - 1),
    };

    let low = insertion.saturating_sub(2);
    let high = (insertion + 2).min(points.len() - 1);
    let mut best = low;
    let mut best_distance = (points[low].wave_number() - wave_number).abs();
    for (index, point) in points.iter().enumerate().take(high + 1).skip(low + 1) {
        let distance = (point.wave_number() - wave_number).abs();
        if distance.partial_cmp(&best_distance) == Some(Ordering::Less) {
            best = index;
            best_distance = distance;
        }
    }
    Some(best)
}

/// Indices of the points to the left and right of `wave_number`.
///
/// An exact hit is its own left bound. Either side is `None` when the
/// query lies outside the covered range; both are `None` for empty input.
pub fn find_enclosing(
    points: &[SpectrumPoint],
    wave_number: f32,
) -> (Option<usize>, Option<usize>) {
    let Some(closest) = find_closest(points, wave_number) else {
        return (None, None);
    };

    if points[closest].wave_number() <= wave_number {
        let right = closest + 1;
        (Some(closest), (right < points.len()).then_some(right))
    } else {
        (closest.checked_sub(1), Some(closest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn points(waves: &[f32]) -> Vec<SpectrumPoint> {
        waves
            .iter()
            .map(|&wave| SpectrumPoint::new(wave, wave * 10.0))
            .collect()
    }

    fn random_sorted(rng: &mut StdRng, len: usize) -> Vec<SpectrumPoint> {
        let mut wave = rng.gen_range(0.0..10.0f32);
        (0..len)
            .map(|_| {
                wave += rng.gen_range(0.1..5.0f32);
                SpectrumPoint::new(wave, rng.gen_range(-1.0..1.0f32))
            })
            .collect()
    }

    #[test]
    fn find_exact_returns_index_of_every_point() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..40 {
            let data = random_sorted(&mut rng, len);
            for (index, point) in data.iter().enumerate() {
                assert_eq!(find_exact(&data, point.wave_number()), Some(index));
            }
        }
    }

    #[test]
    fn find_exact_misses_return_none() {
        let data = points(&[1.0, 2.0, 3.0]);
        assert_eq!(find_exact(&data, 2.5), None);
        assert_eq!(find_exact(&data, 0.0), None);
        assert_eq!(find_exact(&[], 1.0), None);
    }

    #[test]
    fn find_closest_matches_brute_force_nearest_neighbour() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.gen_range(1..30);
            let data = random_sorted(&mut rng, len);
            let span = data[len - 1].wave_number() + 10.0;
            for _ in 0..20 {
                let query = rng.gen_range(-5.0..span);
                let mut expected = 0;
                for index in 1..len {
                    let distance = (data[index].wave_number() - query).abs();
                    if distance < (data[expected].wave_number() - query).abs() {
                        expected = index;
                    }
                }
                assert_eq!(find_closest(&data, query), Some(expected), "query {}", query);
            }
        }
    }

    #[test]
    fn find_closest_on_empty_input_is_none() {
        assert_eq!(find_closest(&[], 3.0), None);
    }

    #[test]
    fn find_closest_ties_resolve_to_lower_index() {
        let data = points(&[1.0, 3.0]);
        assert_eq!(find_closest(&data, 2.0), Some(0));
    }

    #[test]
    fn find_enclosing_handles_interior_and_boundaries() {
        let data = points(&[1.0, 2.0, 3.0]);
        assert_eq!(find_enclosing(&data, 1.4), (Some(0), Some(1)));
        assert_eq!(find_enclosing(&data, 1.6), (Some(0), Some(1)));
        assert_eq!(find_enclosing(&data, 2.0), (Some(1), Some(2)));
        assert_eq!(find_enclosing(&data, 0.5), (None, Some(0)));
        assert_eq!(find_enclosing(&data, 3.5), (Some(2), None));
        assert_eq!(find_enclosing(&data, 3.0), (Some(2), None));
        assert_eq!(find_enclosing(&[], 3.0), (None, None));
    }
}
