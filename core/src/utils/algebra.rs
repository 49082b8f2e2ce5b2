//! Set operations over spectra keyed by wave number.
//!
//! Results are always built on the header of the first operand so its
//! identity and report survive.

use crate::spectrum::{Spectrum, SpectrumPoint};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Sorted wave numbers of a spectrum, for membership tests that do not
/// depend on the spectrum's own point order.
struct WaveIndex {
    waves: Vec<f32>,
}

impl WaveIndex {
    fn new(spectrum: &Spectrum) -> Self {
        let mut waves = spectrum.wave_numbers();
        waves.sort_by(f32::total_cmp);
        Self { waves }
    }

    fn contains(&self, wave_number: f32) -> bool {
        self.waves
            .binary_search_by(|wave| wave.total_cmp(&wave_number))
            .is_ok()
    }
}

/// All points of `a`, then the points of `b` whose wave number `a` lacks.
pub fn union(a: &Spectrum, b: &Spectrum) -> Spectrum {
    let index = WaveIndex::new(a);
    let mut result = a.clone();
    result.extend(
        b.points()
            .iter()
            .filter(|point| !index.contains(point.wave_number()))
            .copied(),
    );
    result
}

/// Points of `a` whose wave number is absent from `b`.
pub fn minus(a: &Spectrum, b: &Spectrum) -> Spectrum {
    let index = WaveIndex::new(b);
    let points = a
        .points()
        .iter()
        .filter(|point| !index.contains(point.wave_number()))
        .copied()
        .collect();
    a.derive(points)
}

/// Points of `a` whose wave number is present in `b`.
pub fn intersect(a: &Spectrum, b: &Spectrum) -> Spectrum {
    let index = WaveIndex::new(b);
    let points = a
        .points()
        .iter()
        .filter(|point| index.contains(point.wave_number()))
        .copied()
        .collect();
    a.derive(points)
}

/// Maximal runs of consecutive points of `a` (in `a`'s order) that are
/// missing from `b`, each as its own header-based spectrum.
pub fn missing_regions(a: &Spectrum, b: &Spectrum) -> Vec<Spectrum> {
    let index = WaveIndex::new(b);
    let mut regions = Vec::new();
    let mut current: Vec<SpectrumPoint> = Vec::new();

    for point in a.points() {
        if index.contains(point.wave_number()) {
            if !current.is_empty() {
                regions.push(a.derive(std::mem::take(&mut current)));
            }
        } else {
            current.push(*point);
        }
    }
    if !current.is_empty() {
        regions.push(a.derive(current));
    }

    regions
}

/// Pools the points of all spectra by wave number.
///
/// The first spectrum to contribute a wave number keeps it. Output uses
/// the header of the first spectrum and lists pooled points ascending.
/// An empty list yields `None`; a single spectrum is returned as is.
pub fn merge(spectra: Vec<Spectrum>) -> Option<Spectrum> {
    let mut spectra = spectra.into_iter();
    let first = spectra.next()?;
    let others: Vec<Spectrum> = spectra.collect();
    if others.is_empty() {
        return Some(first);
    }

    let mut pool: BTreeMap<OrderedFloat<f32>, SpectrumPoint> = BTreeMap::new();
    for spectrum in std::iter::once(&first).chain(others.iter()) {
        for point in spectrum.points() {
            pool.entry(OrderedFloat(point.wave_number()))
                .or_insert(*point);
        }
    }

    Some(first.derive(pool.into_values().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    fn spectrum(id: &str, waves: &[f32]) -> Spectrum {
        let amplitudes: Vec<f32> = waves.iter().map(|w| w * 2.0).collect();
        Spectrum::from_pairs(id, waves, &amplitudes)
    }

    fn wave_set(spectrum: &Spectrum) -> BTreeSet<OrderedFloat<f32>> {
        spectrum.points().iter().map(|p| OrderedFloat(p.wave_number())).collect()
    }

    fn random_spectrum(rng: &mut StdRng, id: &str) -> Spectrum {
        let mut waves: Vec<f32> = (0..rng.gen_range(0..15))
            .map(|_| rng.gen_range(0..30) as f32)
            .collect();
        waves.sort_by(f32::total_cmp);
        waves.dedup();
        spectrum(id, &waves)
    }

    #[test]
    fn union_appends_unmatched_points_in_order() {
        let a = spectrum("a", &[1.0, 3.0]);
        let b = spectrum("b", &[4.0, 3.0, 2.0]);
        let result = union(&a, &b);
        assert_eq!(result.id(), "a");
        assert_eq!(result.wave_numbers(), vec![1.0, 3.0, 4.0, 2.0]);
    }

    #[test]
    fn minus_and_intersect_partition_a() {
        let a = spectrum("a", &[1.0, 2.0, 3.0, 4.0]);
        let b = spectrum("b", &[2.0, 4.0]);
        assert_eq!(minus(&a, &b).wave_numbers(), vec![1.0, 3.0]);
        assert_eq!(intersect(&a, &b).wave_numbers(), vec![2.0, 4.0]);
    }

    #[test]
    fn set_algebra_laws_hold_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let a = random_spectrum(&mut rng, "a");
            let b = random_spectrum(&mut rng, "b");

            let united = union(&a, &b);
            assert!(united.len() <= a.len() + b.len());
            let united_waves = wave_set(&united);
            assert!(wave_set(&a).is_subset(&united_waves));
            assert!(wave_set(&b).is_subset(&united_waves));
            assert_eq!(united_waves.len(), united.len());

            let common = intersect(&a, &b);
            assert!(wave_set(&common).is_subset(&wave_set(&a)));
            assert!(wave_set(&common).is_subset(&wave_set(&b)));

            assert_eq!(
                wave_set(&minus(&a, &common)),
                wave_set(&minus(&a, &b))
            );
        }
    }

    #[test]
    fn missing_regions_splits_on_shared_points() {
        let a = spectrum("a", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = spectrum("b", &[3.0, 4.0]);
        let regions = missing_regions(&a, &b);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].wave_numbers(), vec![1.0, 2.0]);
        assert_eq!(regions[1].wave_numbers(), vec![5.0, 6.0]);
        assert!(regions.iter().all(|r| r.id() == "a"));
    }

    #[test]
    fn missing_regions_is_empty_when_nothing_is_missing() {
        let a = spectrum("a", &[1.0, 2.0]);
        assert!(missing_regions(&a, &a).is_empty());
    }

    #[test]
    fn merge_keeps_first_writer() {
        let a = Spectrum::from_pairs("a", &[1.0, 2.0], &[10.0, 20.0]);
        let b = Spectrum::from_pairs("b", &[2.0, 3.0], &[99.0, 30.0]);

        let merged = merge(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(merged.id(), "a");
        assert_eq!(merged.wave_numbers(), vec![1.0, 2.0, 3.0]);
        assert_eq!(merged.amplitudes(), vec![10.0, 20.0, 30.0]);

        let reversed = merge(vec![b, a]).unwrap();
        assert_eq!(reversed.id(), "b");
        assert_eq!(reversed.amplitudes(), vec![10.0, 99.0, 30.0]);
    }

    #[test]
    fn merge_special_cases() {
        assert!(merge(Vec::new()).is_none());
        let single = Spectrum::from_pairs("s", &[2.0, 1.0], &[1.0, 2.0]);
        let merged = merge(vec![single.clone()]).unwrap();
        assert_eq!(merged, single);
    }
}
