use crate::math::matrix::MatrixHelper;
use crate::prelude::{SpectrumError, SpectrumResult, Transform};
use crate::processing::PassThrough;
use crate::spectrum::Spectrum;
use crate::telemetry::log::LogManager;
use ndarray::Array2;

/// Subset size meaning "keep every spectrum, skip selection".
pub const SUBSET_ALL: i64 = -1;

/// Kennard-Stone max-min subset selection.
///
/// Spectra are prefiltered one by one, compared by Euclidean distance of
/// their amplitude vectors, and picked greedily: first the farthest pair,
/// then repeatedly the candidate whose nearest chosen spectrum is farthest
/// away. Ties go to the lower index.
pub struct KennardStone {
    prefilter: Box<dyn Transform>,
    subset_size: i64,
    invert: bool,
    logger: LogManager,
}

impl KennardStone {
    pub fn new(subset_size: i64, invert: bool) -> Self {
        Self {
            prefilter: Box::new(PassThrough),
            subset_size,
            invert,
            logger: LogManager::new("kennard_stone"),
        }
    }

    pub fn with_prefilter(mut self, prefilter: Box<dyn Transform>) -> Self {
        self.prefilter = prefilter;
        self
    }

    pub fn subset_size(&self) -> i64 {
        self.subset_size
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Chosen spectra (or their complement when inverted), in input order.
    pub fn select(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<Spectrum>> {
        if self.subset_size == SUBSET_ALL {
            return Ok(spectra.to_vec());
        }

        let mut chosen = vec![false; spectra.len()];
        for index in self.select_indices(spectra)? {
            chosen[index] = true;
        }
        Ok(spectra
            .iter()
            .zip(chosen)
            .filter(|(_, picked)| *picked != self.invert)
            .map(|(spectrum, _)| spectrum.clone())
            .collect())
    }

    /// Indices of the chosen spectra in the order they were picked.
    pub fn select_indices(&mut self, spectra: &[Spectrum]) -> SpectrumResult<Vec<usize>> {
        if self.subset_size == SUBSET_ALL {
            return Ok((0..spectra.len()).collect());
        }
        let size = usize::try_from(self.subset_size).map_err(|_| {
            SpectrumError::InvalidInput(format!("subset size {} is negative", self.subset_size))
        })?;
        if size > spectra.len() {
            return Err(SpectrumError::InvalidInput(format!(
                "subset size {} exceeds population of {}",
                size,
                spectra.len()
            )));
        }
        if size == 0 {
            return Ok(Vec::new());
        }

        let prefiltered = spectra
            .iter()
            .map(|spectrum| self.prefilter.process(spectrum))
            .collect::<SpectrumResult<Vec<_>>>();
        self.prefilter.cleanup();
        let features = MatrixHelper::amplitude_matrix(&prefiltered?)?;
        let distances = MatrixHelper::upper_distances(features.view());

        let picked = greedy_max_min(&distances, size);
        self.logger.record(&format!(
            "selected {} of {} spectra",
            picked.len(),
            spectra.len()
        ));
        Ok(picked)
    }
}

fn distance(distances: &Array2<f32>, a: usize, b: usize) -> f32 {
    distances[[a.min(b), a.max(b)]]
}

fn greedy_max_min(distances: &Array2<f32>, size: usize) -> Vec<usize> {
    let count = distances.nrows();
    if count < 2 {
        return (0..count.min(size)).collect();
    }

    let mut seed = (0, 1);
    for i in 0..count {
        for j in (i + 1)..count {
            if distances[[i, j]] > distances[[seed.0, seed.1]] {
                seed = (i, j);
            }
        }
    }

    let mut picked = vec![seed.0, seed.1];
    picked.truncate(size);
    let mut available = vec![true; count];
    for &index in &picked {
        available[index] = false;
    }

    while picked.len() < size {
        let mut best: Option<(usize, f32)> = None;
        for candidate in (0..count).filter(|&c| available[c]) {
            let nearest = picked
                .iter()
                .map(|&chosen| distance(distances, candidate, chosen))
                .fold(f32::INFINITY, f32::min);
            if best.map_or(true, |(_, score)| nearest > score) {
                best = Some((candidate, nearest));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        available[next] = false;
        picked.push(next);
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{RangeScale, RangeScaleConfig};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scalar_spectra(values: &[f32]) -> Vec<Spectrum> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Spectrum::from_pairs(format!("s{}", i), &[1.0], &[v]))
            .collect()
    }

    fn ids(spectra: &[Spectrum]) -> Vec<&str> {
        spectra.iter().map(Spectrum::id).collect()
    }

    #[test]
    fn picks_globally_farthest_pair_first() {
        let spectra = scalar_spectra(&[0.0, 1.0, 5.0, 10.0]);
        let mut selector = KennardStone::new(2, false);
        assert_eq!(ids(&selector.select(&spectra).unwrap()), vec!["s0", "s3"]);
    }

    #[test]
    fn greedy_step_maximises_distance_to_nearest_chosen() {
        let spectra = scalar_spectra(&[0.0, 1.0, 5.0, 10.0]);
        let mut selector = KennardStone::new(3, false);
        assert_eq!(selector.select_indices(&spectra).unwrap(), vec![0, 3, 2]);
    }

    #[test]
    fn inverted_selection_is_the_complement() {
        let spectra = scalar_spectra(&[0.0, 1.0, 5.0, 10.0]);
        let mut selector = KennardStone::new(2, true);
        assert_eq!(ids(&selector.select(&spectra).unwrap()), vec!["s1", "s2"]);
    }

    #[test]
    fn sentinel_returns_everything() {
        let spectra = scalar_spectra(&[3.0, 1.0, 2.0]);
        for invert in [false, true] {
            let mut selector = KennardStone::new(SUBSET_ALL, invert);
            assert_eq!(selector.select(&spectra).unwrap(), spectra);
        }
    }

    #[test]
    fn rejects_invalid_sizes() {
        let spectra = scalar_spectra(&[0.0, 1.0]);
        assert!(KennardStone::new(3, false).select(&spectra).is_err());
        assert!(KennardStone::new(-2, false).select(&spectra).is_err());
        assert!(KennardStone::new(0, false).select(&spectra).unwrap().is_empty());
        assert_eq!(KennardStone::new(1, false).select(&spectra).unwrap().len(), 1);
    }

    #[test]
    fn unequal_lengths_after_prefilter_fail() {
        let spectra = vec![
            Spectrum::from_pairs("a", &[1.0, 2.0], &[0.0, 1.0]),
            Spectrum::from_pairs("b", &[1.0], &[0.0]),
        ];
        assert!(matches!(
            KennardStone::new(1, false).select(&spectra),
            Err(SpectrumError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn prefilter_shapes_distances_but_originals_are_returned() {
        let spectra = vec![
            Spectrum::from_pairs("a", &[1.0, 2.0], &[0.0, 1.0]),
            Spectrum::from_pairs("b", &[1.0, 2.0], &[0.0, 100.0]),
            Spectrum::from_pairs("c", &[1.0, 2.0], &[1.0, 0.0]),
        ];
        let mut selector = KennardStone::new(2, false)
            .with_prefilter(Box::new(RangeScale::new(RangeScaleConfig::default())));
        let selected = selector.select(&spectra).unwrap();
        assert_eq!(ids(&selected), vec!["a", "c"]);
        assert_eq!(selected[0], spectra[0]);
    }

    #[test]
    fn subset_and_complement_partition_random_populations() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let count = rng.gen_range(2..12);
            let spectra: Vec<Spectrum> = (0..count)
                .map(|i| {
                    let amps: Vec<f32> = (0..5).map(|_| rng.gen_range(-1.0..1.0)).collect();
                    Spectrum::from_pairs(format!("s{}", i), &[1.0, 2.0, 3.0, 4.0, 5.0], &amps)
                })
                .collect();
            let size = rng.gen_range(0..=count);

            let subset = KennardStone::new(size as i64, false).select(&spectra).unwrap();
            let complement = KennardStone::new(size as i64, true).select(&spectra).unwrap();
            assert_eq!(subset.len(), size);
            assert_eq!(subset.len() + complement.len(), count);
            for spectrum in &subset {
                assert!(!complement.contains(spectrum));
            }
        }
    }
}
