use crate::math::stats::StatsHelper;
use crate::prelude::{SpectrumError, SpectrumResult};
use crate::spectrum::Spectrum;
use ndarray::{Array2, ArrayView2};

pub struct MatrixHelper;

impl MatrixHelper {
    pub fn multiply(lhs: ArrayView2<f64>, rhs: ArrayView2<f64>) -> Array2<f64> {
        lhs.dot(&rhs)
    }

    /// Gauss-Jordan inverse with partial pivoting; `None` when singular.
    pub fn invert(matrix: ArrayView2<f64>) -> Option<Array2<f64>> {
        let n = matrix.nrows();
        if n != matrix.ncols() {
            return None;
        }

        let mut work = matrix.to_owned();
        let mut inverse = Array2::<f64>::eye(n);
        for col in 0..n {
            let pivot = (col..n).max_by(|&a, &b| {
                work[[a, col]].abs().total_cmp(&work[[b, col]].abs())
            })?;
            if work[[pivot, col]].abs() < 1e-12 {
                return None;
            }
            if pivot != col {
                for k in 0..n {
                    work.swap([pivot, k], [col, k]);
                    inverse.swap([pivot, k], [col, k]);
                }
            }

            let scale = work[[col, col]];
            for k in 0..n {
                work[[col, k]] /= scale;
                inverse[[col, k]] /= scale;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = work[[row, col]];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    work[[row, k]] -= factor * work[[col, k]];
                    inverse[[row, k]] -= factor * inverse[[col, k]];
                }
            }
        }
        Some(inverse)
    }

    /// One row of amplitudes per spectrum; all spectra must be equally long.
    pub fn amplitude_matrix(spectra: &[Spectrum]) -> SpectrumResult<Array2<f32>> {
        let first = spectra
            .first()
            .ok_or_else(|| SpectrumError::InvalidInput("no spectra supplied".into()))?;
        let columns = first.len();
        let mut matrix = Array2::<f32>::zeros((spectra.len(), columns));
        for (row, spectrum) in spectra.iter().enumerate() {
            if spectrum.len() != columns {
                return Err(SpectrumError::LengthMismatch {
                    expected: columns,
                    actual: spectrum.len(),
                });
            }
            for (column, point) in spectrum.points().iter().enumerate() {
                matrix[[row, column]] = point.amplitude();
            }
        }
        Ok(matrix)
    }

    /// Euclidean distances between the rows of `rows`.
    ///
    /// Only the upper triangle (`i < j`) is filled; read entries as
    /// `d[[min(i, j), max(i, j)]]`.
    pub fn upper_distances(rows: ArrayView2<f32>) -> Array2<f32> {
        let n = rows.nrows();
        let mut distances = Array2::<f32>::zeros((n, n));
        for i in 0..n {
            let lhs = rows.row(i);
            for j in (i + 1)..n {
                let rhs = rows.row(j);
                distances[[i, j]] = match (lhs.as_slice(), rhs.as_slice()) {
                    (Some(a), Some(b)) => StatsHelper::euclidean(a, b),
                    _ => lhs
                        .iter()
                        .zip(rhs.iter())
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum::<f32>()
                        .sqrt(),
                };
            }
        }
        distances
    }
}
