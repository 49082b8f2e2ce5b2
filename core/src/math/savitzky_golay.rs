use crate::math::matrix::MatrixHelper;
use crate::prelude::{SpectrumError, SpectrumResult};
use ndarray::Array2;

/// Convolution weights for a Savitzky-Golay window spanning `left` points
/// before and `right` points after the centre.
///
/// `derivative` 0 smooths; higher orders differentiate with unit spacing.
pub fn coefficients(
    left: usize,
    right: usize,
    polynomial: usize,
    derivative: usize,
) -> SpectrumResult<Vec<f32>> {
    let window = left + right + 1;
    if polynomial >= window {
        return Err(SpectrumError::InvalidInput(format!(
            "polynomial order {} needs a window wider than {}",
            polynomial, window
        )));
    }
    if derivative > polynomial {
        return Err(SpectrumError::InvalidInput(format!(
            "derivative order {} exceeds polynomial order {}",
            derivative, polynomial
        )));
    }

    let design = Array2::from_shape_fn((window, polynomial + 1), |(row, power)| {
        let offset = row as f64 - left as f64;
        offset.powi(power as i32)
    });
    let normal = MatrixHelper::multiply(design.t(), design.view());
    let inverse = MatrixHelper::invert(normal.view()).ok_or_else(|| {
        SpectrumError::InvalidInput("singular Savitzky-Golay design matrix".into())
    })?;
    let projection = MatrixHelper::multiply(inverse.view(), design.t());

    let factorial: f64 = (1..=derivative).map(|k| k as f64).product();
    Ok(projection
        .row(derivative)
        .iter()
        .map(|&weight| (weight * factorial) as f32)
        .collect())
}
