use crate::math::interpolation::{lagrange, linear};
use crate::prelude::{SpectrumError, SpectrumResult};
use crate::spectrum::{Spectrum, SpectrumPoint};
use crate::utils::search::{find_closest, find_enclosing, find_exact};
use serde::{Deserialize, Serialize};

/// Interpolation scheme for amplitude lookups between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Interpolation {
    Linear,
    /// Polynomial through the `order + 1` samples nearest the query.
    Lagrange { order: usize },
}

/// Amplitude at `wave_number` in sorted `points`.
///
/// Exact hits return the stored amplitude; queries outside the sampled
/// range return `None`.
pub fn interpolate(
    points: &[SpectrumPoint],
    wave_number: f32,
    method: Interpolation,
) -> Option<f32> {
    if let Some(index) = find_exact(points, wave_number) {
        return Some(points[index].amplitude());
    }

    let (left, right) = find_enclosing(points, wave_number);
    let (left, right) = (left?, right?);
    match method {
        Interpolation::Linear => Some(linear(
            wave_number,
            points[left].wave_number(),
            points[left].amplitude(),
            points[right].wave_number(),
            points[right].amplitude(),
        )),
        Interpolation::Lagrange { order } => {
            let count = (order + 1).min(points.len());
            let closest = find_closest(points, wave_number)?;
            let start = closest
                .saturating_sub(count / 2)
                .min(points.len() - count);
            let window = &points[start..start + count];
            let xs: Vec<f32> = window.iter().map(SpectrumPoint::wave_number).collect();
            let ys: Vec<f32> = window.iter().map(SpectrumPoint::amplitude).collect();
            Some(lagrange(&xs, &ys, wave_number))
        }
    }
}

/// Resolves the index range between two wave numbers that must be present.
fn resolve_range(
    points: &[SpectrumPoint],
    start: f32,
    end: f32,
) -> SpectrumResult<std::ops::RangeInclusive<usize>> {
    if points.is_empty() {
        return Err(SpectrumError::EmptySpectrum);
    }
    let from = find_exact(points, start).ok_or(SpectrumError::MissingWaveNumber(start))?;
    let to = find_exact(points, end).ok_or(SpectrumError::MissingWaveNumber(end))?;
    Ok(from.min(to)..=from.max(to))
}

/// Number of amplitude sign changes between the points at `start` and `end`.
///
/// Both wave numbers must exist in sorted `points`; zero amplitudes carry
/// no sign and are skipped.
pub fn count_sign_changes(points: &[SpectrumPoint], start: f32, end: f32) -> SpectrumResult<usize> {
    let range = resolve_range(points, start, end)?;
    let mut changes = 0;
    let mut previous: Option<bool> = None;
    for point in &points[range] {
        if point.amplitude() == 0.0 {
            continue;
        }
        let positive = point.amplitude() > 0.0;
        if previous.is_some_and(|sign| sign != positive) {
            changes += 1;
        }
        previous = Some(positive);
    }
    Ok(changes)
}

/// Number of maximal runs with amplitude above `threshold` between the
/// points at `start` and `end`, which must both exist in sorted `points`.
pub fn count_regions(
    points: &[SpectrumPoint],
    start: f32,
    end: f32,
    threshold: f32,
) -> SpectrumResult<usize> {
    let range = resolve_range(points, start, end)?;
    let mut regions = 0;
    let mut inside = false;
    for point in &points[range] {
        let above = point.amplitude() > threshold;
        if above && !inside {
            regions += 1;
        }
        inside = above;
    }
    Ok(regions)
}

/// Point-wise amplitude difference `a - b` (absolute when requested).
///
/// Both spectra must hold the same wave numbers in the same order.
pub fn diff(a: &Spectrum, b: &Spectrum, absolute: bool) -> SpectrumResult<Spectrum> {
    if a.len() != b.len() {
        return Err(SpectrumError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let points = a
        .points()
        .iter()
        .zip(b.points())
        .map(|(lhs, rhs)| {
            if lhs.wave_number() != rhs.wave_number() {
                return Err(SpectrumError::MissingWaveNumber(lhs.wave_number()));
            }
            let delta = lhs.amplitude() - rhs.amplitude();
            Ok(lhs.with_amplitude(if absolute { delta.abs() } else { delta }))
        })
        .collect::<SpectrumResult<Vec<_>>>()?;

    Ok(a.derive(points))
}
