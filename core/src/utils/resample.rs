use crate::math::interpolation::linear;
use crate::prelude::{SpectrumError, SpectrumResult};
use crate::spectrum::{Spectrum, SpectrumPoint};
use crate::utils::search::insertion_point;

/// Resamples `data` onto evenly spaced wave numbers.
///
/// `target_count` of `None` keeps the input length, as does a count above
/// the input length unless `allow_oversampling` is set. The first and last
/// points are copied unchanged; interior points are interpolated linearly.
/// A target that lands exactly on an input point is averaged with the
/// interpolation of its output neighbours so it does not stand out.
/// With `offset`, wave numbers are replaced by `offset + 1, offset + 2, ...`.
///
/// A target count below 2 cannot hold both endpoints, so it is treated like
/// `None` and the input comes back at full length. Inputs with a single
/// point are returned unchanged for the same reason.
pub fn resample(
    data: &Spectrum,
    target_count: Option<usize>,
    allow_oversampling: bool,
    offset: Option<u32>,
) -> SpectrumResult<Spectrum> {
    if data.is_empty() {
        return Err(SpectrumError::EmptySpectrum);
    }
    if !data.is_sorted() {
        return Err(SpectrumError::UnsortedInput);
    }

    let points = data.points();
    let len = points.len();
    let count = match target_count {
        Some(count) if allow_oversampling || count <= len => count,
        _ => len,
    };
    if len < 2 || count < 2 {
        return Ok(reindex(data.clone(), offset));
    }

    let first = points[0];
    let last = points[len - 1];
    let spacing = (last.wave_number() - first.wave_number()) / (count - 1) as f32;

    let mut output = Vec::with_capacity(count);
    let mut exact_hits = Vec::new();
    output.push(first);
    for i in 1..count - 1 {
        let wave = first.wave_number() + i as f32 * spacing;
        match insertion_point(points, wave) {
            Ok(index) => {
                exact_hits.push(output.len());
                output.push(points[index]);
            }
            Err(insertion) => {
                let right = insertion.clamp(1, len - 1);
                let left = points[right - 1];
                let right = points[right];
                let amplitude = linear(
                    wave,
                    left.wave_number(),
                    left.amplitude(),
                    right.wave_number(),
                    right.amplitude(),
                );
                output.push(SpectrumPoint::new(wave, amplitude));
            }
        }
    }
    output.push(last);

    for position in exact_hits {
        let left = output[position - 1];
        let right = output.get(position + 1).copied().unwrap_or(output[position]);
        let current = output[position];
        let interpolated = linear(
            current.wave_number(),
            left.wave_number(),
            left.amplitude(),
            right.wave_number(),
            right.amplitude(),
        );
        output[position] = current.with_amplitude((interpolated + current.amplitude()) / 2.0);
    }

    Ok(reindex(data.derive(output), offset))
}

fn reindex(spectrum: Spectrum, offset: Option<u32>) -> Spectrum {
    let Some(offset) = offset else {
        return spectrum;
    };
    let points = spectrum
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| point.with_wave_number((offset as usize + i + 1) as f32))
        .collect();
    spectrum.derive(points)
}
