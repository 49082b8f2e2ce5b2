use crate::prelude::SpectrumError;
use crate::spectrum::{Spectrum, SpectrumPoint};
use crate::utils::algebra::minus;
use crate::utils::search::find_exact;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How wave numbers missing from a target spectrum are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapFilling {
    /// Leave gaps open.
    #[default]
    Nothing,
    /// Insert zero amplitudes.
    Zero,
    /// Copy the reference amplitude.
    Original,
    /// Ramp linearly between the amplitudes bordering each gap.
    Connect,
}

impl fmt::Display for GapFilling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GapFilling::Nothing => "nothing",
            GapFilling::Zero => "zero",
            GapFilling::Original => "original",
            GapFilling::Connect => "connect",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GapFilling {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nothing" => Ok(GapFilling::Nothing),
            "zero" => Ok(GapFilling::Zero),
            "original" => Ok(GapFilling::Original),
            "connect" => Ok(GapFilling::Connect),
            other => Err(SpectrumError::UnhandledVariant(format!(
                "gap filling '{}'",
                other
            ))),
        }
    }
}

/// Copy of `target` with a point added for every wave number of
/// `reference` that `target` lacks.
///
/// Added points are appended after the target's own points.
pub fn fill_gaps(target: &Spectrum, reference: &Spectrum, strategy: GapFilling) -> Spectrum {
    let mut result = target.clone();
    match strategy {
        GapFilling::Nothing => {}
        GapFilling::Zero => {
            let missing = minus(reference, target);
            result.extend(missing.points().iter().map(|point| point.with_amplitude(0.0)));
        }
        GapFilling::Original => {
            let missing = minus(reference, target);
            result.extend(missing.points().iter().copied());
        }
        GapFilling::Connect => {
            result.extend(connect_gaps(target, reference));
        }
    }
    result
}

/// Ramped points for each run of reference wave numbers absent from
/// `target`. A run touching either end of `reference` ramps from or to 0.
/// Ramp steps are rounded to whole numbers with halves rounded up, so a
/// descending half step lands on the higher value.
fn connect_gaps(target: &Spectrum, reference: &Spectrum) -> Vec<SpectrumPoint> {
    let known = target.sorted();
    let amplitude_in_target = |wave_number: f32| {
        find_exact(known.points(), wave_number).map(|index| known.points()[index].amplitude())
    };

    let points = reference.points();
    let mut added = Vec::new();
    let mut index = 0;
    while index < points.len() {
        if amplitude_in_target(points[index].wave_number()).is_some() {
            index += 1;
            continue;
        }

        let first = index;
        while index < points.len() && amplitude_in_target(points[index].wave_number()).is_none() {
            index += 1;
        }
        let run = &points[first..index];

        let start = match first.checked_sub(1) {
            Some(anchor) => amplitude_in_target(points[anchor].wave_number()).unwrap_or(0.0),
            None => 0.0,
        };
        let end = points
            .get(index)
            .and_then(|point| amplitude_in_target(point.wave_number()))
            .unwrap_or(0.0);
        let delta = (end - start) / (run.len() + 1) as f32;

        added.extend(run.iter().enumerate().map(|(offset, point)| {
            let step = (offset + 1) as f32;
            point.with_amplitude(start + (step * delta + 0.5).floor())
        }));
    }
    added
}
