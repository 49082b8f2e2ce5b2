use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `(wave number, amplitude)` sample.
///
/// Points are plain values: transforms derive new points through
/// [`SpectrumPoint::with_amplitude`] instead of mutating shared ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    wave_number: f32,
    amplitude: f32,
}

impl SpectrumPoint {
    pub fn new(wave_number: f32, amplitude: f32) -> Self {
        Self {
            wave_number,
            amplitude,
        }
    }

    pub fn wave_number(&self) -> f32 {
        self.wave_number
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Copy of this point carrying a different amplitude.
    pub fn with_amplitude(&self, amplitude: f32) -> Self {
        Self {
            wave_number: self.wave_number,
            amplitude,
        }
    }

    /// Copy of this point moved to a different wave number.
    pub fn with_wave_number(&self, wave_number: f32) -> Self {
        Self {
            wave_number,
            amplitude: self.amplitude,
        }
    }
}

impl fmt::Display for SpectrumPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.wave_number, self.amplitude)
    }
}

impl From<(f32, f32)> for SpectrumPoint {
    fn from((wave_number, amplitude): (f32, f32)) -> Self {
        Self::new(wave_number, amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_amplitude_leaves_original_untouched() {
        let point = SpectrumPoint::new(1200.5, 0.25);
        let scaled = point.with_amplitude(0.5);
        assert_eq!(point.amplitude(), 0.25);
        assert_eq!(scaled.amplitude(), 0.5);
        assert_eq!(scaled.wave_number(), 1200.5);
    }
}
