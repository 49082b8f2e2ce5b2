use crate::spectrum::{Report, SpectrumPoint, WaveNumberComparator};
use serde::{Deserialize, Serialize};

/// Identified sequence of spectral points plus its annotations.
///
/// Point order is whatever the producer appended; only operations that
/// both require and establish ascending order may assume it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    id: String,
    #[serde(default)]
    report: Report,
    points: Vec<SpectrumPoint>,
}

impl Spectrum {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            report: Report::new(),
            points: Vec::new(),
        }
    }

    pub fn with_points(id: impl Into<String>, points: Vec<SpectrumPoint>) -> Self {
        Self {
            id: id.into(),
            report: Report::new(),
            points,
        }
    }

    /// Builds a spectrum from parallel wave-number and amplitude slices.
    pub fn from_pairs(id: impl Into<String>, wave_numbers: &[f32], amplitudes: &[f32]) -> Self {
        let points = wave_numbers
            .iter()
            .zip(amplitudes)
            .map(|(&wave, &amplitude)| SpectrumPoint::new(wave, amplitude))
            .collect();
        Self::with_points(id, points)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SpectrumPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SpectrumPoint> {
        self.points.last()
    }

    pub fn push(&mut self, point: SpectrumPoint) {
        self.points.push(point);
    }

    pub fn extend<I: IntoIterator<Item = SpectrumPoint>>(&mut self, points: I) {
        self.points.extend(points);
    }

    /// Same identity and report, no points.
    pub fn header(&self) -> Spectrum {
        Spectrum {
            id: self.id.clone(),
            report: self.report.clone(),
            points: Vec::new(),
        }
    }

    /// Header of this spectrum holding `points` instead of its own.
    pub fn derive(&self, points: Vec<SpectrumPoint>) -> Spectrum {
        let mut derived = self.header();
        derived.points = points;
        derived
    }

    /// Copy of this spectrum with amplitudes replaced in order.
    ///
    /// `amplitudes` must hold one value per point.
    pub fn with_amplitudes(&self, amplitudes: &[f32]) -> Spectrum {
        let points = self
            .points
            .iter()
            .zip(amplitudes)
            .map(|(point, &amplitude)| point.with_amplitude(amplitude))
            .collect();
        self.derive(points)
    }

    pub fn wave_numbers(&self) -> Vec<f32> {
        self.points.iter().map(SpectrumPoint::wave_number).collect()
    }

    /// Numeric feature vector used by batch filters and subset selection.
    pub fn amplitudes(&self) -> Vec<f32> {
        self.points.iter().map(SpectrumPoint::amplitude).collect()
    }

    pub fn is_sorted(&self) -> bool {
        WaveNumberComparator::ascending().is_sorted(&self.points)
    }

    pub fn sort(&mut self) {
        WaveNumberComparator::ascending().sort(&mut self.points);
    }

    /// Sorted copy of this spectrum.
    pub fn sorted(&self) -> Spectrum {
        let mut sorted = self.clone();
        sorted.sort();
        sorted
    }
}
