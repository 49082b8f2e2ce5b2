use crate::generator::template::gaussian_band;
use anyhow::ensure;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use spectracore::{Spectrum, SpectrumPoint};

/// Configuration for generating a synthetic population of spectra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub points: usize,
    pub start_wave: f32,
    pub end_wave: f32,
    pub bands: usize,
    /// Largest relative deviation of the multiplicative scatter gain.
    pub scatter: f32,
    /// Largest additive baseline offset.
    pub baseline: f32,
    pub noise: f32,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 40,
            points: 256,
            start_wave: 4000.0,
            end_wave: 10000.0,
            bands: 4,
            scatter: 0.2,
            baseline: 0.05,
            noise: 0.005,
            seed: 0,
        }
    }
}

struct Band {
    centre: f32,
    width: f32,
    height: f32,
}

fn spacing(config: &GeneratorConfig) -> f32 {
    (config.end_wave - config.start_wave) / (config.points.max(2) - 1) as f32
}

/// Builds `config.count` spectra sharing band positions but differing in
/// band heights, scatter gain, baseline offset and noise.
pub fn build_population(config: &GeneratorConfig) -> anyhow::Result<Vec<Spectrum>> {
    ensure!(config.points >= 2, "generator needs at least 2 points per spectrum");
    ensure!(
        config.end_wave > config.start_wave,
        "generator wave range {}..{} is empty",
        config.start_wave,
        config.end_wave
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let span = config.end_wave - config.start_wave;
    let bands: Vec<Band> = (0..config.bands)
        .map(|_| Band {
            centre: config.start_wave + rng.gen_range(0.1..0.9) * span,
            width: rng.gen_range(0.01..0.05) * span,
            height: rng.gen_range(0.2..1.0),
        })
        .collect();

    let step = spacing(config);
    let mut population = Vec::with_capacity(config.count);
    for index in 0..config.count {
        let gain = 1.0 + rng.gen_range(-1.0..=1.0) * config.scatter;
        let offset = rng.gen_range(0.0..=1.0) * config.baseline;
        let heights: Vec<f32> = bands
            .iter()
            .map(|band| band.height * rng.gen_range(0.5..1.5))
            .collect();

        let mut points = Vec::with_capacity(config.points);
        for i in 0..config.points {
            let wave = config.start_wave + i as f32 * step;
            let signal: f32 = bands
                .iter()
                .zip(&heights)
                .map(|(band, &height)| gaussian_band(wave, band.centre, band.width, height))
                .sum();
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            points.push(SpectrumPoint::new(wave, offset + gain * signal + jitter));
        }

        let mut spectrum = Spectrum::with_points(format!("sample-{:04}", index), points);
        let report = spectrum.report_mut();
        report.set("synthetic", true);
        report.set("scatter_gain", f64::from(gain));
        report.set("baseline", f64::from(offset));
        population.push(spectrum);
    }

    Ok(population)
}
