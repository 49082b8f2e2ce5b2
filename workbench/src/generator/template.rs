/// Gaussian absorption band evaluated at `wave`.
pub fn gaussian_band(wave: f32, centre: f32, width: f32, height: f32) -> f32 {
    let z = (wave - centre) / width;
    height * (-0.5 * z * z).exp()
}
