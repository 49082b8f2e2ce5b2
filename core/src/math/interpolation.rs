/// Linear interpolation of `y` at `x` on the line through `(x0, y0)` and `(x1, y1)`.
///
/// Coincident abscissae return `y0`.
pub fn linear(x: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Lagrange polynomial through `(xs[i], ys[i])`, evaluated at `x`.
///
/// Both slices must have the same, non-zero length and distinct `xs`.
pub fn lagrange(xs: &[f32], ys: &[f32], x: f32) -> f32 {
    let x = f64::from(x);
    let mut result = 0.0f64;
    for (i, (&xi, &yi)) in xs.iter().zip(ys).enumerate() {
        let xi = f64::from(xi);
        let mut term = f64::from(yi);
        for (j, &xj) in xs.iter().enumerate() {
            if i != j {
                let xj = f64::from(xj);
                term *= (x - xj) / (xi - xj);
            }
        }
        result += term;
    }
    result as f32
}
