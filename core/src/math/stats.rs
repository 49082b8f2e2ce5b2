pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = samples.iter().map(|&v| f64::from(v)).sum();
        (sum / samples.len() as f64) as f32
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn stddev(samples: &[f32]) -> f32 {
        if samples.len() < 2 {
            return 0.0;
        }
        let mean = f64::from(Self::mean(samples));
        let sum_sq: f64 = samples
            .iter()
            .map(|&v| {
                let d = f64::from(v) - mean;
                d * d
            })
            .sum();
        (sum_sq / (samples.len() - 1) as f64).sqrt() as f32
    }

    pub fn min_max(samples: &[f32]) -> Option<(f32, f32)> {
        let first = *samples.first()?;
        Some(
            samples
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    pub fn euclidean(lhs: &[f32], rhs: &[f32]) -> f32 {
        lhs.iter()
            .zip(rhs)
            .map(|(&a, &b)| {
                let d = f64::from(a) - f64::from(b);
                d * d
            })
            .sum::<f64>()
            .sqrt() as f32
    }

    /// Least-squares fit of `y = intercept + slope * x`.
    ///
    /// Returns `(intercept, slope)`. Constant `x` gives a NaN slope.
    pub fn linear_regression(x: &[f32], y: &[f32]) -> (f32, f32) {
        let mean_x = f64::from(Self::mean(x));
        let mean_y = f64::from(Self::mean(y));
        let mut covariance = 0.0f64;
        let mut variance = 0.0f64;
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = f64::from(xi) - mean_x;
            covariance += dx * (f64::from(yi) - mean_y);
            variance += dx * dx;
        }
        let slope = covariance / variance;
        let intercept = mean_y - slope * mean_x;
        (intercept as f32, slope as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_stddev_of_empty_input_are_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
        assert_eq!(StatsHelper::stddev(&[]), 0.0);
    }

    #[test]
    fn stddev_uses_sample_denominator() {
        let sd = StatsHelper::stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138_09).abs() < 1e-4);
    }

    #[test]
    fn regression_recovers_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f32> = x.iter().map(|v| 0.5 + 2.0 * v).collect();
        let (intercept, slope) = StatsHelper::linear_regression(&x, &y);
        assert!((intercept - 0.5).abs() < 1e-5);
        assert!((slope - 2.0).abs() < 1e-5);
    }

    #[test]
    fn euclidean_distance() {
        assert_eq!(StatsHelper::euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(StatsHelper::min_max(&[3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(StatsHelper::min_max(&[]), None);
    }
}
