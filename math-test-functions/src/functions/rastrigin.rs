//! Rastrigin test function

use ndarray::Array1;

/// Rastrigin function - N-dimensional, highly multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    a * x.len() as f64
        + x.iter()
            .map(|&xi| xi * xi - a * (2.0 * std::f64::consts::PI * xi).cos())
            .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_rastrigin_values() {
        assert_relative_eq!(rastrigin(&array![0.0, 0.0]), 0.0, epsilon = 1e-12);
        // integer points sit on local minima: cos term is 1
        assert_relative_eq!(rastrigin(&array![1.0, 0.0]), 1.0, epsilon = 1e-12);
    }
}
