//! Rosenbrock test function

use ndarray::Array1;

/// Rosenbrock function - N-dimensional
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-5, 10]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.windows(2)
        .into_iter()
        .map(|w| {
            let (xi, xi_plus_1) = (w[0], w[1]);
            100.0 * (xi_plus_1 - xi.powi(2)).powi(2) + (1.0 - xi).powi(2)
        })
        .sum()
}
