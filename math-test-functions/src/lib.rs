#![doc = include_str!("../README.md")]

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Objective signature shared by every benchmark in this crate
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function: its search domain and known optimum
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Scalar (lower, upper) domain applied to every dimension
    pub bounds: (f64, f64),
    /// Coordinate of the global minimum, repeated in every dimension
    pub minimum_coordinate: f64,
    /// Value at the global minimum
    pub minimum_value: f64,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// The function itself
    pub function: TestFunction,
}

impl FunctionMetadata {
    /// Location of the global minimum in `dim` dimensions
    pub fn global_minimum(&self, dim: usize) -> Array1<f64> {
        Array1::from_elem(dim, self.minimum_coordinate)
    }

    /// Per-dimension bounds for a problem of dimension `dim`
    pub fn bounds_vec(&self, dim: usize) -> Vec<(f64, f64)> {
        vec![self.bounds; dim]
    }
}

/// Get metadata for all available test functions, keyed by name
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    metadata.insert(
        "rastrigin".to_string(),
        FunctionMetadata {
            name: "rastrigin".to_string(),
            bounds: (-5.12, 5.12),
            minimum_coordinate: 0.0,
            minimum_value: 0.0,
            description: "Rastrigin function with a regular lattice of local minima".to_string(),
            multimodal: true,
            function: rastrigin,
        },
    );

    metadata.insert(
        "rosenbrock".to_string(),
        FunctionMetadata {
            name: "rosenbrock".to_string(),
            bounds: (-5.0, 10.0),
            minimum_coordinate: 1.0,
            minimum_value: 0.0,
            description: "Rosenbrock banana valley, unimodal but badly conditioned".to_string(),
            multimodal: false,
            function: rosenbrock,
        },
    );

    metadata.insert(
        "schwefel".to_string(),
        FunctionMetadata {
            name: "schwefel".to_string(),
            bounds: (-500.0, 500.0),
            minimum_coordinate: 420.9687,
            minimum_value: 0.0,
            description: "Schwefel function, best minimum far from the second best".to_string(),
            multimodal: true,
            function: schwefel,
        },
    );

    metadata.insert(
        "sphere".to_string(),
        FunctionMetadata {
            name: "sphere".to_string(),
            bounds: (-5.12, 5.12),
            minimum_coordinate: 0.0,
            minimum_value: 0.0,
            description: "Sum of squares, convex and separable".to_string(),
            multimodal: false,
            function: sphere,
        },
    );

    metadata
}

/// Look up a test function by name
pub fn get_function(function_name: &str) -> Option<TestFunction> {
    get_function_metadata()
        .get(function_name)
        .map(|meta| meta.function)
}

/// Sorted list of the registered function names
pub fn function_names() -> Vec<String> {
    let mut names: Vec<String> = get_function_metadata().into_keys().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_function_minima() {
        let loose_tolerance = 1e-3;
        for (name, meta) in get_function_metadata() {
            for dim in [2usize, 5, 10] {
                let x = meta.global_minimum(dim);
                let (lower, upper) = meta.bounds;
                assert!(
                    x.iter().all(|&xi| xi >= lower && xi <= upper),
                    "minimum of {} lies outside its bounds",
                    name
                );
                let value = (meta.function)(&x);
                assert!(
                    (value - meta.minimum_value).abs() <= loose_tolerance,
                    "{} at its minimum: expected {}, got {}",
                    name,
                    meta.minimum_value,
                    value
                );
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert!(get_function("sphere").is_some());
        assert!(get_function("no_such_function").is_none());
        assert_eq!(
            function_names(),
            vec!["rastrigin", "rosenbrock", "schwefel", "sphere"]
        );
    }
}
