//! Benchmark objectives, one per module.

mod rastrigin;
mod rosenbrock;
mod schwefel;
mod sphere;

pub use rastrigin::rastrigin;
pub use rosenbrock::rosenbrock;
pub use schwefel::schwefel;
pub use sphere::sphere;
