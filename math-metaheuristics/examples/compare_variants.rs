//! Compares every preset variant on Rastrigin in 10 dimensions.
//!
//! ```text
//! RUST_LOG=info cargo run --release --example compare_variants
//! ```

use math_metaheuristics::{Bounds, RunSummary, Variant, run_repeated};
use math_test_functions::rastrigin;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let dim = 10;
    let budget = 10_000 * dim;
    let bounds = Bounds::uniform(dim, -5.12, 5.12)?;
    let seeds: Vec<u64> = (0..5).collect();

    println!("Rastrigin, D={dim}, budget={budget}, {} runs", seeds.len());
    let mut ranking = Vec::new();
    for variant in Variant::ALL {
        let reports = run_repeated(variant, &rastrigin, &bounds, budget, &seeds)?;
        if let Some(summary) = RunSummary::from_reports(&reports) {
            println!("{:<20} {}", variant.name(), summary);
            ranking.push((variant, summary.mean));
        }
    }

    ranking.sort_by(|a, b| a.1.total_cmp(&b.1));
    println!("\nBy mean final value:");
    for (rank, (variant, mean)) in ranking.iter().enumerate() {
        println!("{:>2}. {:<20} {:.6e}", rank + 1, variant.name(), mean);
    }
    Ok(())
}
