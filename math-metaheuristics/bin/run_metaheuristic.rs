use clap::Parser;
use math_metaheuristics::{Bounds, RunSummary, Variant, consecutive_seeds, run_repeated};
use math_test_functions::{function_names, get_function_metadata};
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_metaheuristic",
    about = "Run budgeted DE / PSO / GA variants on a benchmark function"
)]
struct Cli {
    /// Name of the benchmark function (use --list-functions to see available options)
    #[arg(long)]
    function: Option<String>,

    /// Variant to run (use --list-variants to see available options)
    #[arg(long, conflicts_with = "all_variants")]
    variant: Option<String>,

    /// Run every variant one after the other
    #[arg(long)]
    all_variants: bool,

    /// Dimensionality of the problem
    #[arg(long, default_value_t = 10)]
    dim: usize,

    /// Objective evaluations per run (defaults to 10000 * dim)
    #[arg(long)]
    budget: Option<usize>,

    /// Independent runs per variant
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Seed of the first run; run k uses seed + k
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// List available benchmark functions and exit
    #[arg(long)]
    list_functions: bool,

    /// List available variants and exit
    #[arg(long)]
    list_variants: bool,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    if args.list_functions {
        let names = function_names();
        println!("Available test functions ({}):", names.len());
        for name in names {
            println!("- {name}");
        }
        return;
    }
    if args.list_variants {
        println!("Available variants ({}):", Variant::ALL.len());
        for v in Variant::ALL {
            println!("- {v}");
        }
        return;
    }

    let function_name = match args.function {
        Some(ref name) => name.clone(),
        None => {
            eprintln!("Error: --function must be provided unless a --list-* flag is used.");
            process::exit(2);
        }
    };
    let metadata = get_function_metadata();
    let Some(meta) = metadata.get(&function_name) else {
        eprintln!(
            "Error: unknown function '{}'. Use --list-functions to see the options.",
            function_name
        );
        process::exit(2);
    };

    let variants: Vec<Variant> = if args.all_variants {
        Variant::ALL.to_vec()
    } else {
        let name = args.variant.as_deref().unwrap_or("de_rand1bin");
        match name.parse::<Variant>() {
            Ok(v) => vec![v],
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(2);
            }
        }
    };

    if args.runs == 0 {
        eprintln!("Error: --runs must be at least 1.");
        process::exit(2);
    }
    let (lower, upper) = meta.bounds;
    let bounds = match Bounds::uniform(args.dim, lower, upper) {
        Ok(b) => b,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
    };
    let budget = args.budget.unwrap_or(10_000 * args.dim);
    let seeds = consecutive_seeds(args.seed, args.runs);

    println!(
        "{} (dim={}, bounds=[{}, {}], budget={}, runs={})",
        meta.name, args.dim, lower, upper, budget, args.runs
    );

    for variant in variants {
        let start = Instant::now();
        let reports = match run_repeated(variant, &meta.function, &bounds, budget, &seeds) {
            Ok(r) => r,
            Err(err) => {
                eprintln!("Error: {variant} failed: {err}");
                process::exit(2);
            }
        };
        let elapsed = start.elapsed();

        for (seed, report) in seeds.iter().zip(&reports) {
            println!(
                "{:<20} seed={:<4} best={:.6e} nfev={} generations={}",
                variant.name(),
                seed,
                report.fun,
                report.nfev,
                report.nit
            );
        }
        if let Some(summary) = RunSummary::from_reports(&reports) {
            println!("{:<20} {} ({:.2?})", variant.name(), summary, elapsed);
        }
    }
}
