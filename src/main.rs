use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

use queue_dataset::io::reporting;
use queue_dataset::logging::init_logging;
use queue_dataset::simulation::metrics::COLUMNS;
use queue_dataset::{
    BatchConfig, BatchRunner, ExponentialVariates, ParameterSampler, QueueSimulation,
    SimulationParameters, UniformParameterSampler,
};

#[derive(Parser, Debug)]
#[command(name = "queue-dataset")]
#[command(about = "Generate synthetic M/M/c queue performance datasets", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one simulation and print its metrics
    Simulate(SimulateArgs),
    /// Run a Monte-Carlo batch over randomly sampled parameters
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Sample the parameters instead of reading them from flags
    #[arg(long, conflicts_with_all = ["arrival_rate", "service_rate", "servers", "queue_capacity"])]
    random: bool,

    /// Mean arrivals per unit time
    #[arg(long, default_value_t = 5.0)]
    arrival_rate: f64,

    /// Mean service completions per server per unit time
    #[arg(long, default_value_t = 10.0)]
    service_rate: f64,

    /// Number of servers
    #[arg(long, default_value_t = 1)]
    servers: usize,

    /// Maximum number of waiting customers
    #[arg(long, default_value_t = 10)]
    queue_capacity: usize,

    /// Simulation horizon in logical time units
    #[arg(long, default_value_t = 1000.0)]
    time: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the two-line run summary
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of simulations (dataset rows)
    #[arg(short, long, default_value_t = 100)]
    trials: usize,

    /// Master seed for reproducible datasets
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// CSV file to write the dataset to
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let outcome = match cli.command {
        Command::Simulate(args) => run_simulate(args),
        Command::Generate(args) => run_generate(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let params = if args.random {
        UniformParameterSampler::default()
            .sample(&mut rng)
            .with_simulation_time(args.time)
    } else {
        SimulationParameters::new(
            args.arrival_rate,
            args.service_rate,
            args.servers,
            args.queue_capacity,
        )
        .with_simulation_time(args.time)
    };

    reporting::print_parameters(&params);

    let variates = ExponentialVariates::with_rng(&params, rng)?;
    let result = QueueSimulation::new(params, variates)?.run()?;

    if args.verbose {
        reporting::print_run_summary(&result);
    }
    reporting::print_results(&result);

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = BatchConfig {
        trials: args.trials,
        seed: args.seed,
        parallel: !args.sequential,
        ..BatchConfig::default()
    };

    println!("Generating {} simulations...", config.trials);
    let runner = BatchRunner::new(UniformParameterSampler::default(), config);
    let dataset = runner.run()?;

    println!("Generated {} simulations", dataset.len());
    println!("Dataset shape: ({}, {})", dataset.len(), COLUMNS.len());
    println!("\nSample statistics:");
    println!("{}", reporting::summary_table(&dataset.describe()));

    if let Some(path) = args.output {
        let written = reporting::write_dataset(&path, &dataset)?;
        println!("\nSuccess! {} rows written to {}", written, path.display());
    }

    Ok(())
}
