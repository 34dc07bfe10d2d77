use std::path::PathBuf;

use clap::Parser;
use elevator_bank::passenger::PassengerFactory;
use elevator_bank::{Fleet, Simulation, SimulationConfig, fleet_stack};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Simulate a bank of elevator cars serving random passengers", long_about = None)]
struct Cli {
    /// JSON file with simulation parameters
    #[arg(short, long, default_value = elevator_bank::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the number of cars
    #[arg(long)]
    carts: Option<usize>,

    /// Override the number of floors
    #[arg(long)]
    floors: Option<u32>,

    /// Seed for passenger generation
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = SimulationConfig::load(&cli.config);
    if let Some(carts) = cli.carts {
        config.carts_amount = carts;
    }
    if let Some(floors) = cli.floors {
        config.floors_amount = floors;
    }
    config.validate()?;
    tracing::info!("\n{config}");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut factory = PassengerFactory::new(config.floors_amount, rng);
    let passengers: Vec<_> = (0..config.passengers_amount)
        .map(|_| factory.random_passenger())
        .collect();

    let fleet = Fleet::new(config.carts_amount, config.floors_amount);
    tracing::info!("\n{fleet}");

    let simulation = Simulation::new(fleet_stack(fleet), config, passengers).await?;
    let summary = simulation.run().await?;
    println!(
        "Finished after {} steps: {} passengers boarded, {} pickups deferred, {} rejected",
        summary.steps, summary.boarded, summary.deferred, summary.rejected
    );
    Ok(())
}
