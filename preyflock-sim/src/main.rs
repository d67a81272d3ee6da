use anyhow::{Context, Result};
use clap::Parser;
use preyflock_shared::{EcosystemSettings, PopulationReport};
use preyflock_sim::Ecosystem;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless predator-prey flocking simulation", long_about = None)]
struct Args {
    /// Settings file (JSON). Built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 2000)]
    ticks: u64,

    /// Override the RNG seed from the settings
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a population report every N ticks
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    report_every: u64,

    /// Print every report as a JSON line on stdout
    #[arg(short, long)]
    json: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

struct Runner {
    ecosystem: Ecosystem,
    report_every: u64,
    json: bool,
}

impl Runner {
    fn new(settings: EcosystemSettings, report_every: u64, json: bool) -> Result<Self> {
        let ecosystem = Ecosystem::new(settings).context("Failed to build ecosystem")?;
        Ok(Self {
            ecosystem,
            report_every,
            json,
        })
    }

    fn run(&mut self, ticks: u64) -> Result<Option<PopulationReport>> {
        log::info!("Running {} ticks...", ticks);
        let started = Instant::now();
        let mut last = None;

        for _ in 0..ticks {
            let report = self.ecosystem.tick();

            if self.json {
                println!(
                    "{}",
                    serde_json::to_string(&report).context("Failed to encode report")?
                );
            } else if report.tick % self.report_every == 0 {
                log_report(&report);
            }

            let extinct = report.is_extinct();
            last = Some(report);
            if extinct {
                log::warn!("A population went extinct, stopping early");
                break;
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        let done = self.ecosystem.current_tick();
        if elapsed > 0.0 {
            log::info!(
                "Simulated {} ticks in {:.2}s ({:.1} ticks/s)",
                done,
                elapsed,
                done as f64 / elapsed
            );
        }
        Ok(last)
    }
}

fn log_report(report: &PopulationReport) {
    log::info!(
        "tick {:>6}: {:>4} boids, {:>4} prey ({:+}), {:>3} predators ({:+}), {} eating, {} died ({} eaten, {} starved, {} old)",
        report.tick,
        report.population(),
        report.prey,
        report.prey_births,
        report.predators,
        report.predator_births,
        report.predators_eating,
        report.deaths.total(),
        report.deaths.eaten,
        report.deaths.starved,
        report.deaths.old_age,
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut settings = match &args.config {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            EcosystemSettings::load(path).context("Failed to load settings")?
        }
        None => EcosystemSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings.world.seed = seed;
    }

    if args.print_settings {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    log::info!("Seed: {}", settings.world.seed);

    let mut runner = Runner::new(settings, args.report_every, args.json)?;
    if let Some(report) = runner.run(args.ticks).context("Simulation error")? {
        log_report(&report);
    }

    Ok(())
}
