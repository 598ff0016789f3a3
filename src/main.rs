use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use deadwood_decay::{
    analysis::{run_simulation, summarize_periods, StandRegistry},
    config::{DecayConfig, DecimalSeparator},
    error::DecayError,
    io::{self, InitialValuesRecord, MortalityRecord, RecordSource, ResultWriter},
    models::{DecayClass, DecayModelVariant},
    visualization::{print_parameter_table, print_period_table, print_volume_chart},
};

#[derive(Parser)]
#[command(
    name = "decay-sim",
    about = "Dead-wood Decay Simulator - decay of dead trees in forest stands",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SimulationArgs {
    /// Decay model: OneTimeRegression (0) or Vector (1)
    model: DecayModelVariant,

    /// Highest decomposition class a cohort is followed to (0-4)
    max_decay_class: DecayClass,

    /// Number of years to follow each cohort
    max_time_step: i64,

    /// Dead wood present at period 0 (CSV or Excel); skipped if the file is missing
    initial_values: PathBuf,

    /// Dead trees per period (CSV or Excel)
    mortality: PathBuf,

    /// TOML configuration file; positional arguments override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Years per simulation step
    #[arg(short, long)]
    step_length: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate decay and write per-period stand statistics
    Simulate {
        #[command(flatten)]
        args: SimulationArgs,

        /// Output file (.csv, .json, or .xlsx)
        output: PathBuf,

        /// Any value here waits for Enter before exiting
        #[arg(value_name = "BREAK")]
        pause: Option<String>,

        /// Decimal separator for CSV output: point or comma
        #[arg(short, long)]
        decimal_separator: Option<DecimalSeparator>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Simulate decay and print a per-period summary instead of writing a file
    Summary {
        #[command(flatten)]
        args: SimulationArgs,
    },

    /// Display the decay-rate constants and class thresholds
    Parameters,
}

fn load_config(args: &SimulationArgs) -> Result<DecayConfig> {
    let mut config = match &args.config {
        Some(path) => DecayConfig::load(path)?,
        None => DecayConfig::default(),
    };
    config.simulation.model = args.model;
    config.simulation.max_decay_class = args.max_decay_class;
    config.simulation.max_time_step = args.max_time_step;
    if let Some(step) = args.step_length {
        config.simulation.step_length = step;
    }
    config.simulation.validate()?;
    Ok(config)
}

fn load_initial_values(path: &Path) -> Result<Option<Vec<InitialValuesRecord>>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "initial values file not found, continuing without it");
        eprintln!(
            "{}: initial values file {} not found, continuing without it",
            "Warning".yellow(),
            path.display()
        );
        return Ok(None);
    }
    Ok(Some(io::source_for(path).read_initial_values(path)?))
}

fn load_mortality(path: &Path) -> Result<Vec<MortalityRecord>> {
    if !path.exists() {
        return Err(DecayError::MissingInput(format!(
            "Mortality file not found: {}",
            path.display()
        ))
        .into());
    }
    Ok(io::source_for(path).read_mortality(path)?)
}

fn simulate(args: &SimulationArgs, config: &DecayConfig) -> Result<StandRegistry> {
    let initial = load_initial_values(&args.initial_values)?;
    let mortality = load_mortality(&args.mortality)?;
    Ok(run_simulation(
        config.simulation.clone(),
        initial.as_deref(),
        &mortality,
    )?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            args,
            output,
            pause,
            decimal_separator,
            pretty,
        } => {
            let mut config = load_config(&args)?;
            if let Some(sep) = decimal_separator {
                config.output.decimal_separator = sep;
            }
            config.output.pretty |= pretty;

            let writer = io::writer_for(&output, &config.output)?;

            println!(
                "\n{}",
                format!("Dead-wood Decay Simulation ({})", config.simulation.model)
                    .bold()
                    .cyan()
            );

            let registry = simulate(&args, &config)?;
            let rows = registry.output_rows();
            writer.write(&rows, &output)?;

            println!(
                "  Simulated {} cohorts in {} stands",
                registry.num_cohorts(),
                registry.num_stands()
            );
            println!(
                "{} Wrote {} rows -> {}",
                "Success:".green().bold(),
                rows.len(),
                output.display()
            );

            if pause.is_some() {
                println!("Press Enter to exit...");
                let mut line = String::new();
                std::io::stdin().read_line(&mut line)?;
            }
        }

        Commands::Summary { args } => {
            let config = load_config(&args)?;
            let registry = simulate(&args, &config)?;

            println!("\n{}", "Simulation Summary".bold().cyan());
            println!("{}", "=".repeat(40));
            println!("  Model:            {}", config.simulation.model);
            println!("  Max decay class:  {}", config.simulation.max_decay_class);
            println!("  Max time step:    {} years", config.simulation.max_time_step);
            println!("  Step length:      {} years", config.simulation.step_length);
            println!("  Stands:           {}", registry.num_stands());
            println!("  Cohorts:          {}", registry.num_cohorts());

            let summaries = summarize_periods(registry.stands());
            print_period_table(&summaries);
            print_volume_chart(&summaries);
        }

        Commands::Parameters => {
            print_parameter_table();
        }
    }

    Ok(())
}
