//! Testbench simulation driver CLI.
//!
//! This binary is the process entry point for a run. It performs:
//! 1. **Setup:** Load the optional JSON config, apply flag overrides and install logging.
//! 2. **Run:** Create the context, forward the trailing arguments to it, build the
//!    selected model against it and drive it until the model finishes.
//! 3. **Exit:** Return 0 on a completed run and 1 on any construction, evaluation,
//!    finalization or configuration error.

use std::error::Error;
use std::num::NonZeroU64;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tbsim_core::config::Config;
use tbsim_core::models;
use tbsim_core::SimError;
use tbsim_core::sim::{Driver, Model, RunSummary, SimContext, StepLimit};

#[derive(Parser, Debug)]
#[command(
    name = "tbsim",
    author,
    version,
    about = "Time-stepped testbench simulation driver",
    long_about = "Evaluate a model once per time step until it signals finish, then finalize it.\n\nArguments after the flags are forwarded to the model verbatim (e.g. +verbose, +vectors=4).\n\nExamples:\n  tbsim\n  tbsim --stats +verbose\n  tbsim --model alu --max-steps 100 -- +vectors=4\n  tbsim --config run.json"
)]
struct Cli {
    /// Model to run (see --list-models).
    #[arg(short, long)]
    model: Option<String>,

    /// JSON configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Force finish after this many evaluations (at least 1).
    #[arg(long, value_name = "N")]
    max_steps: Option<NonZeroU64>,

    /// Simulation time units per evaluation.
    #[arg(long, value_name = "N")]
    time_step: Option<u64>,

    /// Print run statistics after a successful run.
    #[arg(long)]
    stats: bool,

    /// List available models and exit.
    #[arg(long)]
    list_models: bool,

    /// Arguments forwarded to the model.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_models {
        println!("Available models:");
        for name in models::available_models() {
            println!("  - {name}");
        }
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            report(&err);
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.general.trace);

    match run(&config) {
        Ok(summary) => {
            if config.general.stats {
                summary.stats.print();
            }
            ExitCode::from(u8::try_from(summary.exit_code()).unwrap_or(1))
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Reads the config file, if any, and layers the command-line flags over it.
fn load_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(model) = &cli.model {
        config.general.model.clone_from(model);
    }
    if let Some(step) = cli.time_step {
        config.run.time_step = step;
    }
    if cli.max_steps.is_some() {
        config.run.max_steps = cli.max_steps;
    }
    config.general.stats |= cli.stats;
    config.run.args.extend(cli.args.iter().cloned());
    config.validate()?;
    Ok(config)
}

/// Installs the `fmt` subscriber. `RUST_LOG` wins over the config's trace flag.
fn init_logging(trace: bool) {
    let fallback = if trace { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Assembles context, model and driver for one run.
fn run(config: &Config) -> Result<RunSummary, SimError> {
    let mut ctx = SimContext::new();
    ctx.configure(config.run.args.iter().cloned());

    let name = config.general.model.as_str();
    let max_steps = config.run.max_steps;
    let driver = Driver::build(ctx, |ctx| {
        let model = models::create_model(name, ctx)?;
        Ok(match max_steps {
            Some(limit) => Box::new(StepLimit::new(model, limit)) as Box<dyn Model>,
            None => model,
        })
    })?;

    driver.with_time_step(config.run.time_step).run()
}

/// Prints an error and its source chain to stderr.
fn report(err: &SimError) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
