#![forbid(unsafe_code)]

mod report;
mod scenario;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use planrs_core::model::Model;
use planrs_core::solution::Solution;
use planrs_io::{read_model, write_solution};
use planrs_solver::{ClarabelBackend, SolveBackend, SolveOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planrs")]
#[command(version, about = "Production-planning linear programs via Clarabel")]
struct Cli {
    #[arg(long)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the built-in assembly-workshop plan.
    Plan {
        #[command(flatten)]
        solve: SolveArgs,
        #[arg(long)]
        json: bool,
    },
    /// Solve a JSON model from disk.
    Solve {
        #[arg(long)]
        model: PathBuf,
        #[command(flatten)]
        solve: SolveArgs,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON model without solving it.
    Check {
        #[arg(long)]
        model: PathBuf,
    },
}

#[derive(Args)]
struct SolveArgs {
    #[arg(long)]
    tol: Option<f64>,
    #[arg(long)]
    max_iters: Option<u32>,
    #[arg(long)]
    time_limit: Option<u64>,
    #[arg(long)]
    verbose: bool,
}

impl SolveArgs {
    fn options(&self) -> SolveOptions {
        let mut options = SolveOptions::default();
        if let Some(tolerance) = self.tol {
            options.tolerance = tolerance;
        }
        if let Some(iters) = self.max_iters {
            options.max_iterations = iters;
        }
        if let Some(limit) = self.time_limit {
            options.max_time = Some(Duration::from_secs(limit));
        }
        options.verbose = self.verbose;
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_json);
    match cli.command {
        Commands::Plan { solve, json } => plan_command(&solve.options(), json),
        Commands::Solve {
            model,
            solve,
            output,
            json,
        } => solve_command(model, &solve.options(), output, json),
        Commands::Check { model } => check_command(model),
    }
}

fn initialize_tracing(log_json: bool) {
    if log_json {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .try_init()
            .ok();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .ok();
    }
}

fn plan_command(options: &SolveOptions, output_json: bool) -> Result<()> {
    let model = scenario::workshop_model()?;
    let solution = ClarabelBackend::new().solve(&model, options)?;
    tracing::debug!(status = ?solution.status, iterations = solution.iterations, "plan solved");
    emit_solution(&model, &solution, None, output_json)
}

fn solve_command(
    path: PathBuf,
    options: &SolveOptions,
    output: Option<PathBuf>,
    output_json: bool,
) -> Result<()> {
    let model = read_model(&path)?;
    let solution = ClarabelBackend::new().solve(&model, options)?;
    tracing::debug!(status = ?solution.status, iterations = solution.iterations, "model solved");
    emit_solution(&model, &solution, output, output_json)
}

fn emit_solution(
    model: &Model,
    solution: &Solution,
    output: Option<PathBuf>,
    output_json: bool,
) -> Result<()> {
    if output_json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, solution)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
    } else {
        print!("{}", report::render(model, solution));
    }
    if let Some(path) = output {
        write_solution(path, solution)?;
    }
    Ok(())
}

fn check_command(path: PathBuf) -> Result<()> {
    let model = read_model(&path)?;
    model.validate().context("model validation failed")?;
    println!(
        "Model validation succeeded ({} variables, {} constraints).",
        model.num_variables(),
        model.num_constraints()
    );
    Ok(())
}
