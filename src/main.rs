use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use minecart_vm::{ChunkPolicy, Driver, MachineConfig, Program, RestoreOrder, RunOutcome, Snapshot};

/// Run a seed program on the minecart machine and print every memory state.
#[derive(Debug, Parser)]
#[command(name = "minecart", version)]
struct Cli {
    /// Seed program to run.
    #[arg(long, value_enum, default_value_t = ProgramArg::StoreLoop)]
    program: ProgramArg,

    /// Maximum number of dispatches.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Memory layout written back after each call.
    #[arg(long, value_enum)]
    restore_order: Option<RestoreOrderArg>,

    /// How permute sizes its output groups.
    #[arg(long, value_enum)]
    chunking: Option<ChunkingArg>,

    /// Group size whenever the effective chunking is fixed.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Emit snapshots and the outcome as JSON Lines.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProgramArg {
    Original,
    StoreLoop,
    SmeltOnce,
    PermuteGroups,
}

impl From<ProgramArg> for Program {
    fn from(arg: ProgramArg) -> Self {
        match arg {
            ProgramArg::Original => Program::Original,
            ProgramArg::StoreLoop => Program::StoreLoop,
            ProgramArg::SmeltOnce => Program::SmeltOnce,
            ProgramArg::PermuteGroups => Program::PermuteGroups,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RestoreOrderArg {
    StateThenBox,
    BoxThenState,
    ResultsThenBox,
}

impl From<RestoreOrderArg> for RestoreOrder {
    fn from(arg: RestoreOrderArg) -> Self {
        match arg {
            RestoreOrderArg::StateThenBox => RestoreOrder::StateThenBox,
            RestoreOrderArg::BoxThenState => RestoreOrder::BoxThenState,
            RestoreOrderArg::ResultsThenBox => RestoreOrder::ResultsThenBox,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChunkingArg {
    RunLength,
    Fixed,
}

impl Cli {
    /// The program's own configuration with command-line overrides applied.
    fn config(&self, program: Program) -> MachineConfig {
        let mut config = program.config();
        if let Some(max_iterations) = self.max_iterations {
            config = config.with_max_iterations(max_iterations);
        }
        if let Some(order) = self.restore_order {
            config = config.with_restore_order(order.into());
        }
        match self.chunking {
            Some(ChunkingArg::RunLength) => config = config.with_chunking(ChunkPolicy::RunLength),
            Some(ChunkingArg::Fixed) if config.chunking == ChunkPolicy::RunLength => {
                config = config.with_chunking(ChunkPolicy::Fixed(ChunkPolicy::ORIGINAL_GROUP_SIZE))
            }
            _ => {}
        }
        // The size overrides whichever fixed policy is in effect.
        if let (Some(size), ChunkPolicy::Fixed(_)) = (self.chunk_size, config.chunking) {
            config = config.with_chunking(ChunkPolicy::Fixed(size));
        }
        config
    }
}

/// Use `RUST_LOG` to override the default `warn` filter. Logs go to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_snapshot(out: &mut impl Write, snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(snapshot).context("serializing snapshot")?;
        writeln!(out, "{}", line)?;
    } else if snapshot.iteration == 0 {
        writeln!(out, "Initial condition")?;
        writeln!(out, "{}", snapshot.memory)?;
    } else {
        writeln!(out, "Iteration {}:", snapshot.iteration)?;
        writeln!(out, "{}", snapshot.memory)?;
    }
    Ok(())
}

fn print_outcome(out: &mut impl Write, outcome: &RunOutcome, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "outcome": outcome.kind(),
            "iterations": outcome.iterations(),
            "error": outcome.error().map(|e| serde_json::json!({
                "code": e.code(),
                "category": e.category().to_string(),
                "message": e.to_string(),
            })),
        });
        writeln!(out, "{}", value)?;
        return Ok(());
    }
    match outcome {
        RunOutcome::Halted { iterations } => writeln!(out, "Halted after {} iteration(s)", iterations)?,
        RunOutcome::IterationCap { iterations } => {
            writeln!(out, "Stopped at the iteration cap ({})", iterations)?
        }
        RunOutcome::Faulted { iteration, error } => {
            writeln!(out, "Fault in iteration {}: [E{}] {}", iteration, error.code(), error)?
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<RunOutcome> {
    let program = Program::from(cli.program);
    let config = cli.config(program);
    tracing::info!(program = program.name(), ?config, "starting run");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut memory = program.seed();
    let mut driver = Driver::new(config);

    let mut write_error = None;
    let report = driver.run_with(&mut memory, |snapshot| {
        if write_error.is_none() {
            write_error = print_snapshot(&mut out, snapshot, cli.json).err();
        }
    });
    if let Some(err) = write_error {
        return Err(err);
    }
    print_outcome(&mut out, &report.outcome, cli.json)?;
    Ok(report.outcome)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) if outcome.is_fault() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
