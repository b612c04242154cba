use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "calmcal", version, about = "CalmCal scheduling CLI")]
struct Cli {
    /// Task list file (default: ~/.config/calmcal/tasks.json)
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,
    /// Config file (default: ~/.config/calmcal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Reference time instead of the current clock (RFC 3339)
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create events and place their subtasks
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Task list management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Free slot search
    Slot {
        #[command(subcommand)]
        action: commands::slot::SlotAction,
    },
    /// Workload and stress metrics
    Analyze(commands::analyze::AnalyzeArgs),
    /// Move several tasks to another day
    Reschedule {
        #[command(subcommand)]
        action: commands::reschedule::RescheduleAction,
    },
    /// Move one task to a new start time
    Move(commands::reschedule::MoveArgs),
    /// Subtask templates
    Templates {
        #[command(subcommand)]
        action: commands::templates::TemplatesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CALMCAL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = Context::new(cli.tasks, cli.config, cli.now);
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(&ctx, action),
        Commands::Task { action } => commands::task::run(&ctx, action),
        Commands::Slot { action } => commands::slot::run(&ctx, action),
        Commands::Analyze(args) => commands::analyze::run(&ctx, args),
        Commands::Reschedule { action } => commands::reschedule::run(&ctx, action),
        Commands::Move(args) => commands::reschedule::run_move(&ctx, args),
        Commands::Templates { action } => commands::templates::run(&ctx, action),
        Commands::Config { action } => commands::config::run(&ctx, action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "calmcal", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
