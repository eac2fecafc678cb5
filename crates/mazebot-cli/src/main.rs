use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mazebot_cli::commands::{handle_race, handle_single, handle_solve, CommandContext};
use mazebot_cli::output::OutputFormat;
use mazebot_cli::{QueueArg, RaceArgs, SingleArgs, SolveArgs};
use mazebot_lib::SearchOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mazebot maze solver")]
struct Cli {
    /// Override the maze cache directory.
    #[arg(long, global = true)]
    maze_dir: Option<PathBuf>,

    /// Override the Mazebot API host.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Open-set implementation used by the search.
    #[arg(long, value_enum, default_value_t = QueueArg::PairingHeap, global = true)]
    queue: QueueArg,

    /// Let decrease-key skip heap subtrees that cannot hold the item.
    #[arg(long, global = true)]
    prune: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch (or load) one maze, solve it and submit the answer.
    Single(SingleArgs),
    /// Run the Mazebot race until the certificate is issued.
    Race(RaceArgs),
    /// Solve a maze JSON file without touching the network.
    Solve(SolveArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let context = CommandContext {
        maze_dir: cli.maze_dir,
        api_base: cli.api_base,
        format: cli.format,
        search: SearchOptions {
            queue: cli.queue.into(),
            prune_decrease_key: cli.prune,
        },
    };

    match cli.command {
        Command::Single(args) => handle_single(&context, &args),
        Command::Race(args) => handle_race(&context, &args),
        Command::Solve(args) => handle_solve(&context, &args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
