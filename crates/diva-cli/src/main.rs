mod cmd;
mod output;
mod stage;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "diva",
    about = "Put a digital diva on stage: sing a song or perform a setlist",
    version,
    propagate_version = true
)]
struct Cli {
    /// Stage config file (default: ./stage.yaml if present, else built-in defaults)
    #[arg(long, global = true, env = "DIVA_CONFIG")]
    config: Option<PathBuf>,

    /// Voice version override (V2_CLASSIC, V3, V4X, NT, SEKAI, V6_AI)
    #[arg(long, global = true, env = "DIVA_VOICE")]
    voice: Option<String>,

    /// Deadline for the whole show, in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Delay between songs, in milliseconds
    #[arg(long, global = true)]
    pacing_ms: Option<u64>,

    /// Energy to spend before the diva goes on stage
    #[arg(long, global = true)]
    drain: Option<u32>,

    /// Log at info level instead of warn
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// The full show: an opening song, then the setlist
    Show,

    /// Sing a single song
    Sing {
        /// Song title
        song: String,
    },

    /// Perform songs one after another (default: the configured setlist)
    Perform {
        /// Song titles, in order
        songs: Vec<String>,
    },

    /// List voice versions and append voicebanks
    Versions,

    /// Write a stage config with default values
    Init {
        /// Destination file
        #[arg(default_value = "stage.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate the stage config for common mistakes
    Check,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // stdout carries the performance; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = stage::StageOptions {
        config: cli.config,
        voice: cli.voice,
        timeout_secs: cli.timeout_secs,
        pacing_ms: cli.pacing_ms,
        drain: cli.drain,
    };

    let result = match cli.command {
        Commands::Show => cmd::show::run(&opts),
        Commands::Sing { song } => cmd::sing::run(&opts, &song),
        Commands::Perform { songs } => cmd::perform::run(&opts, songs, cli.json),
        Commands::Versions => cmd::versions::run(cli.json),
        Commands::Init { path, force } => cmd::init::run(&path, force),
        Commands::Check => cmd::check::run(&opts, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
