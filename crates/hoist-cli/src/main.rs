mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hoist",
    about = "Bootstrap a directory into a remote-backed git repository and keep it synchronized",
    version,
    propagate_version = true
)]
struct Cli {
    /// Working directory (default: nearest .git/ ancestor, else cwd)
    #[arg(long, global = true, env = "HOIST_DIR")]
    dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge the directory to "committed and pushed", creating the
    /// remote if none is configured yet
    Sync {
        /// Repository name when a remote must be created (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Repository description when a remote must be created
        #[arg(long)]
        description: Option<String>,

        /// Visibility for a newly created remote: public or private.
        /// Required if (and only if) no remote is configured yet.
        #[arg(long)]
        visibility: Option<String>,
    },

    /// Create the hosted remote for a directory that has none yet
    Publish {
        /// Repository name (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Repository description
        #[arg(long)]
        description: Option<String>,

        /// Visibility: public or private. Always explicit, never defaulted.
        #[arg(long)]
        visibility: String,
    },

    /// Show the probed repository state without changing anything
    Status,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.dir.as_deref());

    let result = match cli.command {
        Commands::Sync {
            name,
            description,
            visibility,
        } => cmd::sync::run(
            &root,
            name.as_deref(),
            description.as_deref(),
            visibility.as_deref(),
            cli.json,
        ),
        Commands::Publish {
            name,
            description,
            visibility,
        } => cmd::publish::run(
            &root,
            name.as_deref(),
            description.as_deref(),
            &visibility,
            cli.json,
        ),
        Commands::Status => cmd::status::run(&root, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
