mod cmd;
mod output;
mod root;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "soulguard",
    about = "Identity integrity verification — hash-pin agent core directives and gate changes to them",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: auto-detect from .soulguard/ or .git/)
    #[arg(long, global = true, env = "SOULGUARD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the soul file and hash record in the current repository
    Init {
        /// Agent name (lowercase alphanumeric with hyphens)
        #[arg(long, default_value = "agent")]
        name: String,
    },

    /// Verify the on-disk soul file against its pin and hash record
    Verify,

    /// Print the SHA-256 digest of the current directives
    Hash,

    /// Re-pin after a reviewed directives change (updates pin and record in lockstep)
    Pin,

    /// Run the commit gate against the staged tree (used as the pre-commit hook)
    Precommit,

    /// Install a pre-commit hook that runs the commit gate
    InstallHook {
        /// Overwrite an existing hook not managed by soulguard
        #[arg(long)]
        force: bool,
    },

    /// Run as an MCP stdio server exposing the verified identity
    Mcp,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, &name),
        Commands::Verify => cmd::verify::run(&root, cli.json),
        Commands::Hash => cmd::hash::run(&root, cli.json),
        Commands::Pin => cmd::pin::run(&root, cli.json),
        Commands::Precommit => cmd::precommit::run(&root),
        Commands::InstallHook { force } => cmd::hook::run(&root, force),
        Commands::Mcp => cmd::mcp::run(&root),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
