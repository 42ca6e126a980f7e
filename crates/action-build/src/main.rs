mod cmd;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmd::build::BuildArgs;
use std::path::PathBuf;

use action_build::{root, Config};

#[derive(Parser)]
#[command(
    name = "actions-build",
    about = "Bundle every action in the repository into a standalone binary",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: auto-detect from actions.yaml or .git/)
    #[arg(long, global = true, env = "ACTIONS_ROOT")]
    root: Option<PathBuf>,

    /// Config file (default: <root>/actions.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle actions into actions/<name>/dist/<name> (the default)
    Build(BuildArgs),

    /// List discovered actions with their inputs, outputs and build state
    List,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Some(Commands::List) => tracing::Level::WARN,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = load_config(&root, cli.config.as_deref()).and_then(|config| {
        match cli.command.unwrap_or(Commands::Build(BuildArgs::default())) {
            Commands::Build(args) => cmd::build::run(&root, config, args, cli.json),
            Commands::List => cmd::list::run(&root, &config, cli.json),
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(root: &std::path::Path, explicit: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load(root).context("failed to load actions.yaml"),
    }
}
