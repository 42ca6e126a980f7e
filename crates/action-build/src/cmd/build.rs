use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use action_build::output::print_json;
use action_build::{build_all, discover, paths, CargoBundler, Config};

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Build only this action (repeatable; default: every discovered action)
    #[arg(long = "action", value_name = "NAME")]
    pub actions: Vec<String>,

    /// Target triple to build for (default: build.target from actions.yaml, else the host)
    #[arg(long)]
    pub target: Option<String>,

    /// Cargo profile (default: build.profile from actions.yaml, else release)
    #[arg(long)]
    pub profile: Option<String>,

    /// Cargo program to run (default: build.cargo from actions.yaml, else cargo on PATH)
    #[arg(long, value_name = "PATH")]
    pub cargo: Option<PathBuf>,
}

pub fn run(root: &Path, config: Config, args: BuildArgs, json: bool) -> anyhow::Result<()> {
    let config = apply_overrides(config, args);
    config.validate().context("invalid build settings")?;

    let actions_dir = config.actions_dir(root);
    let exe_suffix = paths::exe_suffix(config.build.target.as_deref());
    let sources = discover(&actions_dir, config.actions.as_deref(), exe_suffix)
        .context("failed to discover actions")?;

    if sources.is_empty() {
        tracing::warn!(dir = %actions_dir.display(), "no actions to build");
    }

    let bundler = CargoBundler::new(root, &config.build)?;
    tracing::debug!(cargo = %bundler.cargo().display(), profile = %config.build.profile, "bundler ready");

    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let total = sources.len();
    let report = rt.block_on(build_all(Arc::new(bundler), sources));

    if json {
        print_json(&report)?;
    } else {
        for artifact in &report.artifacts {
            println!("  built: {}", relative(root, &artifact.path).display());
        }
        for failure in &report.failures {
            eprintln!("  failed: {}", failure.error);
        }
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {total} actions failed to bundle",
            report.failures.len()
        );
    }

    if !json {
        println!("Build complete");
    }
    Ok(())
}

fn apply_overrides(mut config: Config, args: BuildArgs) -> Config {
    if !args.actions.is_empty() {
        config.actions = Some(args.actions);
    }
    if let Some(target) = args.target {
        config.build.target = Some(target);
    }
    if let Some(profile) = args.profile {
        config.build.profile = profile;
    }
    if let Some(cargo) = args.cargo {
        config.build.cargo = Some(cargo);
    }
    config
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
