use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

use action_build::output::{print_json, print_table};
use action_build::{discover, paths, ActionManifest, Config};

#[derive(Debug, Serialize)]
struct ListedAction {
    name: String,
    description: String,
    entry: PathBuf,
    artifact: PathBuf,
    built: bool,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

pub fn run(root: &Path, config: &Config, json: bool) -> anyhow::Result<()> {
    let actions_dir = config.actions_dir(root);
    let exe_suffix = paths::exe_suffix(config.build.target.as_deref());
    let sources = discover(&actions_dir, config.actions.as_deref(), exe_suffix)
        .context("failed to discover actions")?;

    let mut listed = Vec::with_capacity(sources.len());
    for source in sources {
        let manifest_path = paths::manifest_path(&actions_dir, &source.name);
        let manifest = ActionManifest::load(&manifest_path)
            .with_context(|| format!("failed to read {}", manifest_path.display()))?;
        let (description, inputs, outputs) = match manifest {
            Some(m) => (
                m.description.clone(),
                m.input_names().into_iter().map(str::to_owned).collect(),
                m.output_names().into_iter().map(str::to_owned).collect(),
            ),
            None => (String::new(), Vec::new(), Vec::new()),
        };
        listed.push(ListedAction {
            built: source.artifact.is_file(),
            name: source.name,
            description,
            entry: source.entry,
            artifact: source.artifact,
            inputs,
            outputs,
        });
    }

    if json {
        return print_json(&listed);
    }

    if listed.is_empty() {
        println!("No actions found in {}", actions_dir.display());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = listed
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.inputs.join(", "),
                a.outputs.join(", "),
                if a.built { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print_table(&["NAME", "INPUTS", "OUTPUTS", "BUILT"], &rows);
    Ok(())
}
