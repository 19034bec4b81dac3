use std::path::Path;
use std::time::Duration;

use crate::cli::{Cli, Commands, InitCommands, ManifestCommands};
use crate::services::context::Context;
use crate::services::manifest::{read_manifest, set_manifest_field};
use crate::services::output::{emit_json, emit_one};
use crate::services::runner::{run_all, run_one, HostLauncher};
use crate::services::scanner::resolve_root;

pub fn handle_bootstrap_commands(cli: &Cli, ctx: &mut Context) -> anyhow::Result<bool> {
    let root = Path::new(&cli.root);

    match &cli.command {
        Commands::Manifest { command } => match command {
            ManifestCommands::Get { module_dir } => {
                let doc = read_manifest(Path::new(module_dir))?;
                if cli.json {
                    emit_json(&doc)?;
                } else {
                    print!("{}", serde_yaml::to_string(&doc)?);
                }
            }
            ManifestCommands::Set {
                module_dir,
                key,
                value,
            } => {
                // Values parse as YAML so lists and numbers round-trip;
                // anything unparsable is stored as a plain string.
                let parsed = serde_yaml::from_str(value)
                    .unwrap_or_else(|_| serde_yaml::Value::String(value.clone()));
                set_manifest_field(Path::new(module_dir), key, parsed)?;
                emit_one(cli.json, key, |k| format!("set {k} in {module_dir}"))?;
            }
        },
        Commands::Init { command } => match command {
            InitCommands::Run {
                module,
                workdir,
                python,
                timeout,
            } => {
                let report = ctx.list(root);
                let record = report
                    .modules
                    .iter()
                    .find(|m| &m.name == module)
                    .ok_or_else(|| anyhow::anyhow!("module not found: {module}"))?;
                let cwd = workdir
                    .as_ref()
                    .map(|w| resolve_root(Path::new(w)))
                    .unwrap_or_else(|| report.root.clone());
                let launcher = HostLauncher::new(python);
                let ran = run_one(&launcher, record, &cwd, timeout.map(Duration::from_secs))?;
                emit_one(cli.json, ran, |r| {
                    if *r {
                        format!("initialized {module}")
                    } else {
                        format!("no initializer for {module}")
                    }
                })?;
            }
            InitCommands::RunAll {
                workdir,
                python,
                timeout,
            } => {
                let report = ctx.list(root);
                let cwd = workdir
                    .as_ref()
                    .map(|w| resolve_root(Path::new(w)))
                    .unwrap_or_else(|| report.root.clone());
                let launcher = HostLauncher::new(python);
                let outcome = run_all(
                    &launcher,
                    &report.modules,
                    &cwd,
                    timeout.map(Duration::from_secs),
                )?;
                emit_one(cli.json, outcome, |o| {
                    format!(
                        "initialized {} modules ({} without initializers)",
                        o.ran, o.skipped
                    )
                })?;
            }
        },
        _ => return Ok(false),
    }

    Ok(true)
}
