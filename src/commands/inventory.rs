use std::path::Path;

use crate::cli::{Cli, Commands};
use crate::domain::models::CategoryInfo;
use crate::services::config::Settings;
use crate::services::context::Context;
use crate::services::output::{emit_json, emit_one, emit_rows};
use crate::services::report::summary_lines;
use crate::services::scanner::resolve_root;

pub fn handle_inventory_commands(cli: &Cli, ctx: &mut Context) -> anyhow::Result<bool> {
    let root = Path::new(&cli.root);

    match &cli.command {
        Commands::Scan => {
            let report = ctx.scan(root);
            if cli.json {
                emit_json(&*report)?;
            } else {
                for line in summary_lines(&report) {
                    println!("{line}");
                }
            }
        }
        Commands::List { workspace } => {
            let report = ctx.list(root);
            let rows: Vec<_> = report
                .modules
                .iter()
                .filter(|m| !workspace || m.category.workspace_visible())
                .collect();
            emit_rows(cli.json, &rows, |m| {
                format!("{}\t{}\t{}", m.name, m.category, m.version)
            })?;
        }
        Commands::Report => {
            let report = ctx.list(root);
            if cli.json {
                emit_json(&*report)?;
            } else {
                for line in summary_lines(&report) {
                    println!("{line}");
                }
            }
        }
        Commands::Show { module } => {
            let report = ctx.list(root);
            let record = report
                .modules
                .iter()
                .find(|m| &m.name == module)
                .ok_or_else(|| anyhow::anyhow!("module not found: {module}"))?;
            if cli.json {
                emit_json(record)?;
            } else {
                println!("name: {}", record.name);
                println!("category: {}", record.category);
                println!("version: {}", record.version);
                println!("path: {}", record.path.display());
                if let Some(url) = &record.repo_url {
                    println!("repo_url: {url}");
                }
                if !record.requirements.is_empty() {
                    println!("requirements: {}", record.requirements.join(", "));
                }
                for issue in &record.issues {
                    println!("issue: [{}] {}", issue.code, issue.message);
                }
            }
        }
        Commands::Categories { id } => {
            let registry = ctx.registry(root);
            let selected: Vec<_> = match id {
                Some(id) => vec![registry.get(id)?],
                None => registry.all().iter().collect(),
            };
            let infos: Vec<CategoryInfo> = selected
                .into_iter()
                .map(|c| CategoryInfo {
                    id: c.id,
                    plural: c.plural.clone(),
                    root: c.root.clone(),
                    workspace_visible: c.workspace_visible,
                })
                .collect();
            emit_rows(cli.json, &infos, |c| {
                format!("{}\t{}\t{}", c.id, c.plural, c.workspace_visible)
            })?;
        }
        Commands::Config => {
            let settings = Settings::load(&resolve_root(root));
            emit_one(cli.json, settings, |s| {
                format!("module_name\t{}", s.display_module_name())
            })?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}
