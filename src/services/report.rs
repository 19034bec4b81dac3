use std::path::Path;

use crate::domain::models::Report;

fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Human-readable summary of a report. Pure: lines are handed back to the
/// caller, which decides where they go.
pub fn summary_lines(report: &Report) -> Vec<String> {
    let mut lines = vec![
        format!("Total modules: {}", report.total_modules()),
        format!("Total issues: {}", report.total_issues()),
    ];

    if report.total_issues() == 0 {
        lines.push("No module issues detected.".to_string());
        return lines;
    }

    lines.push("Modules with issues:".to_string());
    for module in &report.issued {
        lines.push(format!(
            "- {} ({}) -> {}",
            module.name,
            module.category,
            display_path(&module.path, &report.root)
        ));
        for issue in &module.issues {
            lines.push(format!("  [{}] {}", issue.code, issue.message));
        }
    }
    lines
}
