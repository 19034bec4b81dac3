use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::models::{ModuleRecord, Report};
use crate::services::category::{CategoryId, Registry};
use crate::services::issues::{issue_for, validate_manifest, IssueCode};
use crate::services::manifest::{manifest_path, read_manifest};

/// Version recorded when the manifest exists but carries no version value.
const DEFAULT_VERSION: &str = "0.0.0";
/// Version recorded when the manifest itself is missing.
const UNKNOWN_VERSION: &str = "unknown";

/// Resolve a project root to its canonical form; roots that do not exist
/// yet fall back to an absolutized path so cache keys stay distinct.
pub fn resolve_root(root: &Path) -> PathBuf {
    match std::fs::canonicalize(root) {
        Ok(p) => p,
        Err(_) => std::env::current_dir()
            .map(|cwd| cwd.join(root))
            .unwrap_or_else(|_| root.to_path_buf()),
    }
}

fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

fn log_issues(record: &ModuleRecord, root: &Path) {
    for issue in &record.issues {
        warn!(
            "[{}] {}: {} (file: {})",
            issue.code,
            record.name,
            issue.message,
            display_path(&issue.file, root)
        );
    }
}

/// String form of a manifest scalar; non-scalar values fall back to their
/// YAML rendering.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn coerce_version(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => DEFAULT_VERSION.to_string(),
        Some(v) => value_to_string(v),
    }
}

fn coerce_repo_url(raw: Option<&Value>) -> Option<String> {
    match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn coerce_requirements(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Sequence(seq)) => seq.iter().map(value_to_string).collect(),
        _ => Vec::new(),
    }
}

/// Candidate module directories under one category root, sorted by name so
/// scan output is deterministic across filesystems. Hidden (`.`) and
/// internal (`__`) entries are never modules.
fn candidates(category_root: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(category_root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        // is_dir follows symlinks, so a linked module directory counts.
        .filter(|p| p.is_dir())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| !n.starts_with('.') && !n.starts_with("__"))
                .unwrap_or(false)
        })
        .collect();
    dirs.sort();
    dirs
}

fn scan_module(dir: &Path, category: CategoryId) -> ModuleRecord {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let doc = match read_manifest(dir) {
        Ok(doc) => doc,
        // Any read failure degrades to one missing-manifest issue; a scan
        // never fails for per-module content.
        Err(_) => {
            let issue = issue_for(IssueCode::MissingManifest, &manifest_path(dir), None);
            return ModuleRecord {
                name,
                version: UNKNOWN_VERSION.to_string(),
                category,
                path: dir.to_path_buf(),
                repo_url: None,
                requirements: Vec::new(),
                issues: vec![issue],
            };
        }
    };

    let issues = validate_manifest(&doc, &manifest_path(dir));
    ModuleRecord {
        name,
        version: coerce_version(doc.get("version")),
        category,
        path: dir.to_path_buf(),
        repo_url: coerce_repo_url(doc.get("repo_url")),
        requirements: coerce_requirements(doc.get("requirements")),
        issues,
    }
}

/// Walk every category root under `root` and build a fresh report. Absent
/// category directories are normal and skipped silently.
pub fn scan(registry: &Registry, root: &Path) -> Report {
    let mut modules = Vec::new();
    let mut issued = Vec::new();

    for category in registry.all() {
        if !category.root.is_dir() {
            continue;
        }
        for dir in candidates(&category.root) {
            let record = scan_module(&dir, category.id);
            log_issues(&record, root);
            if !record.issues.is_empty() {
                issued.push(record.clone());
            }
            modules.push(record);
        }
    }

    Report {
        modules,
        issued,
        root: root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_module(root: &Path, category: &str, name: &str, manifest: Option<&str>) -> PathBuf {
        let dir = root.join(category).join(name);
        fs::create_dir_all(&dir).expect("create module dir");
        if let Some(yaml) = manifest {
            fs::write(dir.join("init.yaml"), yaml).expect("write manifest");
        }
        dir
    }

    fn scan_root(root: &Path) -> Report {
        scan(&Registry::resolve(root), root)
    }

    #[test]
    fn complete_manifest_yields_clean_record() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(
            tmp.path(),
            "plugins",
            "alpha",
            Some("version: '1.2.3'\ntype: plugin\nrequirements: [beta]\nrepo_url: https://example.com/alpha\n"),
        );

        let report = scan_root(tmp.path());
        assert_eq!(report.total_modules(), 1);
        assert_eq!(report.total_issues(), 0);
        let m = &report.modules[0];
        assert_eq!(m.version, "1.2.3");
        assert_eq!(m.requirements, ["beta"]);
        assert_eq!(m.repo_url.as_deref(), Some("https://example.com/alpha"));
    }

    #[test]
    fn missing_manifest_yields_unknown_version_and_one_issue() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = write_module(tmp.path(), "managers", "foo", None);

        let report = scan_root(tmp.path());
        let m = &report.modules[0];
        assert_eq!(m.name, "foo");
        assert_eq!(m.version, "unknown");
        assert_eq!(m.category.as_str(), "manager");
        assert!(m.requirements.is_empty());
        assert!(m.repo_url.is_none());
        assert_eq!(m.issues.len(), 1);
        assert_eq!(m.issues[0].code, IssueCode::MissingManifest);
        assert_eq!(m.issues[0].file, dir.join("init.yaml"));
    }

    #[test]
    fn empty_manifest_is_treated_as_missing() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(tmp.path(), "utils", "blank", Some(""));

        let report = scan_root(tmp.path());
        assert_eq!(report.modules[0].version, "unknown");
        assert_eq!(report.modules[0].issues[0].code, IssueCode::MissingManifest);
    }

    #[test]
    fn empty_repo_url_flags_exactly_one_issue() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(
            tmp.path(),
            "plugins",
            "bar",
            Some("version: '1.0.0'\ntype: plugin\nrequirements: []\nrepo_url: ''\n"),
        );

        let report = scan_root(tmp.path());
        let m = &report.modules[0];
        assert_eq!(m.issues.len(), 1);
        assert_eq!(m.issues[0].code, IssueCode::MissingRepoUrl);
        assert_eq!(m.version, "1.0.0");
        assert!(m.requirements.is_empty());
        assert!(m.repo_url.is_none());
    }

    #[test]
    fn whitespace_version_keeps_literal_string_but_flags_issue() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(
            tmp.path(),
            "cores",
            "spacey",
            Some("version: '   '\ntype: core\nrequirements: []\nrepo_url: x\n"),
        );

        let report = scan_root(tmp.path());
        let m = &report.modules[0];
        assert_eq!(m.version, "   ");
        assert_eq!(m.issues[0].code, IssueCode::MissingVersion);
    }

    #[test]
    fn non_list_requirements_flags_and_coerces_to_empty() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(
            tmp.path(),
            "plugins",
            "badreqs",
            Some("version: '1'\ntype: plugin\nrequirements: not-a-list\nrepo_url: x\n"),
        );

        let report = scan_root(tmp.path());
        let m = &report.modules[0];
        assert!(m.requirements.is_empty());
        // A non-empty string passes the presence rule even though it is not
        // list-shaped, matching the presence-only contract.
        assert!(m.issues.is_empty());

        write_module(
            tmp.path(),
            "plugins",
            "nullreqs",
            Some("version: '1'\ntype: plugin\nrequirements: null\nrepo_url: x\n"),
        );
        let report = scan_root(tmp.path());
        let m = report
            .modules
            .iter()
            .find(|m| m.name == "nullreqs")
            .expect("nullreqs scanned");
        assert!(m.requirements.is_empty());
        assert_eq!(m.issues[0].code, IssueCode::MissingRequirements);
    }

    #[test]
    fn hidden_and_internal_dirs_are_skipped() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(tmp.path(), "plugins", ".hidden", None);
        write_module(tmp.path(), "plugins", "__pycache__", None);
        fs::write(tmp.path().join("plugins/stray.txt"), "not a module").expect("write file");
        write_module(tmp.path(), "plugins", "real", None);

        let report = scan_root(tmp.path());
        let names: Vec<&str> = report.modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["real"]);
    }

    #[test]
    fn symlinked_module_directories_are_scanned() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("checkouts").join("linked");
        fs::create_dir_all(&target).expect("link target");
        fs::write(
            target.join("init.yaml"),
            "version: '2.0.0'\ntype: plugin\nrequirements: []\nrepo_url: x\n",
        )
        .expect("write manifest");
        fs::create_dir_all(tmp.path().join("plugins")).expect("category dir");
        std::os::unix::fs::symlink(&target, tmp.path().join("plugins/linked"))
            .expect("create symlink");

        let report = scan_root(tmp.path());
        let m = report
            .modules
            .iter()
            .find(|m| m.name == "linked")
            .expect("linked module scanned");
        assert_eq!(m.version, "2.0.0");
        assert!(m.issues.is_empty());
    }

    #[test]
    fn records_follow_category_order_then_name_order() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(tmp.path(), "plugins", "zeta", None);
        write_module(tmp.path(), "plugins", "alpha", None);
        write_module(tmp.path(), "cores", "base", None);

        let report = scan_root(tmp.path());
        let names: Vec<&str> = report.modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["base", "alpha", "zeta"]);
    }

    #[test]
    fn issued_preserves_relative_order_and_totals_add_up() {
        let tmp = TempDir::new().expect("tempdir");
        write_module(
            tmp.path(),
            "plugins",
            "clean",
            Some("version: '1'\ntype: plugin\nrequirements: []\nrepo_url: x\n"),
        );
        write_module(tmp.path(), "plugins", "missing", None);
        write_module(
            tmp.path(),
            "utils",
            "partial",
            Some("version: ''\ntype: ''\nrequirements: []\nrepo_url: x\n"),
        );

        let report = scan_root(tmp.path());
        assert_eq!(report.total_modules(), 3);
        assert_eq!(
            report.total_issues(),
            report.modules.iter().map(|m| m.issues.len()).sum::<usize>()
        );
        let issued: Vec<&str> = report.issued.iter().map(|m| m.name.as_str()).collect();
        let expected: Vec<&str> = report
            .modules
            .iter()
            .filter(|m| !m.issues.is_empty())
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(issued, expected);
        assert_eq!(issued, ["missing", "partial"]);
    }
}
