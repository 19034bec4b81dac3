use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = make_fixture_project(tmp.path());
        Self { _tmp: tmp, root }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("modctl").expect("binary built");
        cmd.arg("--root").arg(&self.root);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write_module(&self, category: &str, name: &str, manifest: Option<&str>) -> PathBuf {
        write_module(&self.root, category, name, manifest)
    }
}

pub fn write_module(root: &Path, category: &str, name: &str, manifest: Option<&str>) -> PathBuf {
    let dir = root.join(category).join(name);
    fs::create_dir_all(&dir).expect("create module dir");
    if let Some(yaml) = manifest {
        fs::write(dir.join("init.yaml"), yaml).expect("write manifest");
    }
    dir
}

fn make_fixture_project(base: &Path) -> PathBuf {
    let root = base.join("project");
    fs::create_dir_all(&root).expect("create project root");

    write_module(
        &root,
        "cores",
        "yaml_reading_core",
        Some("version: '1.1.0'\ntype: core\nrequirements: []\nrepo_url: https://example.com/yaml-reading\n"),
    );
    write_module(
        &root,
        "plugins",
        "commit-helper",
        Some("version: '1.0.0'\ntype: plugin\nrequirements: [yaml_reading_core]\nrepo_url: https://example.com/commit-helper\n"),
    );
    // Known-bad fixtures: no manifest at all, and an empty repo_url.
    write_module(&root, "managers", "foo", None);
    write_module(
        &root,
        "plugins",
        "bar",
        Some("version: '1.0.0'\ntype: plugin\nrequirements: []\nrepo_url: ''\n"),
    );

    root
}
