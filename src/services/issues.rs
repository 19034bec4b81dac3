use serde::Serialize;
use serde_yaml::Value;
use std::fmt;
use std::path::Path;

use crate::domain::models::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    MissingManifest,
    MissingVersion,
    MissingType,
    MissingRequirements,
    MissingRepoUrl,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MissingManifest => "missing-manifest",
            IssueCode::MissingVersion => "missing-version",
            IssueCode::MissingType => "missing-type",
            IssueCode::MissingRequirements => "missing-requirements",
            IssueCode::MissingRepoUrl => "missing-repo-url",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            IssueCode::MissingManifest => {
                "Module is missing init.yaml. Please add an init.yaml file with the required metadata keys."
            }
            IssueCode::MissingVersion => {
                "Module is missing '{key}' in init.yaml. Specify a semantic version such as '0.0.1' under the '{key}' key."
            }
            IssueCode::MissingType => {
                "Module is missing '{key}' in init.yaml. Set the module's type (core, manager, plugin, util, integration) under the '{key}' key."
            }
            IssueCode::MissingRequirements => {
                "Module is missing '{key}' in init.yaml. Include a list (can be empty) of required modules under the '{key}' key."
            }
            IssueCode::MissingRepoUrl => {
                "Module is missing '{key}' in init.yaml. Please add a canonical repository URL under the '{key}' key."
            }
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four manifest keys subject to presence validation, with their issue
/// codes, in the order the checks run.
pub const REQUIRED_KEYS: [(&str, IssueCode); 4] = [
    ("version", IssueCode::MissingVersion),
    ("type", IssueCode::MissingType),
    ("requirements", IssueCode::MissingRequirements),
    ("repo_url", IssueCode::MissingRepoUrl),
];

/// Render one issue. `key` substitutes the `{key}` placeholder in the
/// message template; `file` is the manifest path the issue pertains to.
pub fn issue_for(code: IssueCode, file: &Path, key: Option<&str>) -> Issue {
    let message = match key {
        Some(k) => code.template().replace("{key}", k),
        None => code.template().to_string(),
    };
    Issue {
        code,
        message,
        file: file.to_path_buf(),
    }
}

/// Presence rule for one manifest value: strings count only if non-empty
/// after trimming, null/absent never counts, anything else always counts
/// (an empty requirements list is present).
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Apply the presence rule to the four recognized keys of a parsed manifest.
/// Keys outside the recognized set are ignored; at most four issues result.
pub fn validate_manifest(doc: &serde_yaml::Mapping, manifest_path: &Path) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (key, code) in REQUIRED_KEYS {
        let value = doc.get(key);
        if !is_present(value) {
            issues.push(issue_for(code, manifest_path, Some(key)));
        }
    }
    issues
}
