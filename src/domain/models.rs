use serde::Serialize;
use std::path::PathBuf;

use crate::services::category::CategoryId;
use crate::services::issues::IssueCode;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One validation finding, immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    pub message: String,
    /// The manifest file the issue pertains to.
    pub file: PathBuf,
}

/// One discovered module directory. `path` is always an immediate child of
/// its category's root; `issues` is empty only if no validation rule fired.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRecord {
    pub name: String,
    pub version: String,
    pub category: CategoryId,
    pub path: PathBuf,
    pub repo_url: Option<String>,
    pub requirements: Vec<String>,
    pub issues: Vec<Issue>,
}

/// Aggregate of one scan across all categories. Read-only after
/// construction; `issued` is exactly the records from `modules` with a
/// non-empty issue list, in the same relative order.
#[derive(Debug, Serialize)]
pub struct Report {
    pub modules: Vec<ModuleRecord>,
    pub issued: Vec<ModuleRecord>,
    /// Resolved project root, used for relative-path display.
    pub root: PathBuf,
}

impl Report {
    pub fn total_modules(&self) -> usize {
        self.modules.len()
    }

    pub fn total_issues(&self) -> usize {
        self.modules.iter().map(|m| m.issues.len()).sum()
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub id: CategoryId,
    pub plural: String,
    pub root: PathBuf,
    pub workspace_visible: bool,
}

/// Outcome of one `init run` / `init run-all` invocation.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub attempted: usize,
    pub ran: usize,
    pub skipped: usize,
}
