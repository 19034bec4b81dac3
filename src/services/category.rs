use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The five module kinds a project root may contain. The set, its plural
/// directory names, and its iteration order are fixed and never
/// user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Core,
    Manager,
    Plugin,
    Util,
    Integration,
}

/// Registry iteration order. This order drives scan order, and therefore
/// report order.
pub const CATEGORY_ORDER: [CategoryId; 5] = [
    CategoryId::Core,
    CategoryId::Manager,
    CategoryId::Plugin,
    CategoryId::Util,
    CategoryId::Integration,
];

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Core => "core",
            CategoryId::Manager => "manager",
            CategoryId::Plugin => "plugin",
            CategoryId::Util => "util",
            CategoryId::Integration => "integration",
        }
    }

    /// Plural directory name, derived from the singular id.
    pub fn plural(&self) -> String {
        format!("{}s", self.as_str())
    }

    /// Whether modules of this category are surfaced in a workspace view.
    pub fn workspace_visible(&self) -> bool {
        !matches!(self, CategoryId::Core)
    }

    /// Position within [`CATEGORY_ORDER`].
    fn ordinal(&self) -> usize {
        match self {
            CategoryId::Core => 0,
            CategoryId::Manager => 1,
            CategoryId::Plugin => 2,
            CategoryId::Util => 3,
            CategoryId::Integration => 4,
        }
    }

    pub fn parse(id: &str) -> Result<CategoryId, CategoryError> {
        CATEGORY_ORDER
            .into_iter()
            .find(|c| c.as_str() == id)
            .ok_or_else(|| CategoryError::Unrecognized(id.to_string()))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CategoryError {
    #[error("module category not recognized: {0}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub plural: String,
    pub root: PathBuf,
    pub workspace_visible: bool,
}

/// The fixed category set resolved against one project root. Constructed
/// once per resolved root and cached on the [`Context`](crate::services::context::Context).
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<Category>,
}

impl Registry {
    pub fn resolve(root: &Path) -> Registry {
        let categories = CATEGORY_ORDER
            .into_iter()
            .map(|id| Category {
                id,
                plural: id.plural(),
                root: root.join(id.plural()),
                workspace_visible: id.workspace_visible(),
            })
            .collect();
        Registry { categories }
    }

    pub fn get(&self, id: &str) -> Result<&Category, CategoryError> {
        let id = CategoryId::parse(id)?;
        Ok(&self.categories[id.ordinal()])
    }

    /// Categories in the fixed scan order.
    pub fn all(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_names_are_derived() {
        assert_eq!(CategoryId::Core.plural(), "cores");
        assert_eq!(CategoryId::Util.plural(), "utils");
        assert_eq!(CategoryId::Integration.plural(), "integrations");
    }

    #[test]
    fn registry_order_is_stable() {
        let reg = Registry::resolve(Path::new("/proj"));
        let ids: Vec<&str> = reg.all().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["core", "manager", "plugin", "util", "integration"]);
    }

    #[test]
    fn roots_are_direct_children_of_project_root() {
        let reg = Registry::resolve(Path::new("/proj"));
        assert_eq!(reg.get("plugin").unwrap().root, Path::new("/proj/plugins"));
    }

    #[test]
    fn get_returns_the_matching_category_for_every_id() {
        let reg = Registry::resolve(Path::new("/proj"));
        for id in CATEGORY_ORDER {
            assert_eq!(reg.get(id.as_str()).unwrap().id, id);
        }
    }

    #[test]
    fn unknown_category_is_an_error() {
        let reg = Registry::resolve(Path::new("/proj"));
        let err = reg.get("mcp").unwrap_err();
        assert!(err.to_string().contains("not recognized"));
    }

    #[test]
    fn core_is_hidden_from_workspace() {
        let reg = Registry::resolve(Path::new("/proj"));
        assert!(!reg.get("core").unwrap().workspace_visible);
        assert!(reg.get("manager").unwrap().workspace_visible);
    }
}
