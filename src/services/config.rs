use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.yaml";

/// Per-root settings. Only the module-name-display value is read here; a
/// missing or unreadable config file falls back to defaults and is never
/// load-bearing for a scan.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub module_name: Option<String>,
}

impl Settings {
    pub fn load(root: &Path) -> Settings {
        let path = root.join(CONFIG_FILE);
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Settings::default();
        };
        serde_yaml::from_str(&raw).unwrap_or_default()
    }

    pub fn display_module_name(&self) -> String {
        self.module_name.clone().unwrap_or_else(|| "n/a".to_string())
    }
}
