use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "init.yaml";

/// Manifest read/write failures. The scanner degrades every read failure to
/// a missing-manifest issue; the targeted `manifest get` operation surfaces
/// the variants distinctly so callers can treat NotFound as "create new".
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("manifest is empty or not a key/value document: {0}")]
    Invalid(PathBuf),
    #[error("manifest parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("manifest io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn manifest_path(module_dir: &Path) -> PathBuf {
    module_dir.join(MANIFEST_FILE)
}

/// Read a module directory's init.yaml as a key/value document.
pub fn read_manifest(module_dir: &Path) -> Result<Mapping, ManifestError> {
    let path = manifest_path(module_dir);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ManifestError::NotFound(path))
        }
        Err(e) => return Err(ManifestError::Io { path, source: e }),
    };
    let value: Value = serde_yaml::from_str(&raw).map_err(|e| ManifestError::Parse {
        path: path.clone(),
        source: e,
    })?;
    match value {
        Value::Mapping(m) if !m.is_empty() => Ok(m),
        // Empty files parse to null; treat those like absent manifests.
        _ => Err(ManifestError::Invalid(path)),
    }
}

/// Create or overwrite a module's init.yaml with the given document.
pub fn write_manifest(module_dir: &Path, doc: &Mapping) -> Result<(), ManifestError> {
    let path = manifest_path(module_dir);
    let raw = serde_yaml::to_string(doc).map_err(|e| ManifestError::Parse {
        path: path.clone(),
        source: e,
    })?;
    std::fs::write(&path, raw).map_err(|e| ManifestError::Io { path, source: e })
}

/// Update or create a single field. A missing or unreadable manifest starts
/// from an empty document, so this can bootstrap a new init.yaml.
pub fn set_manifest_field(module_dir: &Path, key: &str, value: Value) -> Result<(), ManifestError> {
    let mut doc = match read_manifest(module_dir) {
        Ok(doc) => doc,
        Err(ManifestError::NotFound(_) | ManifestError::Invalid(_)) => Mapping::new(),
        Err(e) => return Err(e),
    };
    doc.insert(Value::String(key.to_string()), value);
    write_manifest(module_dir, &doc)
}
