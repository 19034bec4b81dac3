use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::models::Report;
use crate::services::category::Registry;
use crate::services::scanner::{resolve_root, scan};

/// Per-root caches, owned by the entry point and passed by reference to
/// whatever needs them. Single-threaded by design: check-then-store is not
/// atomic and there is no internal locking.
#[derive(Default)]
pub struct Context {
    registries: HashMap<PathBuf, Rc<Registry>>,
    reports: HashMap<PathBuf, Rc<Report>>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// The category registry for a resolved root, constructed on first use.
    pub fn registry(&mut self, root: &Path) -> Rc<Registry> {
        let key = resolve_root(root);
        Rc::clone(
            self.registries
                .entry(key.clone())
                .or_insert_with(|| Rc::new(Registry::resolve(&key))),
        )
    }

    /// Rescan, overwriting any cached report for this root.
    pub fn scan(&mut self, root: &Path) -> Rc<Report> {
        let key = resolve_root(root);
        let registry = self.registry(&key);
        let report = Rc::new(scan(&registry, &key));
        self.reports.insert(key, Rc::clone(&report));
        report
    }

    /// The cached report for this root, scanning once if none exists yet.
    pub fn list(&mut self, root: &Path) -> Rc<Report> {
        let key = resolve_root(root);
        if let Some(report) = self.reports.get(&key) {
            return Rc::clone(report);
        }
        self.scan(&key)
    }
}
