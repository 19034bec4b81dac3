//! Service layer containing the discovery engine and side-effect helpers.
//!
//! ## Service map
//! - `category.rs` — the fixed five-category registry and root derivation.
//! - `issues.rs` — issue codes, message templates, manifest presence rules.
//! - `manifest.rs` — init.yaml read/write with distinct failure variants.
//! - `scanner.rs` — category walk, record construction, coercions.
//! - `context.rs` — per-root registry/report caches owned by the entry point.
//! - `report.rs` — summary line rendering.
//! - `runner.rs` — initializer execution behind the `Launcher` seam.
//! - `config.rs` — per-root settings lookup.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod category;
pub mod config;
pub mod context;
pub mod issues;
pub mod manifest;
pub mod output;
pub mod report;
pub mod runner;
pub mod scanner;
