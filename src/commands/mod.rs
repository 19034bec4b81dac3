//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `inventory.rs` — scan/list/report/show/categories/config.
//! - `bootstrap.rs` — manifest get/set and initializer runs.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod bootstrap;
pub mod inventory;

pub use bootstrap::handle_bootstrap_commands;
pub use inventory::handle_inventory_commands;
