//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep record/report/output structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types are data-only: no filesystem or process side effects.

pub mod models;
