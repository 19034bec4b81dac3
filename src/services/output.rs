//! Output wiring shared by the command handlers.
//!
//! Every command emits either plain text (tab rows for listings, one
//! confirmation line for mutations) or the `{ok, data}` JSON envelope,
//! selected by the global `--json` flag. Handlers pick the shape; the
//! envelope itself is defined once in `domain::models::JsonOut`.

use crate::domain::models::JsonOut;
use serde::Serialize;

/// Print any serializable payload inside the `{ok, data}` envelope.
pub fn emit_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

/// Listing output: one tab row per record in text mode, the envelope
/// around the whole slice otherwise.
pub fn emit_rows<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(&data);
    }
    for d in data {
        println!("{}", row(d));
    }
    Ok(())
}

/// Single-result output: one confirmation line in text mode, the envelope
/// otherwise.
pub fn emit_one<T: Serialize>(
    json: bool,
    data: T,
    line: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(&data);
    }
    println!("{}", line(&data));
    Ok(())
}
