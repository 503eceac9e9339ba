pub mod charts;
pub mod text;

pub use text::TextRenderer;

use crate::error::Result;
use serde::Serialize;

/// Pretty JSON for machine consumption on stdout
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
