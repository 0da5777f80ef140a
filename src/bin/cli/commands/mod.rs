pub mod archive;
pub mod books;
pub mod courses;
pub mod dashboard;
pub mod movies;
pub mod search;
pub mod study;
pub mod todos;

use anyhow::Result;
use serde::Serialize;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Last eight characters of an id, the random part, enough to address it from the CLI
pub fn short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(8);
    id.get(start..).unwrap_or(id)
}
