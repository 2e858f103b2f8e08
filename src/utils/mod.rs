//! Project-specific utilities live here.

pub mod date_time;
pub mod patch;

pub use date_time::{format_local_date_time, parse_local_date_time, InvalidDateFormat};
pub use patch::Patch;

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("folio::{module}")
}
