//! Request handlers

mod health;
mod ingest;
mod query;

pub use health::health_check;
pub use ingest::ingest;
pub use query::query;

use chrono::Local;

/// Formats the response timestamp as a 24-hour clock time
pub(crate) fn format_update_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
