//! Time formatting helpers.

use chrono::{DateTime, Utc};
use fairdice_types::Timestamp;

/// Format a timestamp as `"Oct 17, 14:03:22"` (UTC).
pub fn format_timestamp(ts: Timestamp) -> String {
    let secs = i64::try_from(ts.as_secs()).unwrap_or(i64::MAX);
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%b %-d, %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}

/// Describe how long ago `then` was, relative to `now`.
pub fn relative_time(then: Timestamp, now: Timestamp) -> String {
    let secs = then.elapsed_since(now);
    if secs < 60 {
        "Just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}
