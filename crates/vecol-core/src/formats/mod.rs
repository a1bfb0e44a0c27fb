//! Row-oriented text output.
//!
//! - `json_each_row` — one JSON object per row, newline-delimited
//!
//! Value rendering lives with each [`DataType`](crate::data_type::DataType);
//! writers here only add the record framing.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::JsonFormatSettings;
use crate::error::Result;

pub mod json_each_row;

pub use json_each_row::JsonEachRowRowOutput;


/// Liveness marker emitted between data rows of long-running output.
///
/// The timestamp may be advanced from another thread while a writer holds a
/// reference.
#[derive(Debug, Default)]
pub struct Heartbeat {
    timestamp: AtomicU64,
}

impl Heartbeat {
    /// Creates a heartbeat carrying `timestamp`.
    #[must_use]
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp: AtomicU64::new(timestamp),
        }
    }

    /// Creates a heartbeat stamped with the current Unix time in seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::new(unix_now())
    }

    /// Current timestamp.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp.load(Ordering::Acquire)
    }

    /// Sets the timestamp.
    pub fn set_timestamp(&self, timestamp: u64) {
        self.timestamp.store(timestamp, Ordering::Release);
    }

    /// Restamps with the current Unix time.
    pub fn touch(&self) {
        self.set_timestamp(unix_now());
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Renders bytes as a quoted JSON string.
///
/// Invalid UTF-8 sequences become U+FFFD.
pub(crate) fn json_string(bytes: &[u8], settings: &JsonFormatSettings) -> Result<String> {
    let text = String::from_utf8_lossy(bytes);
    let quoted = serde_json::to_string(text.as_ref())?;
    if settings.escape_forward_slashes && quoted.contains('/') {
        return Ok(quoted.replace('/', "\\/"));
    }
    Ok(quoted)
}

/// Writes bytes as a quoted JSON string.
pub(crate) fn write_json_string<W: Write>(
    bytes: &[u8],
    out: &mut W,
    settings: &JsonFormatSettings,
) -> Result<()> {
    let text = String::from_utf8_lossy(bytes);
    if settings.escape_forward_slashes && text.contains('/') {
        out.write_all(json_string(bytes, settings)?.as_bytes())?;
    } else {
        serde_json::to_writer(&mut *out, text.as_ref())?;
    }
    Ok(())
}
