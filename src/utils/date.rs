// Timestamp helpers: clock reads and local-time rendering

use chrono::{Local, TimeZone, Utc};
use crate::error::{LogWorkError, Result};

/// Display format for timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current time as unsigned 32-bit epoch seconds
pub fn now_ts() -> Result<u32> {
    let now = Utc::now().timestamp();
    u32::try_from(now).map_err(|_| LogWorkError::Clock(now))
}

/// Render epoch seconds as `YYYY-MM-DD HH:MM:SS` in local time
pub fn format_timestamp(ts: u32) -> Result<String> {
    // Ambiguous (DST fold) instants resolve to the earlier reading
    let dt = Local
        .timestamp_opt(i64::from(ts), 0)
        .earliest()
        .ok_or(LogWorkError::Format(ts))?;
    Ok(dt.format(TIMESTAMP_FORMAT).to_string())
}
