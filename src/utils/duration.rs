// Work-time duration formatting
// A "day" is an 8 hour workday and a "week" is a 5 day workweek

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_WORKDAY: u64 = 8 * SECS_PER_HOUR;
pub const SECS_PER_WORKWEEK: u64 = 5 * SECS_PER_WORKDAY;

/// Break a duration into work weeks, work days, hours, minutes and seconds
pub fn split_duration(secs: u64) -> (u64, u64, u64, u64, u64) {
    let weeks = secs / SECS_PER_WORKWEEK;
    let mut rest = secs % SECS_PER_WORKWEEK;
    let days = rest / SECS_PER_WORKDAY;
    rest %= SECS_PER_WORKDAY;
    let hours = rest / SECS_PER_HOUR;
    rest %= SECS_PER_HOUR;
    let minutes = rest / SECS_PER_MINUTE;
    (weeks, days, hours, minutes, rest % SECS_PER_MINUTE)
}

/// Format a duration as `{w}w {d}d {h}h {m}m {s}s`
pub fn format_duration(secs: u64) -> String {
    let (w, d, h, m, s) = split_duration(secs);
    format!("{}w {}d {}h {}m {}s", w, d, h, m, s)
}
