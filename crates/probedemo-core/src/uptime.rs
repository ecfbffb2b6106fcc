//! ISO-8601 rendering of uptime durations (`PT1H2M3.5S`).

use std::fmt::Write;
use std::time::Duration;

/// Render a duration at millisecond precision as an ISO-8601 duration.
///
/// Zero renders as `PT0S`; trailing zero fraction digits are dropped and the
/// seconds component is omitted when it is zero and a larger unit is present.
pub fn iso8601(d: Duration) -> String {
    let total_ms = d.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;

    if total_ms == 0 {
        return "PT0S".to_string();
    }

    let mut out = String::from("PT");
    if hours > 0 {
        let _ = write!(out, "{hours}H");
    }
    if minutes > 0 {
        let _ = write!(out, "{minutes}M");
    }
    if seconds == 0 && millis == 0 {
        return out;
    }
    let _ = write!(out, "{seconds}");
    if millis > 0 {
        let frac = format!("{millis:03}");
        let _ = write!(out, ".{}", frac.trim_end_matches('0'));
    }
    out.push('S');
    out
}
