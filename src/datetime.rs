//! Date/time utilities for castfeed.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

/// RFC 1123 with a numeric zone, e.g. "Wed, 01 Jan 2025 00:00:00 +0000".
pub const RFC1123Z: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Whether `timezone` names a zone in the IANA database.
pub fn is_known_timezone(timezone: &str) -> bool {
    timezone.parse::<Tz>().is_ok()
}

/// Format a DateTime<Utc> as an RFC 1123 publish date in the specified timezone.
///
/// # Arguments
///
/// * `dt` - DateTime in UTC
/// * `timezone` - Timezone name (e.g., "UTC", "America/Chicago")
///
/// # Returns
///
/// Formatted date string. Unknown timezones fall back to UTC.
pub fn format_pub_date(dt: &DateTime<Utc>, timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => dt.with_timezone(&tz).format(RFC1123Z).to_string(),
        Err(_) => dt.format(RFC1123Z).to_string(),
    }
}

/// Parse an RFC 1123 / RFC 2822 publish date.
///
/// Returns `None` if the string is not a valid date.
pub fn parse_pub_date(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(s.trim()).ok()
}
