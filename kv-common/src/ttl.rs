//! # TTL String Format
//!
//! Purpose: convert between the wire format for time-to-live (`"HH:MM"` or
//! `"HH:MM:SS"`) and a plain second count, the way the server and client
//! agree on expiration without shipping a `Duration` over JSON.
//!
//! ## Design Principles
//! 1. **Fail Soft**: any malformed or out-of-range TTL string parses to `0`
//!    (no expiration) rather than rejecting the request; the cache
//!    engine's `TryAdd` treats `ttl <= 0` as "never expires".
//! 2. **Symmetric**: `format_ttl` is the inverse of `parse_ttl` for every
//!    value it can produce, so the client can round-trip a TTL it read
//!    back from the server.

/// Parses a `"HH:MM"` or `"HH:MM:SS"` string into a second count.
///
/// Returns `0` for an empty string, a malformed string, or any component
/// out of range (`H > 23`, `M > 59`, `S > 59`, or negative).
pub fn parse_ttl(ttl: &str) -> i64 {
    if ttl.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = ttl.split(':').collect();
    match parts.as_slice() {
        [h, m] => match (parse_component(h, 23), parse_component(m, 59)) {
            (Some(h), Some(m)) => h * 3600 + m * 60,
            _ => 0,
        },
        [h, m, s] => {
            match (
                parse_component(h, 23),
                parse_component(m, 59),
                parse_component(s, 59),
            ) {
                (Some(h), Some(m), Some(s)) => h * 3600 + m * 60 + s,
                _ => 0,
            }
        }
        _ => 0,
    }
}

/// Formats a second count as `"HH:MM:SS"` for responses that echo TTLs back.
pub fn format_ttl(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

fn parse_component(part: &str, max: i64) -> Option<i64> {
    let value: i64 = part.parse().ok()?;
    if value < 0 || value > max {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hh_mm() {
        assert_eq!(parse_ttl("01:05"), 3900);
    }

    #[test]
    fn parses_hh_mm_ss() {
        assert_eq!(parse_ttl("00:00:01"), 1);
        assert_eq!(parse_ttl("01:05:20"), 3920);
    }

    #[test]
    fn empty_string_means_no_expiry() {
        assert_eq!(parse_ttl(""), 0);
    }

    #[test]
    fn out_of_range_components_yield_zero() {
        assert_eq!(parse_ttl("24:00"), 0);
        assert_eq!(parse_ttl("00:60"), 0);
        assert_eq!(parse_ttl("00:00:60"), 0);
        assert_eq!(parse_ttl("-1:00"), 0);
    }

    #[test]
    fn garbage_yields_zero() {
        assert_eq!(parse_ttl("not-a-duration"), 0);
        assert_eq!(parse_ttl("1:2:3:4"), 0);
    }

    #[test]
    fn format_round_trips_through_parse() {
        let seconds = 3920;
        assert_eq!(parse_ttl(&format_ttl(seconds)), seconds);
    }
}
