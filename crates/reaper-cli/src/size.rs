//! Parsing of human-readable sizes and intervals.

use crate::error::{CliError, Result};
use std::time::Duration;

const KIB: u64 = 1024;

/// Parse a size such as `512`, `100k`, `1024m` or `1g` into bytes.
///
/// Units are case-insensitive and 1024-based: `b`, `k`/`kb`/`kib`,
/// `m`/`mb`/`mib`, `g`/`gb`/`gib`, `t`/`tb`/`tib`. A bare number is bytes.
pub fn parse_size(input: &str) -> Result<u64> {
    let invalid = |reason: &str| CliError::InvalidSize {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (number, unit) = split_number(input.trim());
    if number.is_empty() {
        return Err(invalid("expected a whole number of bytes, optionally with a unit"));
    }

    let value: u64 = number.parse().map_err(|_| invalid("number is out of range"))?;
    let multiplier = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => KIB,
        "m" | "mb" | "mib" => KIB.pow(2),
        "g" | "gb" | "gib" => KIB.pow(3),
        "t" | "tb" | "tib" => KIB.pow(4),
        _ => return Err(invalid("unknown unit (expected b, k, m, g or t)")),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| invalid("size overflows 64 bits"))
}

/// Parse an interval such as `30s`, `5m`, `1h` or `1d`.
///
/// A bare number is seconds. The result must be a non-zero whole number of
/// seconds, so `2000ms` is accepted and `1500ms` is not.
pub fn parse_interval(input: &str) -> Result<Duration> {
    let invalid = |reason: &str| CliError::InvalidInterval {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (number, unit) = split_number(input.trim());
    if number.is_empty() {
        return Err(invalid("expected a whole number, optionally with a unit"));
    }

    let value: u64 = number.parse().map_err(|_| invalid("number is out of range"))?;
    let duration = match unit.to_ascii_lowercase().as_str() {
        "ms" => Some(Duration::from_millis(value)),
        "" | "s" => Some(Duration::from_secs(value)),
        "m" => value.checked_mul(60).map(Duration::from_secs),
        "h" => value.checked_mul(3600).map(Duration::from_secs),
        "d" => value.checked_mul(86_400).map(Duration::from_secs),
        _ => return Err(invalid("unknown unit (expected ms, s, m, h or d)")),
    }
    .ok_or_else(|| invalid("interval is too large"))?;

    if duration < Duration::from_secs(1) {
        return Err(invalid("interval must be at least one second"));
    }
    if duration.subsec_nanos() != 0 {
        return Err(invalid("interval must be a whole number of seconds"));
    }
    Ok(duration)
}

/// Format a byte count with the largest unit that keeps it above one.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= KIB as f64 && unit < UNITS.len() - 1 {
        value /= KIB as f64;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn split_number(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    (&s[..end], s[end..].trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("512b").unwrap(), 512);
        assert_eq!(parse_size("100k").unwrap(), 100 * 1024);
        assert_eq!(parse_size("1024m").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("1g").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("2GiB").unwrap(), 2 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1t").unwrap(), 1024u64.pow(4));
        assert_eq!(parse_size(" 10 mb ").unwrap(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("g").is_err());
        assert!(parse_size("-1g").is_err());
        assert!(parse_size("1.5g").is_err());
        assert!(parse_size("10x").is_err());
        assert!(parse_size("lots").is_err());
    }

    #[test]
    fn test_parse_size_overflow() {
        let err = parse_size("99999999999t").unwrap_err();
        assert!(err.to_string().contains("overflows"));
        assert!(parse_size("99999999999999999999999").is_err());
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_interval("1d").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_interval("2000ms").unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_interval_rejects_zero_and_garbage() {
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("500ms").is_err());
        let err = parse_interval("1500ms").unwrap_err();
        assert!(err.to_string().contains("whole number of seconds"));
        assert!(parse_interval("").is_err());
        assert!(parse_interval("1w").is_err());
        assert!(parse_interval("soon").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0 GiB");
    }
}
