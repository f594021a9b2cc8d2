use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse the timestamp formats the federation API mixes across endpoints
pub fn parse_timestamp(date_str: &str) -> Result<NaiveDateTime> {
    let trimmed = date_str.trim();

    // Try RFC3339 format (with timezone)
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    // Try naive datetime format (without timezone)
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    // Try with fractional seconds
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }

    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    anyhow::bail!("Failed to parse date: {}", date_str)
}

/// Signed difference in seconds at millisecond resolution
pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    end.signed_duration_since(start).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_supported_formats() {
        let rfc = parse_timestamp("2024-05-01T10:00:00.250Z").unwrap();
        let naive = parse_timestamp("2024-05-01T10:00:00").unwrap();
        let fractional = parse_timestamp("2024-05-01T10:00:01.5").unwrap();
        let date_only = parse_timestamp("2024-05-01").unwrap();

        assert_eq!(seconds_between(naive, rfc), 0.25);
        assert_eq!(seconds_between(naive, fractional), 1.5);
        assert_eq!(seconds_between(date_only, naive), 36000.0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
