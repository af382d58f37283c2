//! Lenient number parsing for scraped cells.
//!
//! Missing or malformed figures count as zero: a row without a published
//! volume still ranks, it just ranks last among its transaction peers.

use tracing::warn;

/// Parses a dollar figure such as `"$1,234,500"`. Anything that does not
/// reduce to a finite number yields `0.0`.
pub fn parse_currency(raw: &str) -> f64 {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',')
        .collect();

    match digits.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a transaction count such as `"1,204"`. Unreadable counts are logged
/// and treated as zero.
pub fn parse_count(raw: &str) -> u64 {
    let digits: String = raw.trim().chars().filter(|ch| *ch != ',').collect();
    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<u64>() {
        Ok(value) => value,
        Err(_) => match digits.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value.round() as u64,
            _ => {
                warn!(value = raw, "unreadable transaction count, using zero");
                0
            }
        },
    }
}
