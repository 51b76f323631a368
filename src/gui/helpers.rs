//! Display helpers for amounts, hashes, and timestamps.

use chrono::{TimeZone, Utc};

/// Format a coin amount for display, trimming trailing zeros but keeping
/// at least one decimal place.
pub fn format_coin(amount: f64, ticker: &str) -> String {
    let mut text = format!("{:.8}", amount);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.push('0');
    }
    format!("{} {}", text, ticker)
}

/// Shorten a hash or address for table display: first and last six
/// characters with an ellipsis. Short identifiers pass through unchanged.
pub fn short_hash(hash: &str) -> String {
    if hash.len() <= 16 {
        hash.to_string()
    } else {
        format!("{}…{}", &hash[..6], &hash[hash.len() - 6..])
    }
}

/// Render a unix timestamp as UTC wall-clock time.
pub fn format_timestamp(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("@{}", secs),
    }
}

/// Confirmation count for display. The backend reports -1 for mempool
/// transactions.
pub fn confirmations_text(confirmations: i64) -> String {
    if confirmations < 0 {
        "unconfirmed".to_string()
    } else if confirmations == 1 {
        "1 confirmation".to_string()
    } else {
        format!("{} confirmations", confirmations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== format_coin tests ====================

    #[test]
    fn test_format_coin_whole() {
        assert_eq!(format_coin(50.0, "TUX"), "50.0 TUX");
    }

    #[test]
    fn test_format_coin_trims_trailing_zeros() {
        assert_eq!(format_coin(12.50000000, "TUX"), "12.5 TUX");
    }

    #[test]
    fn test_format_coin_keeps_small_amounts() {
        assert_eq!(format_coin(0.00000001, "BTC"), "0.00000001 BTC");
    }

    // ==================== short_hash tests ====================

    #[test]
    fn test_short_hash_long() {
        let hash = "f2ca1bb6c7e907d06dafe4687e579fce76b37e4e93b7605022da52e6ccc26fd2";
        assert_eq!(short_hash(hash), "f2ca1b…c26fd2");
    }

    #[test]
    fn test_short_hash_short_passthrough() {
        assert_eq!(short_hash("abc123"), "abc123");
    }

    // ==================== format_timestamp tests ====================

    #[test]
    fn test_format_timestamp_epoch() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_timestamp_known_instant() {
        assert_eq!(format_timestamp(1700000000), "2023-11-14 22:13:20");
    }

    // ==================== confirmations_text tests ====================

    #[test]
    fn test_confirmations_mempool() {
        assert_eq!(confirmations_text(-1), "unconfirmed");
    }

    #[test]
    fn test_confirmations_singular() {
        assert_eq!(confirmations_text(1), "1 confirmation");
    }

    #[test]
    fn test_confirmations_plural() {
        assert_eq!(confirmations_text(12), "12 confirmations");
    }
}
