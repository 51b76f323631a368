use std::env;
use std::time::Duration;
use url::Url;

use crate::api::models::ApiError;

/// A coin whose explorer backend this dashboard can point at, with label
/// and a default API endpoint.
#[derive(Clone, Debug)]
pub struct CoinPreset {
    pub ticker: &'static str,
    pub label: &'static str,
    pub default_api_url: &'static str,
}

impl CoinPreset {
    pub const fn new(ticker: &'static str, label: &'static str, default_api_url: &'static str) -> Self {
        Self {
            ticker,
            label,
            default_api_url,
        }
    }
}

/// Coins indexed by the explorer backend family.
pub const COINS: &[CoinPreset] = &[
    CoinPreset::new("TUX", "Tuxcoin", "https://api.tuxcoin.io"),
    CoinPreset::new("BTC", "Bitcoin", "http://localhost:8000"),
    CoinPreset::new("LTC", "Litecoin", "http://localhost:8001"),
    CoinPreset::new("DOGE", "Dogecoin", "http://localhost:8002"),
];

/// Find a coin preset by ticker (case-insensitive)
pub fn find_coin(ticker: &str) -> Option<&'static CoinPreset> {
    COINS.iter().find(|c| c.ticker.eq_ignore_ascii_case(ticker))
}

/// Find the index of a coin preset in COINS by ticker
pub fn find_coin_index(ticker: &str) -> Option<usize> {
    COINS.iter().position(|c| c.ticker.eq_ignore_ascii_case(ticker))
}

pub const DEFAULT_COIN_TICKER: &str = "TUX";

/// How often the status feed asks the backend for a fresh snapshot.
pub const DEFAULT_STATUS_REFRESH_SECS: u64 = 10;

/// Per-request HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub coin_ticker: String,
    pub status_refresh_secs: u64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn new(api_url: String, coin_ticker: String) -> Self {
        Self {
            api_url,
            coin_ticker,
            status_refresh_secs: DEFAULT_STATUS_REFRESH_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    pub fn from_coin(coin: &CoinPreset) -> Self {
        Self::new(coin.default_api_url.to_string(), coin.ticker.to_string())
    }

    /// Build a config from the process environment, falling back to the
    /// default coin preset for anything unset.
    pub fn from_env() -> Self {
        let coin_ticker = env::var("CHAINVIEW_COIN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COIN_TICKER.to_string());

        let api_url = env::var("CHAINVIEW_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| find_coin(&coin_ticker).map(|c| c.default_api_url.to_string()))
            .unwrap_or_else(|| "http://localhost:8000".to_string());

        let status_refresh_secs = env::var("CHAINVIEW_STATUS_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_STATUS_REFRESH_SECS);

        let http_timeout_secs = env::var("CHAINVIEW_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            api_url,
            coin_ticker,
            status_refresh_secs,
            http_timeout_secs,
        }
    }

    /// Parse the configured API base URL. Resolved once when the client is
    /// built; the client keeps it immutable afterwards.
    pub fn api_base(&self) -> Result<Url, ApiError> {
        Url::parse(self.api_url.trim()).map_err(|source| ApiError::InvalidBaseUrl {
            url: self.api_url.clone(),
            source,
        })
    }

    pub fn coin(&self) -> Option<&'static CoinPreset> {
        find_coin(&self.coin_ticker)
    }

    pub fn coin_label(&self) -> &str {
        self.coin().map(|c| c.label).unwrap_or("Unknown")
    }

    pub fn status_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.status_refresh_secs.max(1))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        // Tuxcoin is the reference deployment of the backend
        if let Some(coin) = find_coin(DEFAULT_COIN_TICKER) {
            Self::from_coin(coin)
        } else {
            Self::new("http://localhost:8000".to_string(), DEFAULT_COIN_TICKER.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== find_coin tests ====================

    #[test]
    fn test_find_coin_tux() {
        let coin = find_coin("TUX");
        assert!(coin.is_some());
        let coin = coin.unwrap();
        assert_eq!(coin.label, "Tuxcoin");
        assert_eq!(coin.ticker, "TUX");
    }

    #[test]
    fn test_find_coin_case_insensitive() {
        let coin = find_coin("tux");
        assert!(coin.is_some());
        assert_eq!(coin.unwrap().ticker, "TUX");
    }

    #[test]
    fn test_find_coin_not_found() {
        assert!(find_coin("XMR").is_none());
    }

    #[test]
    fn test_find_coin_index_first() {
        assert_eq!(find_coin_index("TUX"), Some(0)); // Tuxcoin is first in the list
    }

    #[test]
    fn test_find_coin_index_not_found() {
        assert_eq!(find_coin_index("XMR"), None);
    }

    // ==================== Config tests ====================

    #[test]
    fn test_default_config_uses_tuxcoin() {
        let config = Config::default();
        assert_eq!(config.coin_ticker, "TUX");
        assert_eq!(config.coin_label(), "Tuxcoin");
        assert_eq!(config.status_refresh_secs, DEFAULT_STATUS_REFRESH_SECS);
    }

    #[test]
    fn test_api_base_valid() {
        let config = Config::new("http://localhost:8000".to_string(), "TUX".to_string());
        let base = config.api_base().unwrap();
        assert_eq!(base.scheme(), "http");
        assert_eq!(base.port(), Some(8000));
    }

    #[test]
    fn test_api_base_trims_whitespace() {
        let config = Config::new("  http://localhost:8000  ".to_string(), "TUX".to_string());
        assert!(config.api_base().is_ok());
    }

    #[test]
    fn test_api_base_invalid() {
        let config = Config::new("not a url".to_string(), "TUX".to_string());
        let err = config.api_base();
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("not a url"));
    }

    #[test]
    fn test_coin_label_unknown_ticker() {
        let config = Config::new("http://localhost:8000".to_string(), "XYZ".to_string());
        assert_eq!(config.coin_label(), "Unknown");
    }

    #[test]
    fn test_refresh_interval_never_zero() {
        let mut config = Config::default();
        config.status_refresh_secs = 0;
        assert_eq!(config.status_refresh_interval(), Duration::from_secs(1));
    }
}
