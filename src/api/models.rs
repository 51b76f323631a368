use thiserror::Error;

/// Query selector for the backend's `/status` endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusQuery {
    /// Chain tip height, best hash, difficulty, and mempool size
    Info,
    BestBlockHash,
    Difficulty,
    LastBlockHash,
}

impl StatusQuery {
    /// Value of the `q` query parameter the backend dispatches on
    pub fn query_value(&self) -> &'static str {
        match self {
            StatusQuery::Info => "getInfo",
            StatusQuery::BestBlockHash => "getBestBlockHash",
            StatusQuery::Difficulty => "getDifficulty",
            StatusQuery::LastBlockHash => "getLastBlockHash",
        }
    }
}

/// Sort order for the `/richlist` endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RichListOrder {
    Balance,
    Sent,
    Received,
}

impl RichListOrder {
    pub fn query_value(&self) -> &'static str {
        match self {
            RichListOrder::Balance => "balance",
            RichListOrder::Sent => "sent",
            RichListOrder::Received => "received",
        }
    }
}

impl Default for RichListOrder {
    fn default() -> Self {
        RichListOrder::Balance
    }
}

/// Errors surfaced by the explorer API client.
///
/// Transport failures and non-2xx statuses propagate to the caller
/// untouched; there is no retry or local recovery.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("API base URL '{base}' cannot carry a path")]
    UnusablePath { base: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status of the response, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_query_values() {
        assert_eq!(StatusQuery::Info.query_value(), "getInfo");
        assert_eq!(StatusQuery::BestBlockHash.query_value(), "getBestBlockHash");
        assert_eq!(StatusQuery::Difficulty.query_value(), "getDifficulty");
        assert_eq!(StatusQuery::LastBlockHash.query_value(), "getLastBlockHash");
    }

    #[test]
    fn test_rich_list_order_values() {
        assert_eq!(RichListOrder::Balance.query_value(), "balance");
        assert_eq!(RichListOrder::Sent.query_value(), "sent");
        assert_eq!(RichListOrder::Received.query_value(), "received");
    }

    #[test]
    fn test_rich_list_order_default_is_balance() {
        assert_eq!(RichListOrder::default(), RichListOrder::Balance);
    }

    #[test]
    fn test_http_error_display_carries_status() {
        let err = ApiError::Http {
            url: "http://localhost:8000/tx/abc".to_string(),
            status: 404,
            body: "Not Found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("/tx/abc"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_invalid_base_url_has_no_status() {
        let err = ApiError::UnusablePath {
            base: "mailto:nobody".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
