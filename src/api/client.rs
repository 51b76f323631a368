use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use super::models::{ApiError, RichListOrder, StatusQuery};
use crate::config::Config;

/// Read-only client for the explorer HTTP API.
///
/// Every operation is a single GET against the configured base URL and
/// resolves to the JSON body exactly as the backend sent it. No caching,
/// no retries, no deduplication of concurrent requests; callers see
/// transport failures and non-2xx statuses as [`ApiError`] values.
#[derive(Clone, Debug)]
pub struct ExplorerClient {
    http: HttpClient,
    base_url: Url,
}

impl ExplorerClient {
    /// Build a client from the runtime config. The base URL is resolved
    /// here once and stays immutable for the client's lifetime.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.api_base()?;
        let http = HttpClient::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    /// Client against an explicit base URL with default HTTP settings
    /// (used by tests and tools).
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL. Segments are percent-escaped,
    /// so caller-supplied identifiers never reach the wire as raw path text.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::UnusablePath {
                base: self.base_url.to_string(),
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// GET `/txs/{address}`
    ///
    /// Recent transactions touching an address, newest first. The address
    /// format is not validated here; the backend decides what it accepts.
    pub async fn get_transactions(&self, address: &str) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["txs", address])?).await
    }

    /// GET `/tx/{txid}` - a single transaction by id.
    pub async fn get_transaction(&self, txid: &str) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["tx", txid])?).await
    }

    /// GET `/status?q=...` - chain status snapshot.
    pub async fn get_status(&self, query: StatusQuery) -> Result<Value, ApiError> {
        let mut url = self.endpoint(&["status"])?;
        url.query_pairs_mut().append_pair("q", query.query_value());
        self.get_json(url).await
    }

    /// GET `/blocks` - recent blocks, newest first. The backend caps
    /// `limit` at 100.
    pub async fn get_blocks(&self, before_height: Option<u64>, limit: u32) -> Result<Value, ApiError> {
        let mut url = self.endpoint(&["blocks"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(height) = before_height {
                query.append_pair("beforeBlock", &height.to_string());
            }
            query.append_pair("limit", &limit.to_string());
        }
        self.get_json(url).await
    }

    /// GET `/block/{blockhash}` - one block with its transactions.
    pub async fn get_block(&self, blockhash: &str) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["block", blockhash])?).await
    }

    /// GET `/richlist?order=...` - top 100 addresses.
    pub async fn get_rich_list(&self, order: RichListOrder) -> Result<Value, ApiError> {
        let mut url = self.endpoint(&["richlist"])?;
        url.query_pairs_mut().append_pair("order", order.query_value());
        self.get_json(url).await
    }

    /// GET `/addr/{address}/balance`
    pub async fn get_address_balance(&self, address: &str) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["addr", address, "balance"])?).await
    }

    /// GET `/mempool` - unconfirmed transactions.
    pub async fn get_mempool(&self) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["mempool"])?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ExplorerClient) {
        let server = MockServer::start().await;
        let base = Url::parse(&server.uri()).unwrap();
        (server, ExplorerClient::with_base_url(base))
    }

    #[tokio::test]
    async fn test_get_transactions_returns_body_verbatim() {
        let (server, client) = setup().await;
        let body = json!({
            "count": 2,
            "lastTime": 1700000000,
            "txs": [
                {"txid": "aa11", "valueOut": 12.5},
                {"txid": "bb22", "valueOut": 0.1}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/txs/TUXburnaddress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.get_transactions("TUXburnaddress").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_transaction_returns_body_verbatim() {
        let (server, client) = setup().await;
        let txid = "f2ca1bb6c7e907d06dafe4687e579fce76b37e4e93b7605022da52e6ccc26fd2";
        let body = json!({
            "txid": txid,
            "blockhash": "0000000000000aa3",
            "blockheight": 421000,
            "confirmations": 12,
            "isCoinBase": false,
            "valueOut": 50.0,
            "addresses_in": {"TUXsender": 50.0},
            "addresses_out": {"TUXreceiver": 50.0}
        });

        Mock::given(method("GET"))
            .and(path(format!("/tx/{txid}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.get_transaction(txid).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_transaction_not_found_is_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/tx/unknown"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let result = client.get_transaction("unknown").await;

        match result {
            Err(ApiError::Http { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected HTTP error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_get_transactions_server_error_is_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/txs/TUXaddr"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = client.get_transactions("TUXaddr").await;

        match result {
            Err(ApiError::Http { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected HTTP error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on this port
        let client = ExplorerClient::with_base_url(Url::parse("http://127.0.0.1:9").unwrap());

        let result = client.get_transaction("abc").await;

        assert!(matches!(result, Err(ApiError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/txs/TUXaddr"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client.get_transactions("TUXaddr").await;

        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_lookups_resolve_independently() {
        let (server, client) = setup().await;
        let alice_body = json!({"count": 1, "txs": [{"txid": "alice-tx"}]});
        let bob_body = json!({"count": 1, "txs": [{"txid": "bob-tx"}]});

        Mock::given(method("GET"))
            .and(path("/txs/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_body.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/txs/bob"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bob_body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let (alice, bob) = tokio::join!(client.get_transactions("alice"), client.get_transactions("bob"));

        assert_eq!(alice.unwrap(), alice_body);
        assert_eq!(bob.unwrap(), bob_body);
    }

    #[tokio::test]
    async fn test_get_status_sends_query_param() {
        let (server, client) = setup().await;
        let body = json!({
            "blocks": 421000,
            "lastblockhash": "0000000000000aa3",
            "difficulty": 1234.56,
            "mempool_txs": 3
        });

        Mock::given(method("GET"))
            .and(path("/status"))
            .and(query_param("q", "getInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.get_status(StatusQuery::Info).await;

        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_blocks_sends_paging_params() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/blocks"))
            .and(query_param("beforeBlock", "421000"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.get_blocks(Some(421000), 25).await;

        assert_eq!(result.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_get_rich_list_sends_order() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/richlist"))
            .and(query_param("order", "received"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let result = client.get_rich_list(RichListOrder::Received).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_address_balance_path() {
        let (server, client) = setup().await;
        let body = json!({"address": "TUXaddr", "balance": 10.0, "unconfirmed": 0.0});

        Mock::given(method("GET"))
            .and(path("/addr/TUXaddr/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let result = client.get_address_balance("TUXaddr").await;

        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_block_path() {
        let (server, client) = setup().await;
        let hash = "0000000000000aa3";
        let body = json!({"height": 421000, "hash": hash, "txs": []});

        Mock::given(method("GET"))
            .and(path(format!("/block/{hash}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.get_block(hash).await;

        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_mempool_returns_body_verbatim() {
        let (server, client) = setup().await;
        let body = json!([{"txid": "pending1", "fee": 0.001}]);

        Mock::given(method("GET"))
            .and(path("/mempool"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.get_mempool().await;

        assert_eq!(result.unwrap(), body);
    }

    #[test]
    fn test_endpoint_escapes_path_segments() {
        let client = ExplorerClient::with_base_url(Url::parse("http://localhost:8000").unwrap());

        let url = client.endpoint(&["txs", "a/b c?d"]).unwrap();

        assert_eq!(url.path(), "/txs/a%2Fb%20c%3Fd");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_endpoint_respects_base_path_prefix() {
        let client =
            ExplorerClient::with_base_url(Url::parse("http://localhost:8000/explorer/").unwrap());

        let url = client.endpoint(&["tx", "abc"]).unwrap();

        assert_eq!(url.path(), "/explorer/tx/abc");
    }

    #[test]
    fn test_endpoint_rejects_cannot_be_a_base_url() {
        let client = ExplorerClient::with_base_url(Url::parse("mailto:nobody@example.com").unwrap());

        let result = client.endpoint(&["tx", "abc"]);

        assert!(matches!(result, Err(ApiError::UnusablePath { .. })));
    }
}
