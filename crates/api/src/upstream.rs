//! Upstream market-data client.
//!
//! Forwards one listings request per call and returns the upstream `data`
//! array untouched; the server does not interpret listing records.

use crate::config::ServerConfig;
use crate::error::ApiError;
use coinboard_domain::{CurrencyCode, ListingCategory};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const USER_AGENT: &str = "Mozilla/5.0";

/// Client for the upstream listings endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    listing_limit: u32,
}

impl UpstreamClient {
    /// # Errors
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            listing_limit: config.listing_limit,
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Query parameters for one listings call.
    fn listing_query(
        &self,
        currency: &CurrencyCode,
        category: Option<ListingCategory>,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("start", "1".to_string()),
            ("limit", self.listing_limit.to_string()),
            ("convert", currency.to_string()),
        ];
        if let Some(category) = category {
            query.push(("sort", category.upstream_sort().to_string()));
            query.push(("sort_dir", "desc".to_string()));
        }
        query
    }

    /// Latest listings quoted in `currency`.
    ///
    /// # Errors
    /// - [`ApiError::MissingApiKey`] when no key is configured
    /// - [`ApiError::Upstream`] with the upstream status and body on non-2xx
    /// - [`ApiError::Transport`] when the upstream cannot be reached
    /// - [`ApiError::MalformedUpstream`] when the body has no `data` field
    pub async fn listings(
        &self,
        currency: &CurrencyCode,
        category: Option<ListingCategory>,
    ) -> Result<Value, ApiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("Upstream API key is missing");
            return Err(ApiError::MissingApiKey);
        };

        let url = format!("{}{}", self.base_url, LISTINGS_PATH);
        debug!(
            url = %url,
            currency = %currency,
            category = ?category,
            "Forwarding listings request"
        );
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .query(&self.listing_query(currency, category))
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Upstream request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Upstream returned an error");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let mut body: Value = response.json().await?;
        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| ApiError::MalformedUpstream("response has no data field".to_string()))?;
        info!(
            currency = %currency,
            count = data.as_array().map_or(0, Vec::len),
            "Listings forwarded"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> UpstreamClient {
        let config = ServerConfig::default()
            .with_upstream_base_url(server.uri())
            .with_api_key("test-key");
        UpstreamClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_key_limit_and_currency() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LISTINGS_PATH))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(query_param("start", "1"))
            .and(query_param("limit", "50"))
            .and(query_param("convert", "GBP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": { "error_code": 0 },
                "data": [{ "id": 1, "name": "Bitcoin" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let data = client(&server)
            .listings(&CurrencyCode::new("gbp").unwrap(), None)
            .await
            .unwrap();
        assert_eq!(data, json!([{ "id": 1, "name": "Bitcoin" }]));
    }

    #[tokio::test]
    async fn test_category_maps_to_sort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LISTINGS_PATH))
            .and(query_param("sort", "date_added"))
            .and(query_param("sort_dir", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let data = client(&server)
            .listings(&CurrencyCode::usd(), Some(ListingCategory::New))
            .await
            .unwrap();
        assert_eq!(data, json!([]));
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ServerConfig::default().with_upstream_base_url(server.uri());
        let err = UpstreamClient::new(&config)
            .unwrap()
            .listings(&CurrencyCode::usd(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_upstream_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("plan limit"))
            .mount(&server)
            .await;

        let err = client(&server)
            .listings(&CurrencyCode::usd(), None)
            .await
            .unwrap_err();
        match err {
            ApiError::Upstream { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "plan limit");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_body_without_data_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": {} })))
            .mount(&server)
            .await;

        let err = client(&server)
            .listings(&CurrencyCode::usd(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedUpstream(_)));
    }
}
