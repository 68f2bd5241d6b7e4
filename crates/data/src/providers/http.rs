//! HTTP provider backed by the dashboard API and the public sentiment endpoint.

use super::MarketDataProvider;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::wire::{ErrorBody, ListingsEnvelope, SentimentEnvelope};
use async_trait::async_trait;
use coinboard_domain::{AssetRecord, CurrencyCode, DominanceSlice, ListingCategory, SentimentIndex};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Fetches listings and dominance from `/api/crypto*` and the sentiment
/// index from its third-party endpoint.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    api_base_url: String,
    sentiment_url: String,
}

impl HttpProvider {
    /// Creates a provider from the client configuration.
    ///
    /// # Errors
    /// Returns [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            sentiment_url: config.sentiment_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        debug!(url = %url, query = ?query, "GET");
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Request rejected");
            return Err(FetchError::FetchFailed {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Prefers the `error` field of a JSON error body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error,
            details: Some(details),
        }) => format!("{error}: {details}"),
        Ok(ErrorBody { error, .. }) => error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}

#[async_trait]
impl MarketDataProvider for HttpProvider {
    async fn listings(
        &self,
        currency: &CurrencyCode,
        category: Option<ListingCategory>,
    ) -> Result<Vec<AssetRecord>, FetchError> {
        let url = format!("{}/api/crypto", self.api_base_url);
        let mut query = vec![("currency", currency.as_str())];
        if let Some(category) = category {
            query.push(("category", category.as_str()));
        }
        let envelope: ListingsEnvelope = self.get_json(&url, &query).await?;
        Ok(envelope.data)
    }

    async fn dominance(&self) -> Result<Vec<DominanceSlice>, FetchError> {
        let url = format!("{}/api/crypto/dominance", self.api_base_url);
        self.get_json(&url, &[]).await
    }

    async fn sentiment(&self) -> Result<SentimentIndex, FetchError> {
        let envelope: SentimentEnvelope = self.get_json(&self.sentiment_url, &[]).await?;
        SentimentIndex::try_from(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> HttpProvider {
        let config = ClientConfig::default()
            .with_api_base_url(server.uri())
            .with_sentiment_url(format!("{}/fng/", server.uri()));
        HttpProvider::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_listings_forward_currency_and_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/crypto"))
            .and(query_param("currency", "EUR"))
            .and(query_param("category", "trending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "id": 1, "name": "Bitcoin", "symbol": "BTC",
                    "quote": { "EUR": { "price": 60000.5 } }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let eur = CurrencyCode::new("eur").unwrap();
        let assets = provider(&server)
            .listings(&eur, Some(ListingCategory::Trending))
            .await
            .unwrap();

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].quote_in(&eur).unwrap().price, Some(dec!(60000.5)));
    }

    #[tokio::test]
    async fn test_listings_without_category_sends_currency_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/crypto"))
            .and(query_param("currency", "USD"))
            .and(query_param_is_missing("category"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let assets = provider(&server)
            .listings(&CurrencyCode::usd(), None)
            .await
            .unwrap();
        assert!(assets.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/crypto"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Missing API Key" })),
            )
            .mount(&server)
            .await;

        let err = provider(&server)
            .listings(&CurrencyCode::usd(), None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FetchError::FetchFailed {
                status: 401,
                message: "Missing API Key".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/crypto/dominance"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server).dominance().await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_sentiment_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "value": "72", "value_classification": "Greed", "timestamp": "1700000000" }]
            })))
            .mount(&server)
            .await;

        let index = provider(&server).sentiment().await.unwrap();
        assert_eq!(index.value, 72);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = ClientConfig::default().with_api_base_url("http://127.0.0.1:1");
        let err = HttpProvider::new(&config)
            .unwrap()
            .dominance()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
