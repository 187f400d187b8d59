use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::app_config::AppConfig;
use crate::domain::country::RawCountryRecord;
use crate::domain::error::{AppError, Result};

/// Source of raw country payloads
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_all_countries(&self) -> Result<Vec<RawCountryRecord>>;
}

/// REST Countries HTTP client
pub struct RestCountriesClient {
    client: Client,
    url: String,
    fields: Vec<String>,
}

impl RestCountriesClient {
    pub fn new(url: &str, fields: Vec<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("country-stats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, url, fields))
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(client: Client, url: &str, fields: Vec<String>) -> Self {
        Self {
            client,
            url: url.to_string(),
            fields,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.source_url,
            config.request_fields.clone(),
            config.timeout_secs,
        )
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all_countries(&self) -> Result<Vec<RawCountryRecord>> {
        let mut request = self.client.get(&self.url);
        if !self.fields.is_empty() {
            request = request.query(&[("fields", self.fields.join(","))]);
        }

        tracing::info!(url = %self.url, "Fetching countries");

        let response = request
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::NetworkError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to parse JSON: {}", e)))?;

        match json {
            Value::Array(countries) => {
                tracing::info!(count = countries.len(), "Fetched countries");
                Ok(countries)
            }
            other => Err(AppError::NetworkError(format!(
                "Failed to parse response: expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned HTTP response on a random local port
    fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while let Ok(n) = stream.read(&mut buf) {
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        format!("http://{}/v3.1/all", addr)
    }

    /// Direct connection; ignores any proxy configured in the environment
    fn local_client(url: &str, fields: Vec<String>) -> RestCountriesClient {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        RestCountriesClient::with_client(client, url, fields)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(
            "200 OK",
            r#"[{"name":{"common":"Peru"},"population":33000000},{"name":{"common":"Chile"}}]"#,
        );
        let client = local_client(&url, vec!["name".to_string()]);

        let countries = client.fetch_all_countries().await.unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0]["name"]["common"], "Peru");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let url = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#);
        let client = local_client(&url, Vec::new());

        let err = client.fetch_all_countries().await.unwrap_err();
        assert!(matches!(err, AppError::NetworkError(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let url = serve_once("200 OK", "[{\"name\":");
        let client = local_client(&url, Vec::new());

        let err = client.fetch_all_countries().await.unwrap_err();
        assert!(matches!(err, AppError::NetworkError(msg) if msg.contains("parse")));
    }

    #[tokio::test]
    async fn test_non_array_body() {
        let url = serve_once("200 OK", r#"{"status":404}"#);
        let client = local_client(&url, Vec::new());

        let err = client.fetch_all_countries().await.unwrap_err();
        assert!(matches!(err, AppError::NetworkError(msg) if msg.contains("an object")));
    }

    #[test]
    fn test_client_from_default_config() {
        let client = RestCountriesClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.url, "https://restcountries.com/v3.1/all");
        assert_eq!(client.fields.len(), 7);
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/v3.1/all", port);
        let client = local_client(&url, Vec::new());

        let err = client.fetch_all_countries().await.unwrap_err();
        assert!(matches!(err, AppError::NetworkError(msg) if msg.contains("Request failed")));
    }
}
