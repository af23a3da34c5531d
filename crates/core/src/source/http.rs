use std::time::Duration;

use tracing::{debug, info};

use crate::{config::AppConfig, error::SourceError, models::RawBatch};

/// API path serving the newest stored batch.
pub const LATEST_OUTPUT_PATH: &str = "/api/latest-output";

/// Fetches the latest raw batch from the dashboard API. No retries.
pub struct HttpSource {
    http: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Client for `origin` (e.g. `http://localhost:8080`) with the given request timeout.
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: latest_output_url(origin),
        })
    }

    /// Client for the first non-empty allowed origin in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let origin = config
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .find(|origin| !origin.is_empty())
            .ok_or(SourceError::NoOrigin)?;
        Self::new(origin, config.request_timeout())
    }

    /// Endpoint the source requests.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw response body of the latest batch.
    pub async fn fetch_bytes(&self) -> Result<Vec<u8>, SourceError> {
        info!(url = %self.url, "Fetching latest batch");
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Batch received");
        Ok(body.to_vec())
    }

    /// Fetch and decode the latest batch.
    pub async fn fetch(&self) -> Result<RawBatch, SourceError> {
        let body = self.fetch_bytes().await?;
        RawBatch::from_slice(&body).map_err(SourceError::Payload)
    }
}

/// `{origin}/api/latest-output`, tolerating a trailing slash on the origin.
pub fn latest_output_url(origin: &str) -> String {
    format!("{}{}", origin.trim().trim_end_matches('/'), LATEST_OUTPUT_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    async fn serve_once(status_line: &'static str, body: &'static str) -> Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let origin = format!("http://{}", listener.local_addr()?);

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buffer = [0u8; 4096];
                let _ = socket.read(&mut buffer).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Ok(origin)
    }

    #[test]
    fn builds_endpoint_url() {
        assert_eq!(
            latest_output_url("http://localhost:8080/"),
            "http://localhost:8080/api/latest-output"
        );
        assert_eq!(
            latest_output_url(" https://dash.example "),
            "https://dash.example/api/latest-output"
        );
    }

    #[test]
    fn requires_an_origin() {
        let config = AppConfig {
            allowed_origins: vec![" ".to_string()],
            ..AppConfig::default()
        };
        assert!(matches!(
            HttpSource::from_config(&config),
            Err(SourceError::NoOrigin)
        ));
    }

    #[tokio::test]
    async fn fetches_latest_batch() -> Result<()> {
        let origin = serve_once(
            "200 OK",
            r#"{"nextOffset":"10","timestamp":"1700000000","titles":[{"category":"ps4_game"}]}"#,
        )
        .await?;

        let config = AppConfig {
            allowed_origins: vec![origin, "http://unused.example".to_string()],
            ..AppConfig::default()
        };
        let source = HttpSource::from_config(&config)?;
        assert!(source.url().ends_with(LATEST_OUTPUT_PATH));

        let batch = source.fetch().await?;
        assert_eq!(batch.next_offset.as_deref(), Some("10"));
        assert_eq!(batch.timestamp, Some(1_700_000_000));
        assert_eq!(batch.titles.map(|titles| titles.len()), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() -> Result<()> {
        let origin = serve_once("404 Not Found", "No output files found").await?;
        let source = HttpSource::new(&origin, Duration::from_secs(5))?;
        assert!(matches!(
            source.fetch().await,
            Err(SourceError::Status { status: 404 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn non_json_body_is_a_payload_error() -> Result<()> {
        let origin = serve_once("200 OK", "<html>oops</html>").await?;
        let source = HttpSource::new(&origin, Duration::from_secs(5))?;
        assert!(matches!(source.fetch().await, Err(SourceError::Payload(_))));
        Ok(())
    }
}
