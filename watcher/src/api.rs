//! Status endpoint client.
//!
//! One call, one request: the client never retries. Retrying is the poll
//! loop's job, which simply asks again on the next cycle.

use async_trait::async_trait;
use common::protocol::FROM_DATE_PARAM;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{error, info};

use crate::error::WatchError;

/// Where the poll loop reads homework statuses from.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch every status change recorded since `cursor` (seconds since epoch).
    async fn fetch(&self, cursor: i64) -> Result<Value, WatchError>;
}

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, WatchError> {
        info!(endpoint = %self.endpoint, from_date = cursor, "Querying status endpoint");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[(FROM_DATE_PARAM, cursor)])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Status endpoint request failed");
                WatchError::Transport(e)
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Status endpoint answered with non-200");
            return Err(WatchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| WatchError::PayloadFormat(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}/api/user_api/homework_statuses/", addr), handle)
    }

    #[tokio::test]
    async fn test_fetch_sends_cursor_and_oauth_header() {
        let body = r#"{"homeworks":[],"current_date":1700000600}"#;
        let (endpoint, server) = serve_once("200 OK", body).await;

        let client = PracticumClient::new(endpoint, "secret-token");
        let payload = client.fetch(1_700_000_000).await.unwrap();

        assert_eq!(payload["current_date"], 1_700_000_600);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/user_api/homework_statuses/?from_date=1700000000 "));
        assert!(request
            .to_lowercase()
            .contains("authorization: oauth secret-token"));
    }

    #[tokio::test]
    async fn test_non_200_is_http_status_error() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "{}").await;

        let client = PracticumClient::new(endpoint, "token");
        let err = client.fetch(0).await.unwrap_err();

        assert!(matches!(err, WatchError::HttpStatus { status: 503 }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_body_is_payload_format_error() {
        let (endpoint, server) = serve_once("200 OK", "<html>maintenance</html>").await;

        let client = PracticumClient::new(endpoint, "token");
        let err = client.fetch(0).await.unwrap_err();

        assert_eq!(err.kind(), "payload_format");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PracticumClient::new(format!("http://{}/", addr), "token");
        let err = client.fetch(0).await.unwrap_err();

        assert_eq!(err.kind(), "transport");
    }
}
