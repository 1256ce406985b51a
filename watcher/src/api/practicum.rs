//! Yandex Practicum homework status API.

use async_trait::async_trait;
use common::error::PollError;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::HomeworkApi;

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
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError> {
        debug!(from_date, endpoint = %self.endpoint, "Requesting homework statuses");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!("Homework API unreachable: {}", e);
                PollError::Network(e.to_string())
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Homework API returned non-OK status");
            return Err(PollError::Upstream(status.as_u16()));
        }

        let body = resp.text().await.map_err(|e| {
            error!("Failed to read homework API body: {}", e);
            PollError::Network(e.to_string())
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Homework API body is not JSON: {}", e);
            PollError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/user_api/homework_statuses/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (endpoint, handle)
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_timestamp() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"homeworks":[{"homework_name":"proj1","status":"approved"}],"current_date":1700000600}"#,
        )
        .await;

        let client = PracticumClient::new(endpoint, "y0_secret");
        let body = client.fetch(1_700_000_000).await.unwrap();
        assert_eq!(body["homeworks"][0]["status"], json!("approved"));

        let request = server.await.unwrap();
        let request_lower = request.to_ascii_lowercase();
        assert!(request.starts_with("GET /api/user_api/homework_statuses/?from_date=1700000000 "));
        assert!(request_lower.contains("authorization: oauth y0_secret"));
    }

    #[tokio::test]
    async fn test_fetch_non_ok_is_upstream_error() {
        let (endpoint, server) = serve_once("503 Service Unavailable", r#"{"code":"unavailable"}"#).await;
        let client = PracticumClient::new(endpoint, "token");
        assert_eq!(client.fetch(0).await, Err(PollError::Upstream(503)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_decode_error() {
        let (endpoint, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = PracticumClient::new(endpoint, "token");
        let err = client.fetch(0).await.unwrap_err();
        assert!(matches!(err, PollError::Decode(_)), "got {:?}", err);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PracticumClient::new(format!("http://{}/", addr), "token");
        let err = client.fetch(0).await.unwrap_err();
        assert!(matches!(err, PollError::Network(_)), "got {:?}", err);
    }
}
