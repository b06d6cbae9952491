use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use crate::core::plane::{CreateModuleRequest, PlaneClient, PlaneError, PlaneModule, PlaneProject};

pub const DEFAULT_BASE_URL: &str = "https://api.plane.so";

/// Minimal Plane REST API client. It only exposes the module creation call.
pub struct PlaneApiClient {
    client: Client,
    base_url: String,
}

impl PlaneApiClient {
    pub fn new(api_key: &str) -> Result<Self, PlaneError> {
        let client = Client::builder()
            .default_headers(Self::default_headers(api_key)?)
            .build()
            .map_err(|e| PlaneError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Every request carries the API key and a JSON content type.
    fn default_headers(api_key: &str) -> Result<HeaderMap, PlaneError> {
        let mut headers = HeaderMap::new();
        let mut key =
            HeaderValue::from_str(api_key).map_err(|e| PlaneError::Transport(e.to_string()))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Point the client at a different Plane host (self-hosted instances, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn modules_url(&self, project: &PlaneProject) -> String {
        format!(
            "{}/api/v1/workspaces/{}/projects/{}/modules/",
            self.base_url, project.workspace_slug, project.project_id
        )
    }
}

#[async_trait]
impl PlaneClient for PlaneApiClient {
    async fn create_module(
        &self,
        project: &PlaneProject,
        request: &CreateModuleRequest,
    ) -> Result<PlaneModule, PlaneError> {
        let resp = self
            .client
            .post(self.modules_url(project))
            .json(request)
            .send()
            .await
            .map_err(|e| PlaneError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PlaneError::Transport(e.to_string()))?;

        // Plane answers with JSON on success and on validation errors alike.
        let parsed = serde_json::from_str::<Value>(&text);

        if status.is_success() {
            let payload = parsed.map_err(|e| PlaneError::Decode(e.to_string()))?;
            tracing::debug!(status = status.as_u16(), "Plane module response received");
            // Success is decided by the status alone; an odd payload still counts.
            Ok(serde_json::from_value(payload).unwrap_or_default())
        } else {
            Err(PlaneError::Rejected {
                status: status.as_u16(),
                body: parsed.unwrap_or(Value::String(text)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP response and hand back the raw request that was received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });

        (format!("http://{}", addr), rx)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn request_body(raw: &str) -> &str {
        raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
    }

    fn header<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
        raw.split("\r\n").find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    /// Client for the local test server. Proxy settings from the environment are ignored.
    fn local_client(api_key: &str, base_url: String) -> PlaneApiClient {
        let client = Client::builder()
            .default_headers(PlaneApiClient::default_headers(api_key).unwrap())
            .no_proxy()
            .build()
            .unwrap();

        PlaneApiClient { client, base_url }
    }

    fn project() -> PlaneProject {
        PlaneProject {
            workspace_slug: "acme".to_string(),
            project_id: "proj-42".to_string(),
        }
    }

    fn request(name: &str) -> CreateModuleRequest {
        CreateModuleRequest {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_modules_url() {
        let client = PlaneApiClient::new("key")
            .unwrap()
            .with_base_url("https://plane.example.com/");

        assert_eq!(
            client.modules_url(&project()),
            "https://plane.example.com/api/v1/workspaces/acme/projects/proj-42/modules/"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client = PlaneApiClient::new("key").unwrap();

        assert_eq!(
            client.modules_url(&project()),
            "https://api.plane.so/api/v1/workspaces/acme/projects/proj-42/modules/"
        );
    }

    #[tokio::test]
    async fn test_created_module_is_success() {
        let (base_url, captured) = serve_once("200 OK", r#"{"id":"abc"}"#).await;
        let client = local_client("secret-key", base_url);

        let module = client
            .create_module(&project(), &request("Sprint 1"))
            .await
            .unwrap();
        assert_eq!(module.id.as_deref(), Some("abc"));

        let raw = captured.await.unwrap();
        assert!(raw.starts_with("POST /api/v1/workspaces/acme/projects/proj-42/modules/ HTTP/1.1"));
        assert_eq!(header(&raw, "x-api-key"), Some("secret-key"));
        assert_eq!(header(&raw, "content-type"), Some("application/json"));
        assert_eq!(request_body(&raw), r#"{"name":"Sprint 1"}"#);
    }

    #[tokio::test]
    async fn test_body_is_exact_json() {
        let (base_url, captured) = serve_once("201 Created", r#"{"id":"m1","name":"X"}"#).await;
        let client = local_client("k", base_url);

        client.create_module(&project(), &request("X")).await.unwrap();

        let raw = captured.await.unwrap();
        assert_eq!(request_body(&raw), r#"{"name":"X"}"#);
        let content_types = raw
            .split("\r\n")
            .filter(|line| line.to_ascii_lowercase().starts_with("content-type:"))
            .count();
        assert_eq!(content_types, 1);
    }

    #[tokio::test]
    async fn test_bad_request_is_rejected_with_body() {
        let (base_url, _captured) =
            serve_once("400 Bad Request", r#"{"error":"name already exists"}"#).await;
        let client = local_client("k", base_url);

        let err = client
            .create_module(&project(), &request("Sprint 1"))
            .await
            .unwrap_err();

        match err {
            PlaneError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body["error"], "name already exists");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_as_text() {
        let (base_url, _captured) = serve_once("502 Bad Gateway", "upstream down").await;
        let client = local_client("k", base_url);

        let err = client
            .create_module(&project(), &request("Sprint 1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlaneError::Rejected { status: 502, body: Value::String(ref text) } if text == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_success_with_unparseable_body_fails() {
        let (base_url, _captured) = serve_once("200 OK", "<html>").await;
        let client = local_client("k", base_url);

        let err = client
            .create_module(&project(), &request("Sprint 1"))
            .await
            .unwrap_err();

        assert!(matches!(err, PlaneError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client("k", format!("http://{}", addr));

        let err = client
            .create_module(&project(), &request("Sprint 1"))
            .await
            .unwrap_err();

        assert!(matches!(err, PlaneError::Transport(_)));
    }

    #[test]
    fn test_invalid_api_key_is_rejected_up_front() {
        assert!(PlaneApiClient::new("bad\nkey").is_err());
    }
}
