// src/client/http.rs  —  reqwest-backed backend client
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{ClientError, TranslationClient, TranslationResponse};
use crate::form::Payload;

pub struct HttpClient {
    base_url: String,
    client:   Client,
}

#[derive(Debug, Deserialize)]
struct RootMessage {
    message: String,
}

impl HttpClient {
    /// `base_url` without the trailing slash, e.g. `http://127.0.0.1:8000`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // A hung request stays pending until the backend answers or drops it.
        let client = Client::builder()
            .timeout(Option::<Duration>::None)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `GET /` — the backend's welcome message.
    pub fn health(&self) -> Result<String, ClientError> {
        let url = format!("{}/", self.base_url);
        log::debug!("[client] GET {url}");
        let body = read_body(self.client.get(&url).send()?)?;
        let root: RootMessage = serde_json::from_str(&body)?;
        Ok(root.message)
    }
}

impl TranslationClient for HttpClient {
    fn translate(&self, payload: &Payload) -> Result<TranslationResponse, ClientError> {
        let url = format!("{}/translate", self.base_url);
        log::debug!(
            "[client] POST {url}  ({} entries → {})",
            payload.text.len(), payload.target_language
        );
        let body = read_body(self.client.post(&url).json(payload).send()?)?;
        let resp: TranslationResponse = serde_json::from_str(&body)?;
        log::debug!("[client] response: {:?}", resp);
        Ok(resp)
    }
}

/// Body text of a 2xx response; anything else becomes `ClientError::Status`.
fn read_body(resp: Response) -> Result<String, ClientError> {
    let status = resp.status();
    let body = resp.text()?;
    if status.is_success() {
        return Ok(body);
    }
    let detail = error_detail(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
    Err(ClientError::Status { status: status.as_u16(), detail })
}

/// FastAPI puts the reason in `detail`: a string for HTTPException,
/// a list of objects for request validation errors.
fn error_detail(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    match v.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<String> = items
                .iter()
                .map(|i| match i.get("msg").and_then(Value::as_str) {
                    Some(m) => m.to_string(),
                    None => i.to_string(),
                })
                .collect();
            Some(msgs.join("; "))
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{payload::statements_to_text, Statement, User};
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    /// Serve a single canned response; the raw request comes back on the channel.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let resp = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).unwrap();
            let _ = tx.send(request);
        });
        (format!("http://{addr}"), rx)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 { break; }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len { break; }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn payload() -> Payload {
        Payload {
            text: statements_to_text(&[Statement { id: 1, value: "hello".into() }]),
            target_language: "hindi".into(),
            user: User { name: "guest".into(), email: "guest@example.com".into() },
        }
    }

    #[test]
    fn posts_payload_and_reads_translation() {
        let (url, rx) = serve_once(
            "200 OK",
            r#"{"original_text":{"key1":"hello"},"translated_text":{"key1":"नमस्ते"},
               "source_language":"auto","target_language":"hindi",
               "timestamp":"2024-01-01T00:00:00"}"#,
        );
        let client = HttpClient::new(&url).unwrap();
        let resp = client.translate(&payload()).unwrap();
        assert_eq!(resp.translated_text["key1"], json!("नमस्ते"));
        assert_eq!(resp.source_language.as_deref(), Some("auto"));

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /translate HTTP/1.1"), "{request}");
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, serde_json::to_value(payload()).unwrap());
    }

    #[test]
    fn minimal_response_is_accepted() {
        let (url, _rx) = serve_once("200 OK", r#"{"translated_text":{}}"#);
        let resp = HttpClient::new(&url).unwrap().translate(&payload()).unwrap();
        assert!(resp.translated_text.is_empty());
        assert!(resp.timestamp.is_none());
    }

    #[test]
    fn backend_error_carries_detail() {
        let (url, _rx) = serve_once("400 Bad Request", r#"{"detail":"Translation failed: bad language"}"#);
        let err = HttpClient::new(&url).unwrap().translate(&payload()).unwrap_err();
        match err {
            ClientError::Status { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Translation failed: bad language");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn validation_errors_are_joined() {
        assert_eq!(
            error_detail(r#"{"detail":[{"msg":"field required"},{"msg":"not an email"}]}"#).as_deref(),
            Some("field required; not an email")
        );
        assert_eq!(error_detail("<html>"), None);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let (url, _rx) = serve_once("200 OK", r#"{"translated":"nope"}"#);
        let err = HttpClient::new(&url).unwrap().translate(&payload()).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn unreachable_backend_is_a_request_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = HttpClient::new(&format!("http://{addr}")).unwrap()
            .translate(&payload()).unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[test]
    fn health_reads_root_message() {
        let (url, rx) = serve_once("200 OK", r#"{"message":"Welcome to the Language Translator API"}"#);
        let msg = HttpClient::new(&format!("{url}/")).unwrap().health().unwrap();
        assert_eq!(msg, "Welcome to the Language Translator API");
        assert!(rx.recv().unwrap().starts_with("GET / HTTP/1.1"));
    }
}
