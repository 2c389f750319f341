// src/client/mod.rs  —  TranslationClient trait + backend response types
pub mod http;

pub use http::HttpClient;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::form::Payload;

/// Backend interface — one blocking request per call
pub trait TranslationClient: Send {
    fn translate(&self, payload: &Payload) -> Result<TranslationResponse, ClientError>;
}

/// Body returned by `POST /translate`. Only `translated_text` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: Map<String, Value>,
    #[serde(default)]
    pub original_text:   Option<Map<String, Value>>,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub timestamp:       Option<String>,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}
