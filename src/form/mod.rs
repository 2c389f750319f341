// src/form/mod.rs  —  Form controller: statements, raw JSON, submit lifecycle
pub mod payload;

pub use payload::{JsonTextError, Payload, User};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::client::{ClientError, TranslationClient, TranslationResponse};

/// Input mode of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Form,
    Json,
}

/// One text box. Ids stay contiguous 1..N.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub id:    usize,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Invalid JSON format. Please correct it. ({0})")]
    InvalidPayload(String),
    #[error("Translation failed: {0}")]
    TranslationFailed(#[from] ClientError),
    #[error("A translation is already in progress")]
    Busy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode:            Mode,
    pub statements:      Vec<Statement>,
    pub raw_json:        String,
    pub json_valid:      bool,
    /// Why `raw_json` is not sendable; `None` while `json_valid`
    pub json_error:      Option<JsonTextError>,
    pub target_language: String,
    pub result:          Option<Map<String, Value>>,
    pub busy:            bool,
}

pub struct FormController {
    state: FormState,
    user:  User,
}

impl FormController {
    pub fn new(target_language: &str, user: User) -> Self {
        Self {
            state: FormState {
                mode:            Mode::Form,
                statements:      vec![Statement { id: 1, value: String::new() }],
                raw_json:        String::new(),
                // Nothing typed yet; the submit-time recheck catches an empty editor.
                json_valid:      true,
                json_error:      None,
                target_language: target_language.to_string(),
                result:          None,
                busy:            false,
            },
            user,
        }
    }

    pub fn state(&self) -> &FormState { &self.state }

    pub fn set_mode(&mut self, mode: Mode) { self.state.mode = mode; }

    #[cfg_attr(not(feature = "tui"), allow(dead_code))]
    pub fn set_target_language(&mut self, lang: &str) {
        self.state.target_language = lang.to_string();
    }

    pub fn add_statement(&mut self) {
        let id = self.state.statements.len() + 1;
        self.state.statements.push(Statement { id, value: String::new() });
    }

    /// Remove by id and renumber the rest. The last remaining statement stays.
    pub fn remove_statement(&mut self, id: usize) {
        if self.state.statements.len() <= 1 {
            return;
        }
        self.state.statements.retain(|s| s.id != id);
        for (i, s) in self.state.statements.iter_mut().enumerate() {
            s.id = i + 1;
        }
    }

    pub fn update_statement(&mut self, id: usize, value: &str) {
        if let Some(s) = self.state.statements.iter_mut().find(|s| s.id == id) {
            s.value = value.to_string();
        }
    }

    pub fn set_raw_json(&mut self, text: &str) {
        self.state.raw_json = text.to_string();
        self.state.json_error = payload::check_json_text(text);
        self.state.json_valid = self.state.json_error.is_none();
    }

    pub fn can_submit(&self) -> bool {
        !self.state.busy && !(self.state.mode == Mode::Json && !self.state.json_valid)
    }

    pub fn build_payload(&self) -> Result<Payload, FormError> {
        let text = match self.state.mode {
            Mode::Form => payload::statements_to_text(&self.state.statements),
            Mode::Json => payload::parse_json_text(&self.state.raw_json)
                .map_err(|e| FormError::InvalidPayload(e.to_string()))?,
        };
        Ok(Payload {
            text,
            target_language: self.state.target_language.clone(),
            user: self.user.clone(),
        })
    }

    /// First half of a submit: mark busy and build the payload.
    /// Busy is cleared again when the payload cannot be built.
    pub fn begin_submit(&mut self) -> Result<Payload, FormError> {
        if self.state.busy {
            return Err(FormError::Busy);
        }
        self.state.busy = true;
        match self.build_payload() {
            Ok(p) => Ok(p),
            Err(e) => {
                log::warn!("[form] submit aborted: {e}");
                self.state.busy = false;
                Err(e)
            }
        }
    }

    /// Second half of a submit: store the result or report the failure.
    /// Busy is always cleared; a failure leaves the previous result in place.
    pub fn finish_submit(
        &mut self,
        outcome: Result<TranslationResponse, ClientError>,
    ) -> Result<(), FormError> {
        self.state.busy = false;
        match outcome {
            Ok(resp) => {
                log::info!(
                    "[form] received {} translated entries ({} → {})",
                    resp.translated_text.len(),
                    resp.source_language.as_deref().unwrap_or("auto"),
                    resp.target_language.as_deref().unwrap_or(&self.state.target_language),
                );
                if let (Some(orig), Some(ts)) = (&resp.original_text, &resp.timestamp) {
                    log::debug!("[form] backend echoed {} entries at {ts}", orig.len());
                }
                self.state.result = Some(resp.translated_text);
                Ok(())
            }
            Err(e) => {
                log::error!("[form] translation error: {e}");
                Err(FormError::TranslationFailed(e))
            }
        }
    }

    pub fn submit(&mut self, client: &dyn TranslationClient) -> Result<(), FormError> {
        let payload = self.begin_submit()?;
        let outcome = client.translate(&payload);
        self.finish_submit(outcome)
    }
}

/// Pretty JSON of a result mapping, keys in the order the backend sent them.
pub fn render_result(map: &Map<String, Value>) -> String {
    serde_json::to_string_pretty(map).unwrap_or_default()
}
