// src/app.rs  —  Interactive screen state (focus, editing, alert) over the form
use crate::client::{ClientError, TranslationResponse};
use crate::config::AppConfig;
use crate::form::{render_result, FormController, Mode, Payload, User};

/// Which widget receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Index into the statement list (not the id)
    Statement(usize),
    JsonEditor,
    Language,
    Translate,
}

pub struct App {
    pub form:      FormController,
    pub focus:     Focus,
    pub languages: Vec<String>,
    /// Blocking message; input is limited to dismissing it while set
    pub alert:     Option<String>,
    pub base_url:  String,
    pub quit:      bool,
}

impl App {
    pub fn new(cfg: &AppConfig) -> Self {
        let user = User { name: cfg.user_name.clone(), email: cfg.user_email.clone() };
        Self {
            form:      FormController::new(&cfg.target_language, user),
            focus:     Focus::Statement(0),
            languages: cfg.languages.clone(),
            alert:     None,
            base_url:  cfg.base_url.clone(),
            quit:      false,
        }
    }

    fn focus_order(&self) -> Vec<Focus> {
        let st = self.form.state();
        let mut order: Vec<Focus> = match st.mode {
            Mode::Form => (0..st.statements.len()).map(Focus::Statement).collect(),
            Mode::Json => vec![Focus::JsonEditor],
        };
        order.push(Focus::Language);
        order.push(Focus::Translate);
        order
    }

    fn step_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let cur = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let n = order.len() as isize;
        self.focus = order[(cur + step).rem_euclid(n) as usize];
    }

    pub fn next_focus(&mut self) { self.step_focus(1); }
    pub fn prev_focus(&mut self) { self.step_focus(-1); }

    pub fn toggle_mode(&mut self) {
        let mode = match self.form.state().mode {
            Mode::Form => Mode::Json,
            Mode::Json => Mode::Form,
        };
        self.form.set_mode(mode);
        self.focus = match mode {
            Mode::Form => Focus::Statement(0),
            Mode::Json => Focus::JsonEditor,
        };
    }

    /// Append to the focused text field; ignored on buttons.
    pub fn insert_char(&mut self, c: char) {
        self.edit_focused(|text| text.push(c));
    }

    pub fn backspace(&mut self) {
        self.edit_focused(|text| { text.pop(); });
    }

    fn edit_focused(&mut self, f: impl FnOnce(&mut String)) {
        match self.focus {
            Focus::Statement(i) => {
                let Some(s) = self.form.state().statements.get(i) else { return };
                let (id, mut value) = (s.id, s.value.clone());
                f(&mut value);
                self.form.update_statement(id, &value);
            }
            Focus::JsonEditor => {
                let mut raw = self.form.state().raw_json.clone();
                f(&mut raw);
                self.form.set_raw_json(&raw);
            }
            Focus::Language | Focus::Translate => {}
        }
    }

    pub fn add_statement(&mut self) {
        if self.form.state().mode != Mode::Form {
            return;
        }
        self.form.add_statement();
        self.focus = Focus::Statement(self.form.state().statements.len() - 1);
    }

    pub fn remove_focused_statement(&mut self) {
        let Focus::Statement(i) = self.focus else { return };
        let Some(id) = self.form.state().statements.get(i).map(|s| s.id) else { return };
        self.form.remove_statement(id);
        let last = self.form.state().statements.len() - 1;
        self.focus = Focus::Statement(i.min(last));
    }

    pub fn cycle_language(&mut self, step: isize) {
        if self.languages.is_empty() {
            return;
        }
        let cur = self.languages
            .iter()
            .position(|l| *l == self.form.state().target_language)
            .unwrap_or(0) as isize;
        let n = self.languages.len() as isize;
        let next = self.languages[(cur + step).rem_euclid(n) as usize].clone();
        self.form.set_target_language(&next);
    }

    /// Start a submit when the trigger is enabled. The returned payload is
    /// handed to the worker; build failures become an alert instead.
    pub fn request_submit(&mut self) -> Option<Payload> {
        if !self.form.can_submit() {
            return None;
        }
        match self.form.begin_submit() {
            Ok(p) => Some(p),
            Err(e) => {
                self.alert = Some(e.to_string());
                None
            }
        }
    }

    pub fn complete_submit(&mut self, outcome: Result<TranslationResponse, ClientError>) {
        if let Err(e) = self.form.finish_submit(outcome) {
            self.alert = Some(e.to_string());
        }
    }

    pub fn dismiss_alert(&mut self) { self.alert = None; }

    /// Pretty JSON of the last result, if there is anything to show.
    pub fn result_text(&self) -> Option<String> {
        self.form.state().result.as_ref()
            .filter(|m| !m.is_empty())
            .map(render_result)
    }
}
