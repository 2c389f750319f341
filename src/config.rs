// src/config.rs  —  Runtime configuration (CLI + TOML)
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The example config is embedded directly in the binary at compile time.
/// Users can write it out with:  statement-translator --write-config
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml.example");

// ── CLI ───────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug, Default)]
#[command(
    name        = "statement-translator",
    about       = "Collect statements, send them to a translation backend, show the result",
    version,
)]
pub struct Cli {
    /// Config file path (default: ~/.config/statement-translator/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL (default: http://127.0.0.1:8000)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Target language selected at start (e.g. hindi)
    #[arg(long)]
    pub target: Option<String>,

    /// Name sent in the request's user block
    #[arg(long)]
    pub user_name: Option<String>,

    /// Email sent in the request's user block
    #[arg(long)]
    pub user_email: Option<String>,

    /// Batch mode: translate this statement and exit (repeatable, form mode)
    #[arg(long = "text", value_name = "STATEMENT")]
    pub texts: Vec<String>,

    /// Batch mode: translate this JSON object and exit (json mode)
    #[arg(long, conflicts_with_all = ["texts", "json_file"])]
    pub json: Option<String>,

    /// Batch mode: read the JSON object from a file and exit (json mode)
    #[arg(long, conflicts_with = "texts")]
    pub json_file: Option<PathBuf>,

    /// Query the backend root endpoint and exit
    #[arg(long, action)]
    pub check_backend: bool,

    /// Write the built-in default config.toml to the config path and exit.
    /// Use --config <PATH> to write to a custom location.
    #[arg(long, action)]
    pub write_config: bool,

    /// Print the built-in default config.toml to stdout and exit
    #[arg(long, action)]
    pub print_config: bool,
}

impl Cli {
    /// True when any batch-mode input was given on the command line.
    pub fn is_batch(&self) -> bool {
        !self.texts.is_empty() || self.json.is_some() || self.json_file.is_some()
    }
}

// ── TOML file structure ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub backend: Option<BackendCfg>,
    pub user:    Option<UserCfg>,
    pub form:    Option<FormCfg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCfg {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCfg {
    pub name:  Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormCfg {
    pub target_language: Option<String>,
    /// Languages offered by the picker, in display order
    pub languages:       Option<Vec<String>>,
}

// ── Resolved / merged config ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url:        String,
    pub user_name:       String,
    pub user_email:      String,
    pub target_language: String,
    pub languages:       Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url:        "http://127.0.0.1:8000".into(),
            user_name:       "guest".into(),
            user_email:      "guest@example.com".into(),
            target_language: "hindi".into(),
            languages:       vec!["hindi".into(), "english".into(), "marathi".into()],
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────────────
impl AppConfig {
    /// Write the embedded default config to disk.
    /// Returns the path it was written to.
    pub fn write_default_config(cli: &Cli) -> Result<PathBuf> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory {:?}", parent))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Writing config to {:?}", path))?;
        Ok(path)
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        // 1. Load TOML file
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading config {:?}", path))?;
            let fc: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("Parsing config {:?}", path))?;
            cfg.apply_file(&fc);
        } else {
            log::info!("[config] no config file at {}, using defaults", path.display());
        }

        // 2. Apply CLI overrides
        cfg.apply_cli(cli);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: &FileConfig) {
        if let Some(b) = &fc.backend {
            if let Some(v) = &b.base_url { self.base_url = v.clone(); }
        }
        if let Some(u) = &fc.user {
            if let Some(v) = &u.name  { self.user_name  = v.clone(); }
            if let Some(v) = &u.email { self.user_email = v.clone(); }
        }
        if let Some(f) = &fc.form {
            if let Some(v) = &f.target_language { self.target_language = v.clone(); }
            if let Some(v) = &f.languages       { self.languages       = v.clone(); }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.base_url   { self.base_url        = v.clone(); }
        if let Some(v) = &cli.target     { self.target_language = v.clone(); }
        if let Some(v) = &cli.user_name  { self.user_name       = v.clone(); }
        if let Some(v) = &cli.user_email { self.user_email      = v.clone(); }
    }

    /// Reject values the backend would refuse anyway, and make sure the
    /// selected language is one the picker can show.
    fn validate(&mut self) -> Result<()> {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!("base_url must start with http:// or https:// (got {:?})", self.base_url);
        }
        if self.target_language.trim().is_empty() {
            bail!("target_language must not be empty");
        }
        let (local, domain) = self.user_email.split_once('@').unwrap_or(("", ""));
        if local.is_empty() || domain.is_empty() {
            bail!("user email {:?} is not a valid address", self.user_email);
        }
        self.languages.retain(|l| !l.trim().is_empty());
        if !self.languages.contains(&self.target_language) {
            self.languages.push(self.target_language.clone());
        }
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    dirs_next().join("statement-translator").join("config.toml")
}

fn dirs_next() -> PathBuf {
    if let Ok(v) = std::env::var("XDG_CONFIG_HOME") { return PathBuf::from(v); }
    if let Ok(v) = std::env::var("APPDATA")          { return PathBuf::from(v); }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    PathBuf::from(home).join(".config")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(file: &str, cli: &Cli) -> Result<AppConfig> {
        let mut cfg = AppConfig::default();
        let fc: FileConfig = toml::from_str(file)?;
        cfg.apply_file(&fc);
        cfg.apply_cli(cli);
        cfg.validate()?;
        Ok(cfg)
    }

    #[test]
    fn embedded_example_parses_to_defaults() {
        let cfg = resolved(DEFAULT_CONFIG_TOML, &Cli::default()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli {
            base_url: Some("http://localhost:9000/".into()),
            target:   Some("english".into()),
            ..Default::default()
        };
        let cfg = resolved("[backend]\nbase_url = \"http://example.org\"\n", &cli).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.target_language, "english");
    }

    #[test]
    fn unknown_target_is_added_to_picker() {
        let cli = Cli { target: Some("tamil".into()), ..Default::default() };
        let cfg = resolved("", &cli).unwrap();
        assert_eq!(cfg.languages.last().map(String::as_str), Some("tamil"));
    }

    #[test]
    fn rejects_bad_email_and_scheme() {
        assert!(resolved("[user]\nemail = \"nobody\"\n", &Cli::default()).is_err());
        assert!(resolved("[backend]\nbase_url = \"ftp://x\"\n", &Cli::default()).is_err());
    }

    #[test]
    fn batch_detection() {
        assert!(!Cli::default().is_batch());
        let cli = Cli { texts: vec!["hello".into()], ..Default::default() };
        assert!(cli.is_batch());
    }
}
