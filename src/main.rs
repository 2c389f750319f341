// src/main.rs  —  statement-translator  entry point
#[cfg(feature = "tui")]
mod app;
mod client;
mod config;
mod form;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use client::HttpClient;
use config::{AppConfig, Cli};
use form::{FormController, Mode, User};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // ── --print-config  ───────────────────────────────────────────────────────
    if cli.print_config {
        print!("{}", config::DEFAULT_CONFIG_TOML);
        return Ok(());
    }

    // ── --write-config  ───────────────────────────────────────────────────────
    if cli.write_config {
        let path = AppConfig::write_default_config(&cli)?;
        println!("Config written to: {}", path.display());
        println!("Edit it to set the backend URL and your name/email.");
        return Ok(());
    }

    // ── Load config ───────────────────────────────────────────────────────────
    let cfg = AppConfig::load(&cli)?;
    let client = HttpClient::new(&cfg.base_url).context("Creating HTTP client")?;

    // ── --check-backend  ──────────────────────────────────────────────────────
    if cli.check_backend {
        match client.health() {
            Ok(msg) => {
                println!("{}: {msg}", cfg.base_url);
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("{}: {e}", cfg.base_url);
                std::process::exit(1);
            }
        }
    }

    if cli.is_batch() {
        return run_batch(&cli, &cfg, &client);
    }
    run_interactive(&cfg, client)
}

// ── Batch mode: one submit, result on stdout ─────────────────────────────────
fn run_batch(cli: &Cli, cfg: &AppConfig, client: &HttpClient) -> Result<()> {
    let user = User { name: cfg.user_name.clone(), email: cfg.user_email.clone() };
    let mut form = FormController::new(&cfg.target_language, user);

    if let Some(path) = &cli.json_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading JSON input {:?}", path))?;
        form.set_mode(Mode::Json);
        form.set_raw_json(&raw);
    } else if let Some(raw) = &cli.json {
        form.set_mode(Mode::Json);
        form.set_raw_json(raw);
    } else {
        for (i, text) in cli.texts.iter().enumerate() {
            if i > 0 { form.add_statement(); }
            form.update_statement(i + 1, text);
        }
    }

    // Same gate as the Translate button
    if !form.can_submit() {
        if let Some(err) = &form.state().json_error {
            anyhow::bail!("{}: {err}", err.inline_message());
        }
    }
    form.submit(client)?;
    let empty = serde_json::Map::new();
    let result = form.state().result.as_ref().unwrap_or(&empty);
    println!("{}", form::render_result(result));
    Ok(())
}

// ── Interactive mode ──────────────────────────────────────────────────────────
#[cfg(feature = "tui")]
fn run_interactive(cfg: &AppConfig, client: HttpClient) -> Result<()> {
    use crate::client::{ClientError, TranslationClient, TranslationResponse};
    use std::sync::mpsc;
    use std::thread;

    let mut app = app::App::new(cfg);

    // ── Translation worker ────────────────────────────────────────────────────
    // The only place the network is touched. One payload in, one outcome out;
    // the busy flag keeps a second payload from being queued meanwhile.
    let (tx_req, rx_req) = mpsc::channel::<form::Payload>();
    let (tx_res, rx_res) = mpsc::channel::<Result<TranslationResponse, ClientError>>();
    thread::spawn(move || {
        while let Ok(payload) = rx_req.recv() {
            if tx_res.send(client.translate(&payload)).is_err() {
                break;
            }
        }
    });

    let mut tui = tui::Tui::new()?;
    let res = event_loop(&mut tui, &mut app, &tx_req, &rx_res);
    tui.cleanup();
    res
}

#[cfg(feature = "tui")]
fn event_loop(
    tui:    &mut tui::Tui,
    app:    &mut app::App,
    tx_req: &std::sync::mpsc::Sender<form::Payload>,
    rx_res: &std::sync::mpsc::Receiver<Result<client::TranslationResponse, client::ClientError>>,
) -> Result<()> {
    use crossterm::event::{self, Event};
    use std::time::Duration;

    let tick = Duration::from_millis(30);
    loop {
        // ── Single crossterm event reader ─────────────────────────────────────
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(k) = event::read()? {
                if let Some(payload) = tui::handle_key(app, k) {
                    log::info!(
                        "[main] submitting {} entries → {}",
                        payload.text.len(), payload.target_language
                    );
                    tx_req.send(payload).context("Translation worker stopped")?;
                }
            }
        }
        if app.quit {
            return Ok(());
        }

        // Drain worker outcomes
        while let Ok(outcome) = rx_res.try_recv() {
            app.complete_submit(outcome);
        }

        tui.draw(app)?;
        std::thread::sleep(tick);
    }
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_cfg: &AppConfig, _client: HttpClient) -> Result<()> {
    tui::Tui::new().map(|_| ())
}
