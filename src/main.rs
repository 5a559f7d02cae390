mod api;
mod app;
mod auth;
mod config;
mod error;
mod fetch;
mod models;
mod pages;
mod router;
mod services;
mod ui;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use app::theme::{environment_prefers_dark, FilePreferences};
use app::App;
use auth::LocalIdentity;
use config::Config;

/// Log to a file in the data dir; stdout belongs to the terminal UI.
fn init_logging() -> anyhow::Result<()> {
    let dir = Config::data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating data dir {}", dir.display()))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("newsaura.log"))
        .context("opening log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NEWSAURA_LOG").unwrap_or_else(|_| "newsaura=info".into()),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(terminal: &mut DefaultTerminal, app: &mut App, config: &Config) -> anyhow::Result<()> {
    let tick_rate = config.tick_rate();
    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Resizes need no handling: the next draw picks up the new size.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        app.drain_events();
        app.tick(Instant::now());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::load().context("loading config")?;
    tracing::info!("Starting NewsAura against {}", config.api_base_url);

    let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;

    let identity = Arc::new(LocalIdentity::new(Config::data_dir().join("session.toml")));
    {
        let identity = identity.clone();
        tokio::spawn(async move {
            if let Err(e) = identity.resolve().await {
                tracing::warn!("Could not read session: {}", e);
            }
        });
    }

    let preferences = FilePreferences::open(Config::config_dir().join("preferences.toml"));
    let mut app = App::new(
        &config,
        api,
        identity,
        Box::new(preferences),
        environment_prefers_dark(),
    );

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app, &config);
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!("Exiting with error: {:#}", e);
    }
    tracing::info!("Shutting down");
    result
}
