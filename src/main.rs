use anyhow::{Context, Result};
use chefmentor_live::voice::{MutedSpeech, SpeechSettings};
use chefmentor_live::{create_router, AppState, Config, HttpChatClient};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "chefmentor-live", about = "Cook-along session service for ChefMentor X")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/chefmentor-live")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("ChefMentor Live v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Chat backend: {}", cfg.chat.base_url);

    let chat = Arc::new(
        HttpChatClient::new(
            &cfg.chat.base_url,
            Duration::from_secs(cfg.chat.request_timeout_secs),
        )
        .context("Failed to create chat client")?,
    );
    let speech = Arc::new(MutedSpeech::new(SpeechSettings {
        auto_read: cfg.voice.auto_read,
        rate: cfg.voice.rate,
    }));

    let state = AppState::new(chat, speech);
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
