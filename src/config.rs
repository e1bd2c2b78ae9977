use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub chat: ChatConfig,
    pub voice: VoiceConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the mentor backend (e.g. "http://localhost:8000/api/v1")
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct VoiceConfig {
    /// Read assistant replies aloud automatically
    pub auto_read: bool,
    /// Narration rate multiplier (1.0 = normal)
    pub rate: f32,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
