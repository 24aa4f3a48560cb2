use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::tts::CacheSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub max_upload_bytes: usize,
    // Speech provider
    pub tts_provider: TtsProvider,
    pub google_tts_base_url: String,
    pub tts_request_timeout_secs: u64,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // TTS Cache
    pub tts_cache_max_bytes: u64,
    pub tts_cache_time_to_idle_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    OpenAi,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::Google => "google",
            TtsProvider::OpenAi => "openai",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
            max_upload_bytes: 1024 * 1024,
            tts_provider: TtsProvider::Google,
            google_tts_base_url: "https://translate.google.com".to_string(),
            tts_request_timeout_secs: 30,
            openai_api_key: None,
            openai_tts_model: "tts-1".to_string(),
            openai_tts_voice: String::new(),
            tts_cache_max_bytes: CacheSettings::default().max_bytes,
            tts_cache_time_to_idle_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            environment: match lookup("ENVIRONMENT").as_deref() {
                Some("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            tts_provider: match lookup("TTS_PROVIDER").map(|s| s.to_lowercase()).as_deref() {
                None | Some("google") => TtsProvider::Google,
                Some("openai") => TtsProvider::OpenAi,
                Some(other) => bail!("TTS_PROVIDER must be 'google' or 'openai', got '{other}'"),
            },
            google_tts_base_url: lookup("GOOGLE_TTS_BASE_URL")
                .unwrap_or(defaults.google_tts_base_url),
            tts_request_timeout_secs: parse_or(
                &lookup,
                "TTS_REQUEST_TIMEOUT_SECS",
                defaults.tts_request_timeout_secs,
            )?,
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.is_empty()),
            openai_tts_model: lookup("OPENAI_TTS_MODEL").unwrap_or(defaults.openai_tts_model),
            openai_tts_voice: lookup("OPENAI_TTS_VOICE").unwrap_or(defaults.openai_tts_voice),
            tts_cache_max_bytes: parse_or(&lookup, "TTS_CACHE_MAX_BYTES", defaults.tts_cache_max_bytes)?,
            tts_cache_time_to_idle_secs: lookup("TTS_CACHE_TIME_TO_IDLE_SECS")
                .map(|raw| parse_var("TTS_CACHE_TIME_TO_IDLE_SECS", &raw))
                .transpose()?,
        };

        if config.tts_provider == TtsProvider::OpenAi && config.openai_api_key.is_none() {
            bail!("OPENAI_API_KEY is required when TTS_PROVIDER=openai");
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn tts_request_timeout(&self) -> Duration {
        Duration::from_secs(self.tts_request_timeout_secs)
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            max_bytes: self.tts_cache_max_bytes,
            time_to_idle: self.tts_cache_time_to_idle_secs.map(Duration::from_secs),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => parse_var(name, &raw),
        None => Ok(default),
    }
}

fn parse_var<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value for {name}: '{raw}'"))
}
