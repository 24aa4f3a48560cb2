use super::text_chunker::split_into_chunks;
use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::time::Duration;

/// Google Translate TTS only accepts short requests
const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the MP3 for a single chunk
    async fn call_google(
        &self,
        chunk: &str,
        language: LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        let url = format!("{}/translate_tts", self.base_url);
        let total = total.to_string();
        let index = index.to_string();
        let text_len = chunk.chars().count().to_string();

        tracing::debug!(
            language = %language,
            chunk_index = %index,
            chunk_chars = %text_len,
            "Calling Google Translate TTS"
        );

        let response = self
            .http_client
            .get(&url)
            .header(header::REFERER, format!("{}/", self.base_url))
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", "1"),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = %language, "Google TTS request failed");
                format!("Failed to connect to TTS API: {e}")
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                language = %language,
                "Google TTS returned an error status"
            );
            return Err(format!(
                "{} ({}) from TTS API. Probable cause: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                probable_cause(status)
            ));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read Google TTS response body");
            format!("Failed to read audio stream: {e}")
        })?;

        if audio.is_empty() {
            return Err(format!(
                "{} from TTS API. Probable cause: no audio returned",
                status.as_u16()
            ));
        }

        Ok(audio.to_vec())
    }
}

fn probable_cause(status: StatusCode) -> &'static str {
    match status {
        StatusCode::FORBIDDEN => "bad token or upstream API changes",
        StatusCode::NOT_FOUND => "unsupported language or upstream API changes",
        StatusCode::TOO_MANY_REQUESTS => "too many requests, rate limited by upstream",
        s if s.is_server_error() => "upstream API error, try again later",
        _ => "unknown",
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err("No text to send to TTS API (nothing speakable after cleanup)".to_string());
        }

        let mut merged_audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self.call_google(chunk, language, index, chunks.len()).await?;
            merged_audio.extend(audio);
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "google",
            language = %language,
            latency_ms = duration.as_millis(),
            characters_count = text.chars().count(),
            chunk_count = chunks.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
