use super::artifact::AudioArtifact;
use super::error::TtsServiceError;
use super::language::LanguageCode;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Cache key: the exact text and language, no normalization applied
type CacheKey = (String, LanguageCode);

#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// Upper bound on cached audio, in bytes
    pub max_bytes: u64,
    pub time_to_idle: Option<Duration>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024 * 1024,
            time_to_idle: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: u64,
    pub weighted_bytes: u64,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    cache: Cache<CacheKey, AudioArtifact>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, settings: CacheSettings) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(settings.max_bytes)
            .weigher(|key: &CacheKey, artifact: &AudioArtifact| -> u32 {
                (key.0.len() + artifact.len()).try_into().unwrap_or(u32::MAX)
            });

        if let Some(time_to_idle) = settings.time_to_idle {
            builder = builder.time_to_idle(time_to_idle);
        }

        Self {
            tts_repo,
            cache: builder.build(),
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            entry_count: self.cache.entry_count(),
            weighted_bytes: self.cache.weighted_size(),
        }
    }

    async fn synthesize_uncached(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<AudioArtifact, TtsServiceError> {
        let audio = self
            .tts_repo
            .synthesize(text, language)
            .await
            .map_err(TtsServiceError::Synthesis)?;

        if audio.is_empty() {
            return Err(TtsServiceError::EmptyAudio(language));
        }

        Ok(AudioArtifact::mp3(audio, language))
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Produce the audio for `text` spoken in `language`.
    ///
    /// Results are memoized by the exact (text, language) pair. Concurrent
    /// calls for the same pair share a single provider call. Failures are
    /// returned to the caller and never cached.
    ///
    /// Callers are expected to have validated the text (non-blank, within the
    /// length limit) beforehand.
    async fn generate(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<AudioArtifact, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn generate(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<AudioArtifact, TtsServiceError> {
        let start_time = std::time::Instant::now();

        let entry = self
            .cache
            .entry((text.to_string(), language))
            .or_try_insert_with(self.synthesize_uncached(text, language))
            .await
            .map_err(|e| (*e).clone())?;

        if entry.is_fresh() {
            tracing::info!(
                language = %language,
                text_chars = text.chars().count(),
                audio_size = entry.value().len(),
                latency_ms = start_time.elapsed().as_millis(),
                "Audio generated and cached"
            );
        } else {
            tracing::info!(
                language = %language,
                audio_size = entry.value().len(),
                "TTS cache hit - returning cached audio"
            );
        }

        Ok(entry.into_value())
    }
}
