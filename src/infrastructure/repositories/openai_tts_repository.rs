use super::text_chunker::split_into_chunks;
use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;

/// OpenAI has a limit of 4096 characters per request
const MAX_CHUNK_CHARS: usize = 4096;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice_override: Option<Voice>,
}

impl OpenAiTtsRepository {
    pub fn new(api_key: &str, model: &str, voice: &str) -> Self {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));

        Self {
            client,
            model: parse_model(model),
            voice_override: parse_voice(voice),
        }
    }

    /// OpenAI voices are multilingual; pick one whose timbre suits the language
    fn voice_for_language(&self, language: LanguageCode) -> Voice {
        if let Some(voice) = &self.voice_override {
            return voice.clone();
        }

        match language {
            LanguageCode::English => Voice::Alloy,
            LanguageCode::Bengali => Voice::Shimmer,
            LanguageCode::Hindi => Voice::Nova,
            LanguageCode::French => Voice::Nova,
            LanguageCode::Spanish => Voice::Echo,
            LanguageCode::German => Voice::Onyx,
            LanguageCode::Japanese => Voice::Shimmer,
        }
    }

    /// Call OpenAI TTS API to synthesize a single chunk
    async fn call_openai(&self, text: &str, voice: Voice) -> Result<Vec<u8>, String> {
        let request = CreateSpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice,
            response_format: Some(SpeechResponseFormat::Mp3),
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                text_chars = text.chars().count(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {e}")
        })?;

        Ok(response.bytes.to_vec())
    }
}

fn parse_model(model: &str) -> SpeechModel {
    match model {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

fn parse_voice(voice: &str) -> Option<Voice> {
    match voice.trim().to_lowercase().as_str() {
        "alloy" => Some(Voice::Alloy),
        "echo" => Some(Voice::Echo),
        "fable" => Some(Voice::Fable),
        "onyx" => Some(Voice::Onyx),
        "nova" => Some(Voice::Nova),
        "shimmer" => Some(Voice::Shimmer),
        _ => None,
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice = self.voice_for_language(language);

        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err("No text to send to TTS API (nothing speakable after cleanup)".to_string());
        }

        let mut merged_audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self.call_openai(chunk, voice.clone()).await?;
            merged_audio.extend(audio);

            tracing::debug!(
                chunk_index = index,
                total_audio_size = merged_audio.len(),
                "Chunk synthesized and merged"
            );
        }

        tracing::info!(
            provider = "openai",
            language = %language,
            voice = ?voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            chunk_count = chunks.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
