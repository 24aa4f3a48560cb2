use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tts_form::domain::tts::LanguageCode;
use tts_form::infrastructure::repositories::TtsRepository;

/// Minimal valid MP3 frame header followed by padding
pub fn mock_audio_bytes() -> Vec<u8> {
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, 0x00, // Some padding
    ]
}

/// Speech provider double that records every call
pub struct MockTtsRepository {
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, LanguageCode)>>,
    failure: Option<String>,
    delay: Duration,
}

impl MockTtsRepository {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            failure: None,
            delay: Duration::ZERO,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, LanguageCode)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TtsRepository for MockTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((text.to_string(), language));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.failure {
            Some(message) => Err(message.clone()),
            None => {
                let mut audio = mock_audio_bytes();
                audio.extend_from_slice(language.as_str().as_bytes());
                Ok(audio)
            }
        }
    }
}
