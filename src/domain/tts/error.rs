use super::language::LanguageCode;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TtsServiceError {
    #[error("{0}")]
    Synthesis(String),
    #[error("speech provider returned no audio for language '{0}'")]
    EmptyAudio(LanguageCode),
}
