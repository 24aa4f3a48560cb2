pub mod artifact;
pub mod dto;
pub mod error;
pub mod language;
pub mod service;

pub use artifact::{AudioArtifact, AudioFormat};
pub use error::TtsServiceError;
pub use language::{LanguageCode, LanguageError};
pub use service::{CacheSettings, CacheStats, TtsService, TtsServiceApi};
