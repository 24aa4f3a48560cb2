pub mod google_tts_repository;
pub mod openai_tts_repository;
pub mod text_chunker;
pub mod tts_repository;

pub use google_tts_repository::GoogleTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use tts_repository::TtsRepository;
