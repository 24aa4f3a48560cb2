pub mod input;
pub mod presenter;
pub mod tts;
