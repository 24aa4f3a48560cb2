use super::language::LanguageCode;
use bytes::Bytes;
use std::io::Cursor;

/// Compressed audio encodings a provider can hand back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
        }
    }
}

/// Immutable synthesized speech for one (text, language) pair.
///
/// Cloning is cheap: the encoded bytes are shared, so cache hits hand out the
/// same buffer without copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    audio: Bytes,
    language: LanguageCode,
    format: AudioFormat,
}

impl AudioArtifact {
    pub fn new(audio: Vec<u8>, language: LanguageCode, format: AudioFormat) -> Self {
        Self {
            audio: Bytes::from(audio),
            language,
            format,
        }
    }

    pub fn mp3(audio: Vec<u8>, language: LanguageCode) -> Self {
        Self::new(audio, language, AudioFormat::Mp3)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.audio
    }

    /// Shared handle to the encoded audio, for response bodies
    pub fn bytes(&self) -> Bytes {
        self.audio.clone()
    }

    pub fn len(&self) -> usize {
        self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// A reader positioned at the first byte of the audio
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.as_bytes())
    }

    /// File name offered for download, e.g. `TTS_Output_en.mp3`
    pub fn download_file_name(&self) -> String {
        format!("TTS_Output_{}.{}", self.language, self.format.extension())
    }
}
