use crate::domain::input::DecodeFailure;
use crate::domain::tts::AudioArtifact;
use serde::{Deserialize, Serialize};

/// States of a single conversion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionState {
    Idle,
    Validating,
    Generating,
    RejectedEmpty { decode_failure: Option<DecodeFailure> },
    RejectedTooLong { char_count: usize },
    Succeeded(AudioArtifact),
    Failed { description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
}

/// Framework independent description of what the user should see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub state: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<Download>,
}

impl ConversionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConversionState::Idle => "idle",
            ConversionState::Validating => "validating",
            ConversionState::Generating => "generating",
            ConversionState::RejectedEmpty { .. } => "rejected_empty",
            ConversionState::RejectedTooLong { .. } => "rejected_too_long",
            ConversionState::Succeeded(_) => "succeeded",
            ConversionState::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            ConversionState::Idle | ConversionState::Validating | ConversionState::Generating
        )
    }

    pub fn presentation(&self) -> Presentation {
        let (severity, message, hint) = match self {
            ConversionState::Idle => (Severity::Info, "Click 'Generate Audio' below.".to_string(), None),
            ConversionState::Validating | ConversionState::Generating => {
                (Severity::Info, "Generating...".to_string(), None)
            }
            ConversionState::RejectedEmpty { decode_failure: None } => {
                (Severity::Warning, "Enter text or upload file.".to_string(), None)
            }
            ConversionState::RejectedEmpty {
                decode_failure: Some(_),
            } => (
                Severity::Warning,
                "Uploaded file is not valid UTF-8 text.".to_string(),
                Some("Save the file with UTF-8 encoding and upload it again.".to_string()),
            ),
            ConversionState::RejectedTooLong { .. } => (
                Severity::Error,
                "Text is too long! (Max 5000 chars recommended).".to_string(),
                None,
            ),
            ConversionState::Succeeded(artifact) => (
                Severity::Success,
                format!("Generated in {}!", artifact.language().label()),
                None,
            ),
            ConversionState::Failed { description } => (
                Severity::Error,
                format!("Error: {description}"),
                Some("Check text length or unsupported characters.".to_string()),
            ),
        };

        let download = match self {
            ConversionState::Succeeded(artifact) => Some(Download {
                file_name: artifact.download_file_name(),
                mime_type: artifact.format().mime_type().to_string(),
            }),
            _ => None,
        };

        Presentation {
            state: self.name().to_string(),
            severity,
            message,
            hint,
            download,
        }
    }
}
