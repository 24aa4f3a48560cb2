use serde::{Deserialize, Serialize};

/// Request for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Entry of GET /api/languages
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub code: String,
    pub name: String,
    pub flag: String,
}
