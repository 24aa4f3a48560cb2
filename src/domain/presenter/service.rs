use super::state::ConversionState;
use crate::domain::input::ResolvedInput;
use crate::domain::tts::{LanguageCode, TtsServiceApi};
use std::sync::Arc;

/// Longest accepted text, in characters, inclusive
pub const MAX_TEXT_CHARS: usize = 5000;

/// Check resolved text against the generation preconditions.
///
/// Returns the rejection state, or `None` when generation may proceed.
pub fn validate(input: &ResolvedInput) -> Option<ConversionState> {
    let text = input.text();

    if text.trim().is_empty() {
        return Some(ConversionState::RejectedEmpty {
            decode_failure: input.decode_failure.clone(),
        });
    }

    let char_count = text.chars().count();
    if char_count > MAX_TEXT_CHARS {
        return Some(ConversionState::RejectedTooLong { char_count });
    }

    None
}

/// Drives one conversion attempt from `Idle` to a terminal state
pub struct ResultPresenter {
    tts_service: Arc<dyn TtsServiceApi>,
}

impl ResultPresenter {
    pub fn new(tts_service: Arc<dyn TtsServiceApi>) -> Self {
        Self { tts_service }
    }

    /// Run a full attempt. The returned state is always terminal.
    pub async fn run(&self, input: &ResolvedInput, language: LanguageCode) -> ConversionState {
        let mut state = ConversionState::Idle;
        transition(&mut state, ConversionState::Validating);

        if let Some(rejection) = validate(input) {
            transition(&mut state, rejection);
            tracing::warn!(
                state = state.name(),
                source = input.source.provenance(),
                language = %language,
                "Conversion rejected"
            );
            return state;
        }

        transition(&mut state, ConversionState::Generating);

        let next = match self.tts_service.generate(input.text(), language).await {
            Ok(artifact) => ConversionState::Succeeded(artifact),
            Err(e) => ConversionState::Failed {
                description: e.to_string(),
            },
        };
        transition(&mut state, next);

        match &state {
            ConversionState::Succeeded(artifact) => tracing::info!(
                source = input.source.provenance(),
                language = %language,
                audio_size = artifact.len(),
                "Conversion succeeded"
            ),
            ConversionState::Failed { description } => tracing::error!(
                source = input.source.provenance(),
                language = %language,
                error = %description,
                "Conversion failed"
            ),
            _ => {}
        }

        state
    }
}

fn transition(state: &mut ConversionState, next: ConversionState) {
    tracing::debug!(from = state.name(), to = next.name(), "Conversion state change");
    *state = next;
}
