use axum::{
    body::Body,
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::{
        input::{is_plain_text_file, resolve, ResolvedInput, Upload},
        presenter::{ConversionState, ResultPresenter},
        tts::{
            dto::{LanguageResponse, TtsRequest},
            AudioArtifact, LanguageCode, LanguageError,
        },
    },
    error::{AppError, AppResult},
};

pub const X_TEXT_SOURCE: &str = "x-text-source";
pub const X_LANGUAGE: &str = "x-language";
pub const X_CHARACTER_COUNT: &str = "x-character-count";

/// Fields collected from the multipart form
#[derive(Debug, Default)]
struct ConvertForm {
    language: Option<String>,
    text: Option<String>,
    upload: Option<Upload>,
}

pub struct TtsController {
    presenter: ResultPresenter,
}

impl TtsController {
    pub fn new(presenter: ResultPresenter) -> Self {
        Self { presenter }
    }

    /// POST /api/tts/convert - Convert typed text or an uploaded .txt file
    pub async fn convert(
        State(controller): State<Arc<TtsController>>,
        multipart: Multipart,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let form = read_form(multipart).await?;
        let language = parse_language(form.language.as_deref())?;
        let resolved = resolve(form.upload, form.text.as_deref());

        controller.run(resolved, language).await
    }

    /// POST /api/tts/synthesize - Convert text sent as JSON
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let language = parse_language(request.language.as_deref())?;
        let resolved = resolve(None, Some(request.text.as_str()));

        controller.run(resolved, language).await
    }

    /// GET /api/languages - Languages offered by the form
    pub async fn languages() -> Json<Vec<LanguageResponse>> {
        Json(
            LanguageCode::all()
                .iter()
                .map(|lang| LanguageResponse {
                    code: lang.as_str().to_string(),
                    name: lang.display_name().to_string(),
                    flag: lang.flag().to_string(),
                })
                .collect(),
        )
    }

    async fn run(
        &self,
        resolved: ResolvedInput,
        language: LanguageCode,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let state = self.presenter.run(&resolved, language).await;
        let artifact = into_artifact(state)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(artifact.format().mime_type()),
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&format!(
                "attachment; filename=\"{}\"",
                artifact.download_file_name()
            ))?,
        );
        headers.insert(
            X_TEXT_SOURCE,
            HeaderValue::from_static(resolved.source.provenance()),
        );
        headers.insert(X_LANGUAGE, HeaderValue::from_static(language.as_str()));
        headers.insert(
            X_CHARACTER_COUNT,
            header_value(&resolved.text().chars().count().to_string())?,
        );

        Ok((StatusCode::OK, headers, Body::from(artifact.bytes())))
    }
}

/// Map a terminal conversion state onto the HTTP result
fn into_artifact(state: ConversionState) -> AppResult<AudioArtifact> {
    let presentation = state.presentation();
    match state {
        ConversionState::Succeeded(artifact) => Ok(artifact),
        ConversionState::RejectedEmpty { .. } => Err(AppError::EmptyInput(presentation)),
        ConversionState::RejectedTooLong { .. } => Err(AppError::TooLong(presentation)),
        ConversionState::Failed { .. } => Err(AppError::SynthesisFailed(presentation)),
        other => Err(AppError::Internal(format!(
            "conversion stopped in non-terminal state '{}'",
            other.name()
        ))),
    }
}

fn parse_language(raw: Option<&str>) -> AppResult<LanguageCode> {
    match raw.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => code
            .parse()
            .map_err(|e: LanguageError| AppError::BadRequest(e.to_string())),
        None => Ok(LanguageCode::default()),
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::Internal(format!("invalid header value: {e}")))
}

async fn read_form(mut multipart: Multipart) -> AppResult<ConvertForm> {
    let mut form = ConvertForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("malformed form data", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "language" => form.language = Some(field_text(field).await?),
            "text" => form.text = Some(field_text(field).await?),
            "file" => {
                // Browsers send an empty, unnamed part when no file was picked
                let file_name = field.file_name().unwrap_or_default().to_string();
                if file_name.is_empty() {
                    continue;
                }
                if !is_plain_text_file(&file_name) {
                    return Err(AppError::UnsupportedMediaType(format!(
                        "'{file_name}' is not a .txt file; only .txt files are supported"
                    )));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("failed to read upload", e))?;
                tracing::debug!(file_name = %file_name, size = bytes.len(), "File uploaded");
                form.upload = Some(Upload::new(file_name, bytes.to_vec()));
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

async fn field_text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| multipart_error("invalid form field", e))
}

/// Body limit overruns surface while streaming fields, keep their 413
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", e.body_text()))
    } else {
        AppError::BadRequest(format!("{context}: {}", e.body_text()))
    }
}
