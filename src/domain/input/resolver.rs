use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// A file handed over by the user, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Where the text to convert came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    None,
    Direct(String),
    File(String),
}

impl TextSource {
    pub fn text(&self) -> &str {
        match self {
            TextSource::None => "",
            TextSource::Direct(text) | TextSource::File(text) => text,
        }
    }

    /// Human readable origin, for diagnostics only
    pub fn provenance(&self) -> &'static str {
        match self {
            TextSource::None => "no input",
            TextSource::Direct(_) => "from direct input",
            TextSource::File(_) => "from file upload",
        }
    }
}

/// The uploaded bytes were not UTF-8
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("uploaded file '{file_name}' is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
pub struct DecodeFailure {
    pub file_name: String,
    pub valid_up_to: usize,
}

/// Outcome of input resolution.
///
/// When decoding fails the source is `TextSource::None`, so downstream
/// validation sees empty text, while `decode_failure` keeps the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub source: TextSource,
    pub decode_failure: Option<DecodeFailure>,
}

impl ResolvedInput {
    pub fn text(&self) -> &str {
        self.source.text()
    }
}

/// Whether a file name carries the only accepted extension, `.txt`
pub fn is_plain_text_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Pick the text to convert.
///
/// An upload wins over typed text unconditionally, even when it is empty or
/// cannot be decoded. Typed text only counts when it is non-empty.
pub fn resolve(upload: Option<Upload>, typed: Option<&str>) -> ResolvedInput {
    if let Some(upload) = upload {
        if typed.is_some_and(|t| !t.is_empty()) {
            tracing::debug!(
                file_name = %upload.file_name,
                "Both file and typed text provided, file takes precedence"
            );
        }

        return match String::from_utf8(upload.bytes) {
            Ok(mut text) => {
                if text.starts_with(UTF8_BOM) {
                    text.replace_range(..UTF8_BOM.len(), "");
                }
                ResolvedInput {
                    source: TextSource::File(text),
                    decode_failure: None,
                }
            }
            Err(e) => {
                let failure = DecodeFailure {
                    file_name: upload.file_name,
                    valid_up_to: e.utf8_error().valid_up_to(),
                };
                tracing::warn!(error = %failure, "Uploaded file could not be decoded");
                ResolvedInput {
                    source: TextSource::None,
                    decode_failure: Some(failure),
                }
            }
        };
    }

    let source = match typed {
        Some(text) if !text.is_empty() => TextSource::Direct(text.to_string()),
        _ => TextSource::None,
    };

    ResolvedInput {
        source,
        decode_failure: None,
    }
}
