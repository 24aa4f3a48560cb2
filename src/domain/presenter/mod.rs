pub mod service;
pub mod state;

pub use service::{validate, ResultPresenter, MAX_TEXT_CHARS};
pub use state::{ConversionState, Download, Presentation, Severity};
