pub mod resolver;

pub use resolver::{is_plain_text_file, resolve, DecodeFailure, ResolvedInput, TextSource, Upload};
