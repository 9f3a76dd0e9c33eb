/// Shared serializable output types for all commands.
///
/// These are what gets written for `--json`; they are decoupled from the
/// internal request model and emitter types.
use serde::{Deserialize, Serialize};

use crate::request::ConvertError;

/// One generated file in an `all` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFileOutput {
    /// Format label (e.g., "Python", "C#", "HTTP").
    pub format: String,
    /// Path written (or attempted).
    pub path: String,
    /// Whether the format was generated successfully.
    pub ok: bool,
    /// Failure message, or null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of an `all` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSummaryOutput {
    /// True when every format succeeded.
    pub ok: bool,
    /// `{timestamp}_{METHOD}_{url}` shared by all files.
    pub base_filename: String,
    /// Output directory.
    pub directory: String,
    pub succeeded: usize,
    pub total: usize,
    pub files: Vec<GeneratedFileOutput>,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `ConvertError`.
    #[must_use]
    pub fn from_convert_error(err: &ConvertError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_json() {
        let out = ErrorOutput::from_convert_error(&ConvertError::NoUrl);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "no_url");
        assert_eq!(json["error"]["message"], "No URL found in curl command");
    }

    #[test]
    fn test_generated_file_omits_null_error() {
        let file = GeneratedFileOutput {
            format: "HTTP".to_owned(),
            path: "a.http".to_owned(),
            ok: true,
            error: None,
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(!json.contains("error"));
    }
}
