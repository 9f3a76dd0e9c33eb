/// Errors from the request conversion layer.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, parsing or rendering a curl command.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No command text was obtained from argv, stdin or the prompt.
    #[error("No curl command provided")]
    EmptyInput,

    /// Shell word splitting failed (unbalanced quotes, dangling escape).
    #[error("Failed to parse curl command: {reason}")]
    MalformedCommand {
        /// What the tokenizer tripped over.
        reason: String,
    },

    /// `--max-time` was given a value that is not a number.
    #[error("Invalid --max-time value '{value}': expected seconds as a number")]
    InvalidTimeout {
        /// The offending token.
        value: String,
    },

    /// The command parsed, but no URL token was found.
    #[error("No URL found in curl command")]
    NoUrl,

    /// Writing generated output failed.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Some formats could not be generated by `all`.
    #[error("Generated {succeeded} out of {total} files")]
    PartialFailure {
        /// Formats written successfully.
        succeeded: usize,
        /// Formats attempted.
        total: usize,
    },
}

impl ConvertError {
    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::MalformedCommand { .. } => "malformed_command",
            Self::InvalidTimeout { .. } => "invalid_timeout",
            Self::NoUrl => "no_url",
            Self::Io { .. } => "io_error",
            Self::PartialFailure { .. } => "partial_failure",
        }
    }

    /// Return the CLI exit code for this error.
    ///
    /// Every conversion failure exits with 1; clap keeps 2 for usage errors.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyInput
            | Self::MalformedCommand { .. }
            | Self::InvalidTimeout { .. }
            | Self::NoUrl
            | Self::Io { .. }
            | Self::PartialFailure { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_snake_case() {
        let errors = [
            ConvertError::EmptyInput,
            ConvertError::MalformedCommand {
                reason: "unbalanced quote".to_owned(),
            },
            ConvertError::InvalidTimeout {
                value: "soon".to_owned(),
            },
            ConvertError::NoUrl,
            ConvertError::PartialFailure {
                succeeded: 1,
                total: 3,
            },
        ];
        for err in &errors {
            assert!(err.code().chars().all(|c| c.is_ascii_lowercase() || c == '_'));
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_timeout_message_names_value() {
        let err = ConvertError::InvalidTimeout {
            value: "abc".to_owned(),
        };
        assert!(err.to_string().contains("'abc'"));
    }
}
