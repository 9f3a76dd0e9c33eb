/// Shell word splitting for curl command lines.
use super::errors::ConvertError;

/// The program name stripped from the front of a command.
const PROGRAM: &str = "curl";

/// Split a raw command line into shell words.
///
/// A leading `curl` word is dropped. Backslash-newline continuations (as
/// pasted from docs or browser "copy as cURL") are treated as plain
/// whitespace. Quoting follows POSIX shell rules.
///
/// # Errors
///
/// Returns `ConvertError::MalformedCommand` on unbalanced quotes or a
/// trailing backslash.
pub fn tokenize(command: &str) -> Result<Vec<String>, ConvertError> {
    let joined = command.replace("\\\r\n", " ").replace("\\\n", " ");
    let rest = strip_program(joined.trim());

    shlex::split(rest).ok_or_else(|| ConvertError::MalformedCommand {
        reason: "unbalanced quotes or trailing escape".to_owned(),
    })
}

/// Drop a leading `curl` when it is a whole word.
fn strip_program(command: &str) -> &str {
    match command.strip_prefix(PROGRAM) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            rest.trim_start()
        }
        _ => command,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_curl() {
        let tokens = tokenize("  curl https://example.com ").unwrap();
        assert_eq!(tokens, vec!["https://example.com"]);
    }

    #[test]
    fn test_keeps_curl_prefixed_word() {
        let tokens = tokenize("curlish -v").unwrap();
        assert_eq!(tokens, vec!["curlish", "-v"]);
    }

    #[test]
    fn test_quotes_group_words() {
        let tokens =
            tokenize(r#"curl -H 'Accept: text/html' -d "a b" --data x\ y"#).unwrap();
        assert_eq!(
            tokens,
            vec!["-H", "Accept: text/html", "-d", "a b", "--data", "x y"]
        );
    }

    #[test]
    fn test_line_continuations() {
        let tokens = tokenize("curl \\\n  -k \\\n  https://h").unwrap();
        assert_eq!(tokens, vec!["-k", "https://h"]);
    }

    #[test]
    fn test_unbalanced_quote() {
        let err = tokenize("curl -d '{\"a\":1}").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedCommand { .. }));
    }

    #[test]
    fn test_empty_command() {
        assert!(tokenize("curl").unwrap().is_empty());
    }
}
