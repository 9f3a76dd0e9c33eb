/// Curl command acquisition: argv words, piped stdin, or an interactive prompt.
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::request::ConvertError;

const STDIN: &str = "<stdin>";

/// Obtain the command text from the first available source.
///
/// # Errors
///
/// - `ConvertError::EmptyInput` — every source came up empty
/// - `ConvertError::Io` — stdin could not be read
pub fn acquire(words: &[String]) -> Result<String, ConvertError> {
    let text = if !words.is_empty() {
        debug!(words = words.len(), "reading command from arguments");
        words.join(" ")
    } else if !io::stdin().is_terminal() {
        debug!("reading command from piped stdin");
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(stdin_error)?;
        buf.trim().to_owned()
    } else {
        eprintln!("Enter your curl command (press Enter twice to finish):");
        let _ = io::stderr().flush();
        read_until_blank(io::stdin().lock()).map_err(stdin_error)?
    };

    if text.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(text)
}

/// Read lines until a blank line or EOF, joining them with single spaces.
///
/// A trailing `\` continuation on a line is dropped.
///
/// # Errors
///
/// Returns any I/O error from the reader.
pub fn read_until_blank<R: BufRead>(reader: R) -> io::Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.trim_end().trim_end_matches('\\').trim_end().to_owned());
    }
    Ok(lines.join(" "))
}

fn stdin_error(source: io::Error) -> ConvertError {
    ConvertError::Io {
        path: PathBuf::from(STDIN),
        source,
    }
}
