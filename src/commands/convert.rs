/// Single-format conversion: `python`, `csharp` and `http`.
use std::path::Path;

use tracing::warn;

use crate::cli::OutputCtx;
use crate::cli::args::ConvertArgs;
use crate::cli::input::acquire;
use crate::cli::output::write_text;
use crate::emit::{Format, RenderOptions, render_or_placeholder};
use crate::request::{ConvertError, parse};

/// Run a single-format conversion.
///
/// When the command has no URL the format's placeholder is still written,
/// then `ConvertError::NoUrl` is returned.
///
/// # Errors
///
/// Returns `ConvertError` on empty input, parse failure, missing URL or a
/// failed file write.
pub fn run(
    format: Format,
    args: &ConvertArgs,
    name: Option<&str>,
    ctx: &OutputCtx,
) -> Result<(), ConvertError> {
    let command = acquire(&args.input.curl)?;

    let _t_parse = ctx.timer("parse");
    let request = parse(&command)?;
    drop(_t_parse);

    let opts = RenderOptions::now(name.map(str::to_owned));

    let _t_render = ctx.timer("render");
    let rendered = render_or_placeholder(format, &request, &opts);
    drop(_t_render);

    let output = args.output.as_deref();
    write_text(&rendered.text, output)?;
    if let Some(path) = output {
        if format == Format::Http && !has_extension(path, Format::Http.extension()) {
            eprintln!(
                "Note: Consider using .http extension. Saved to {}",
                path.display()
            );
        }
        eprintln!("{} saved to {}", format.description(), path.display());
    }

    match rendered.error {
        Some(err) => {
            warn!(format = format.label(), "wrote placeholder: {err}");
            Err(err)
        }
        None => Ok(()),
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::args::CurlInput;

    fn args(curl: &str, output: PathBuf) -> ConvertArgs {
        ConvertArgs {
            output: Some(output),
            input: CurlInput {
                curl: vec![curl.to_owned()],
            },
        }
    }

    #[test]
    fn test_writes_rendered_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.http");
        let ctx = OutputCtx::new(false, false);
        run(
            Format::Http,
            &args("curl -X GET https://api.example.com/users?id=5", path.clone()),
            Some("Users"),
            &ctx,
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("### Users\n"));
        assert!(text.contains("\nGET https://api.example.com/users?id=5\n"));
    }

    #[test]
    fn test_no_url_writes_placeholder_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.cs");
        let ctx = OutputCtx::new(false, false);
        let err = run(Format::CSharp, &args("curl -k", path.clone()), None, &ctx).unwrap_err();
        assert!(matches!(err, ConvertError::NoUrl));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            Format::CSharp.placeholder()
        );
    }

    #[test]
    fn test_parse_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.py");
        let ctx = OutputCtx::new(false, false);
        let err = run(Format::Python, &args("curl 'https://h", path.clone()), None, &ctx)
            .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedCommand { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_extension_check() {
        assert!(has_extension(Path::new("a/b.HTTP"), "http"));
        assert!(!has_extension(Path::new("a/b.txt"), "http"));
        assert!(!has_extension(Path::new("noext"), "http"));
    }
}
