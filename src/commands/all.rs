/// `all` command: generate every format into timestamped files.
///
/// Files are named `{YYYYMMDD_HHMMSS}_{METHOD}_{host_and_path}.{ext}`. Each
/// format is rendered and written independently; a failure in one does not
/// stop the others.
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::cli::OutputCtx;
use crate::cli::args::AllArgs;
use crate::cli::input::acquire;
use crate::cli::output::{print_json, write_text};
use crate::emit::{Format, RenderOptions, render_or_placeholder};
use crate::request::{ConvertError, ParsedRequest, parse};
use crate::types::{ConversionSummaryOutput, GeneratedFileOutput};

/// File name component used when the request has no URL.
const UNKNOWN_URL: &str = "unknown_url";

/// Result of generating one format.
#[derive(Debug)]
struct FormatResult {
    format: Format,
    path: PathBuf,
    error: Option<ConvertError>,
}

/// Run `curlconv all`.
///
/// # Errors
///
/// Returns `ConvertError` on empty input, parse failure, an uncreatable
/// directory, or `PartialFailure` when any format failed.
pub fn run(args: &AllArgs, ctx: &OutputCtx) -> Result<(), ConvertError> {
    let command = acquire(&args.input.curl)?;

    let _t_parse = ctx.timer("parse");
    let request = parse(&command)?;
    drop(_t_parse);

    ensure_dir(&args.dir)?;

    let opts = RenderOptions::now(None);
    let base = base_filename(&request, opts.generated_at);

    if !ctx.json {
        println!("Processing cURL command...");
        println!("Base filename: {base}");
        println!();
    }

    let results: Vec<FormatResult> = Format::ALL
        .iter()
        .map(|&format| {
            let _t_format = ctx.timer("generate_format");
            let result = generate(format, &request, &opts, &args.dir, &base);
            if !ctx.json {
                print_result(&result);
            }
            result
        })
        .collect();

    let summary = summarize(&results, &base, &args.dir);
    if ctx.json {
        print_json(&summary);
    } else {
        print_summary(&summary);
    }

    if summary.ok {
        Ok(())
    } else {
        Err(ConvertError::PartialFailure {
            succeeded: summary.succeeded,
            total: summary.total,
        })
    }
}

fn ensure_dir(dir: &Path) -> Result<(), ConvertError> {
    if !dir.exists() {
        info!(dir = %dir.display(), "creating output directory");
    }
    std::fs::create_dir_all(dir).map_err(|source| ConvertError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn generate(
    format: Format,
    request: &ParsedRequest,
    opts: &RenderOptions,
    dir: &Path,
    base: &str,
) -> FormatResult {
    let path = dir.join(format!("{base}.{}", format.extension()));
    let rendered = render_or_placeholder(format, request, opts);

    let error = match write_text(&rendered.text, Some(&path)) {
        Ok(()) => rendered.error,
        Err(err) => Some(err),
    };
    match &error {
        Some(err) => warn!(format = format.label(), "generation failed: {err}"),
        None => info!(format = format.label(), path = %path.display(), "generated"),
    }

    FormatResult {
        format,
        path,
        error,
    }
}

/// `{YYYYMMDD_HHMMSS}_{METHOD}_{host_and_path}` for `request`.
#[must_use]
fn base_filename(request: &ParsedRequest, at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}",
        at.format("%Y%m%d_%H%M%S"),
        sanitize(&request.method),
        url_component(&request.url)
    )
}

/// Host (with port) and path of `url`, with every non-alphanumeric character
/// replaced by `_`.
fn url_component(url: &str) -> String {
    if url.is_empty() {
        return UNKNOWN_URL.to_owned();
    }
    let host_and_path = match url::Url::parse(url) {
        Ok(parsed) if parsed.host_str().is_some() => {
            let host = parsed.host_str().unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{host}:{port}{}", parsed.path()),
                None => format!("{host}{}", parsed.path()),
            }
        }
        _ => {
            let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
            without_scheme.split('#').next().unwrap_or_default().to_owned()
        }
    };
    sanitize(&host_and_path)
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn summarize(results: &[FormatResult], base: &str, dir: &Path) -> ConversionSummaryOutput {
    let files: Vec<GeneratedFileOutput> = results
        .iter()
        .map(|r| GeneratedFileOutput {
            format: r.format.label().to_owned(),
            path: r.path.display().to_string(),
            ok: r.error.is_none(),
            error: r.error.as_ref().map(ToString::to_string),
        })
        .collect();
    let succeeded = files.iter().filter(|f| f.ok).count();
    ConversionSummaryOutput {
        ok: succeeded == files.len(),
        base_filename: base.to_owned(),
        directory: dir.display().to_string(),
        succeeded,
        total: files.len(),
        files,
    }
}

fn print_result(result: &FormatResult) {
    match &result.error {
        None => println!("✓ {}: {}", result.format.label(), result.path.display()),
        Some(err) => {
            println!("✗ Failed to generate {} code", result.format.label());
            println!("Error: {err}");
        }
    }
}

fn print_summary(summary: &ConversionSummaryOutput) {
    println!();
    println!("Summary:");
    println!(
        "Successfully generated {} out of {} files",
        summary.succeeded, summary.total
    );

    let written: Vec<&GeneratedFileOutput> = summary.files.iter().filter(|f| f.ok).collect();
    if summary.ok {
        println!("All conversions completed successfully!");
        println!();
        println!("Generated files:");
    } else {
        println!("Some conversions failed. Check the errors above.");
        if written.is_empty() {
            return;
        }
        println!();
        println!("Successfully generated files:");
    }
    for file in written {
        println!("  {:8}: {}", file.format, file.path);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::cli::args::CurlInput;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap()
    }

    fn all_args(curl: &str, dir: PathBuf) -> AllArgs {
        AllArgs {
            dir,
            input: CurlInput {
                curl: vec![curl.to_owned()],
            },
        }
    }

    #[test]
    fn test_base_filename() {
        let req = parse("curl -d '{}' 'https://api.example.com/v1/users?id=5'").unwrap();
        assert_eq!(
            base_filename(&req, at()),
            "20250102_030405_POST_api_example_com_v1_users"
        );
    }

    #[test]
    fn test_base_filename_keeps_port_and_handles_bare_host() {
        let req = parse("curl http://localhost:8080/x").unwrap();
        assert_eq!(url_component(&req.url), "localhost_8080_x");
        assert_eq!(url_component("example.com/a-b"), "example_com_a_b");
        assert_eq!(url_component(""), "unknown_url");
    }

    #[test]
    fn test_generates_all_files_in_new_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("out");
        let ctx = OutputCtx::new(true, false);
        run(&all_args("curl https://api.example.com/users", dir.clone()), &ctx).unwrap();

        let mut exts: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| {
                let path = e.unwrap().path();
                let name = path.file_name().unwrap().to_string_lossy().into_owned();
                assert!(name.contains("_GET_api_example_com_users."), "{name}");
                path.extension().unwrap().to_string_lossy().into_owned()
            })
            .collect();
        exts.sort();
        assert_eq!(exts, vec!["cs", "http", "py"]);
    }

    #[test]
    fn test_no_url_is_partial_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = OutputCtx::new(true, false);
        let err = run(&all_args("curl -k", tmp.path().to_path_buf()), &ctx).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::PartialFailure {
                succeeded: 0,
                total: 3
            }
        ));
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            FormatResult {
                format: Format::Python,
                path: PathBuf::from("a.py"),
                error: None,
            },
            FormatResult {
                format: Format::Http,
                path: PathBuf::from("a.http"),
                error: Some(ConvertError::NoUrl),
            },
        ];
        let summary = summarize(&results, "a", Path::new("."));
        assert!(!summary.ok);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.files[1].error.as_deref(), Some("No URL found in curl command"));
    }
}
