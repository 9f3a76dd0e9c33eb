/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// curlconv — turn curl command lines into Python, C# and .http requests.
#[derive(Debug, Parser)]
#[command(
    name = "curlconv",
    about = "Convert curl commands to Python requests, C# HttpClient and .http files",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Print errors, summaries and parsed requests as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log parser decisions and stage timings to stderr (RUST_LOG overrides).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert to a Python script using `requests`.
    Python(ConvertArgs),
    /// Convert to a C# program using `HttpClient`.
    Csharp(ConvertArgs),
    /// Convert to a `.http` request file.
    Http(HttpArgs),
    /// Convert to every format, writing timestamped files into a directory.
    All(AllArgs),
    /// Print the parsed request model as JSON.
    Inspect(InspectArgs),
}

/// Where the curl command comes from.
///
/// Words given on the command line are joined with single spaces. With no
/// words, piped stdin is read; on a terminal the user is prompted.
#[derive(Debug, Args)]
pub struct CurlInput {
    /// The curl command, quoted as one argument or spread over several.
    #[arg(
        value_name = "CURL_COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub curl: Vec<String>,
}

/// Arguments for `curlconv python` / `curlconv csharp`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Write the result to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub input: CurlInput,
}

/// Arguments for `curlconv http`.
#[derive(Debug, Args)]
pub struct HttpArgs {
    /// Request title used in the `###` separator line.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Arguments for `curlconv all`.
#[derive(Debug, Args)]
pub struct AllArgs {
    /// Output directory (created if missing).
    #[arg(short = 'd', long = "dir", value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub input: CurlInput,
}

/// Arguments for `curlconv inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: CurlInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphen_values_pass_through() {
        let cli = Cli::try_parse_from([
            "curlconv", "python", "-o", "out.py", "curl", "-X", "POST", "https://h", "-k",
        ])
        .unwrap();
        let Command::Python(args) = cli.command else {
            panic!("expected python subcommand");
        };
        assert_eq!(args.output, Some(PathBuf::from("out.py")));
        assert_eq!(args.input.curl, vec!["curl", "-X", "POST", "https://h", "-k"]);
    }

    #[test]
    fn test_all_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["curlconv", "--json", "all", "curl https://h"]).unwrap();
        assert!(cli.json);
        let Command::All(args) = cli.command else {
            panic!("expected all subcommand");
        };
        assert_eq!(args.dir, PathBuf::from("."));
        assert_eq!(args.input.curl, vec!["curl https://h"]);
    }

    #[test]
    fn test_http_name() {
        let cli =
            Cli::try_parse_from(["curlconv", "http", "-n", "Users", "curl", "https://h"]).unwrap();
        let Command::Http(args) = cli.command else {
            panic!("expected http subcommand");
        };
        assert_eq!(args.name.as_deref(), Some("Users"));
        assert_eq!(args.convert.input.curl, vec!["curl", "https://h"]);
    }

    #[test]
    fn test_no_command_words_is_allowed() {
        let cli = Cli::try_parse_from(["curlconv", "inspect"]).unwrap();
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect subcommand");
        };
        assert!(args.input.curl.is_empty());
    }
}
