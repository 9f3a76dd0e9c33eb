/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod all;
pub mod convert;
pub mod inspect;

use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::emit::Format;
use crate::request::ConvertError;

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `ConvertError` on any command failure.
pub fn dispatch(command: &Command, ctx: &OutputCtx) -> Result<(), ConvertError> {
    match command {
        Command::Python(args) => convert::run(Format::Python, args, None, ctx),
        Command::Csharp(args) => convert::run(Format::CSharp, args, None, ctx),
        Command::Http(args) => convert::run(Format::Http, &args.convert, args.name.as_deref(), ctx),
        Command::All(args) => all::run(args, ctx),
        Command::Inspect(args) => inspect::run(args, ctx),
    }
}
