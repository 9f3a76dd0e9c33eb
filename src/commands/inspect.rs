/// `inspect` command: print the parsed request model.
use crate::cli::OutputCtx;
use crate::cli::args::InspectArgs;
use crate::cli::input::acquire;
use crate::cli::output::print_json;
use crate::request::{ConvertError, parse};

/// Run `curlconv inspect`.
///
/// # Errors
///
/// Returns `ConvertError` when no command is given or it cannot be parsed.
pub fn run(args: &InspectArgs, ctx: &OutputCtx) -> Result<(), ConvertError> {
    let command = acquire(&args.input.curl)?;

    let _t_parse = ctx.timer("parse");
    let request = parse(&command)?;
    drop(_t_parse);

    print_json(&request);
    Ok(())
}
