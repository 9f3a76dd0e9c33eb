/// CLI layer: argument parsing, input acquisition and output.
pub mod args;
pub mod input;
pub mod output;

pub use args::Cli;
pub use output::{OutputCtx, write_error};
