/// Request domain layer: tokenizing, flag parsing and the shared request model.
pub mod errors;
pub mod model;
pub mod parse;
pub mod tokenize;

pub use errors::ConvertError;
pub use model::{Body, ParsedRequest};
pub use parse::parse;
