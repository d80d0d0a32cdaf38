//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{detect_delimiter, Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
