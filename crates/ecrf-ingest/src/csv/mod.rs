//! Delimited text parsing.

mod reader;
mod tokenizer;

pub use reader::{CsvOptions, DEFAULT_DELIMITER, parse_csv};
pub use tokenizer::split_line;
