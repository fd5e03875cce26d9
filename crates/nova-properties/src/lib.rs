//! Java `.properties` support for Nova's string externalization tooling.
//!
//! - [`string_literal_to_properties_value`] turns the source text of a Java string literal or
//!   text block into the value text of a `.properties` entry.
//! - [`parse`] is a minimal, range-preserving reader for `.properties` files.
//! - [`format_entry`] / [`append_entry`] write entries back out.

mod literal;
mod parse;
pub mod text_block;
mod write;

pub use literal::{
    string_literal_to_properties_value, InvalidLiteralFormat, InvalidLiteralKind, LiteralKind,
};
pub use parse::{parse, PropertiesFile, PropertyEntry};
pub use write::{
    append_entry, escape_key, externalize, format_entry, LineSeparator, WriteOptions,
};
