//! Parse, inspect, build, and serialize JSON document trees.
//!
//! The central type is [`Node`], a recursive sum over the six JSON value
//! kinds. Documents parse into a `Node`, render back to text in pretty or
//! minimized form, and can be built up in place through indexing:
//!
//! ```
//! use jsontree::{from_str, Format, Node};
//!
//! let mut config = from_str(r#"{"retries": 3, "verbose": false}"#)?;
//! assert_eq!(config["retries"].as_f64(), Some(3.0));
//!
//! config["verbose"] = Node::from(true);
//! config["tags"] = Node::from(vec!["fast", "local"]);
//!
//! assert_eq!(
//!     config.to_text(Format::Minimized),
//!     r#"{"retries":3,"tags":["fast","local"],"verbose":true}"#,
//! );
//! # Ok::<(), jsontree::Error>(())
//! ```
//!
//! Parsing is strict about structure (delimiters, escapes, unpaired
//! surrogates, trailing content) and bounded in depth; see [`ParseOptions`]
//! for the recursion limit. Objects are ordered maps, so serialization is
//! deterministic with keys in byte-wise order.

mod convert;
mod error;
#[cfg(feature = "serde_json")]
mod impls;
mod node;
mod parser;
mod ser;
mod tables;

pub use error::Error;
pub use node::{Alternative, Array, Node, Null, Object};
pub use parser::ParseOptions;
pub use ser::Format;

/// Parses a complete JSON document with the default [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Parse`] when `text` is not one well-formed document.
pub fn from_str(text: &str) -> Result<Node, Error> {
    parser::parse_document(text, ParseOptions::new())
}

/// Parses a complete JSON document with explicit [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Parse`] when `text` is not one well-formed document or
/// its nesting exceeds the configured depth.
pub fn from_str_with(text: &str, options: ParseOptions) -> Result<Node, Error> {
    parser::parse_document(text, options)
}

/// Reads and parses a JSON document from a file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Parse`]
/// when its contents are malformed.
pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Node, Error> {
    from_file_with(path, ParseOptions::new())
}

/// Reads and parses a JSON document from a file with explicit
/// [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Parse`]
/// when its contents are malformed.
pub fn from_file_with(
    path: impl AsRef<std::path::Path>,
    options: ParseOptions,
) -> Result<Node, Error> {
    let text = std::fs::read_to_string(path)?;
    from_str_with(&text, options)
}

impl std::str::FromStr for Node {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        from_str(text)
    }
}
