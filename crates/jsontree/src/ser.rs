//! Serialization of a [`Node`] tree to text.
//!
//! Two output modes share one recursive writer: `Pretty` emits one member per
//! line with four-space indentation, `Minimized` emits no insignificant
//! whitespace at all. Both produce text that parses back to an equal tree,
//! except for non-finite numbers, which have no JSON spelling and are written
//! as the strings `"inf"`, `"-inf"`, and `"nan"`.

use core::fmt::Write;

use crate::node::Node;
use crate::tables::{CONTROL, ESCAPE};

const INDENT: &str = "    ";

/// Output layout for [`Node::to_text`] and [`Node::to_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// One member per line, nested levels indented by four spaces.
    #[default]
    Pretty,
    /// No insignificant whitespace.
    Minimized,
}

pub(crate) fn write_node(out: &mut String, node: &Node, format: Format) {
    write_value(out, node, format, 0);
}

fn write_value(out: &mut String, node: &Node, format: Format, level: usize) {
    match node {
        Node::Null => out.push_str("null"),
        Node::Bool(true) => out.push_str("true"),
        Node::Bool(false) => out.push_str("false"),
        Node::Number(number) => write_number(out, *number),
        Node::String(string) => write_string(out, string),
        Node::Array(array) => {
            if array.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (index, element) in array.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                open_line(out, format, level + 1);
                write_value(out, element, format, level + 1);
            }
            open_line(out, format, level);
            out.push(']');
        }
        Node::Object(object) => {
            if object.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (index, (key, value)) in object.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                open_line(out, format, level + 1);
                write_string(out, key);
                out.push(':');
                if matches!(format, Format::Pretty) {
                    out.push(' ');
                }
                // The value continues on the key's line; its own nested
                // members indent one level deeper.
                write_value(out, value, format, level + 1);
            }
            open_line(out, format, level);
            out.push('}');
        }
    }
}

fn open_line(out: &mut String, format: Format, level: usize) {
    if matches!(format, Format::Pretty) {
        out.push('\n');
        for _ in 0..level {
            out.push_str(INDENT);
        }
    }
}

/// Writes `value` quoted, copying verbatim runs as whole slices and flushing
/// only at bytes the grammar requires escaped. Control characters without a
/// 2-character escape are written as `\u00XX`; all other UTF-8 passes through
/// untouched.
fn write_string(out: &mut String, value: &str) {
    out.push('"');
    let mut segment_start = 0;
    for (index, byte) in value.bytes().enumerate() {
        if !byte.is_ascii() {
            continue;
        }
        let letter = ESCAPE[byte as usize];
        if letter == 0 && !CONTROL[byte as usize] {
            continue;
        }
        // Escapable bytes are ASCII, so both slice boundaries are valid.
        out.push_str(&value[segment_start..index]);
        if letter != 0 {
            out.push('\\');
            out.push(char::from(letter));
        } else {
            let _ = write!(out, "\\u{byte:04x}");
        }
        segment_start = index + 1;
    }
    out.push_str(&value[segment_start..]);
    out.push('"');
}

/// Writes the shortest decimal spelling that parses back to the same bit
/// pattern, switching to exponent notation outside `[1e-5, 1e16)` to keep
/// very large and very small magnitudes compact.
fn write_number(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("\"nan\"");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "\"inf\"" } else { "\"-inf\"" });
    } else {
        let magnitude = value.abs();
        if magnitude >= 1e16 || (magnitude > 0.0 && magnitude < 1e-5) {
            let _ = write!(out, "{value:e}");
        } else {
            let _ = write!(out, "{value}");
        }
    }
}
