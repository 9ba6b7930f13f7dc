//! Recursive-descent JSON parser.
//!
//! The parser walks the UTF-8 input byte-by-byte with a cursor and a
//! one-byte lookahead dispatch. Nesting is bounded by an explicit depth
//! counter rather than the host stack, so adversarial inputs with extreme
//! nesting fail with a regular error instead of exhausting the stack.

use core::fmt;

use crate::node::{Node, Object};
use crate::tables::{CONTROL, UNESCAPE, WHITESPACE};
use crate::Error;

/// Default bound on object/array nesting.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 1000;

/// Per-parse configuration.
///
/// ```
/// use jsontree::{from_str_with, ParseOptions};
///
/// let options = ParseOptions::new().max_depth(16);
/// assert!(from_str_with("[[[1]]]", options).is_ok());
/// assert!(from_str_with(&"[".repeat(64), options).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Maximum object/array nesting before a parse fails with a depth error.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses exactly one root value surrounded by optional whitespace.
pub(crate) fn parse_document(text: &str, options: ParseOptions) -> Result<Node, Error> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        cursor: 0,
        depth: 0,
        max_depth: options.max_depth,
    };
    parser.skip_whitespace()?;
    let root = parser.parse_node()?;
    while parser.cursor < parser.bytes.len() {
        if !WHITESPACE[parser.bytes[parser.cursor] as usize] {
            return Err(parser.error_at(
                parser.cursor,
                "trailing content after the root value",
            ));
        }
        parser.cursor += 1;
    }
    Ok(root)
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn error_at(&self, offset: usize, message: impl fmt::Display) -> Error {
        Error::Parse {
            offset,
            message: format!("{message}{}", excerpt(self.text, offset)),
        }
    }

    /// Advances past insignificant whitespace. Every call site expects more
    /// input afterwards, so running off the end is an error.
    fn skip_whitespace(&mut self) -> Result<(), Error> {
        while self.cursor < self.bytes.len() {
            if !WHITESPACE[self.bytes[self.cursor] as usize] {
                return Ok(());
            }
            self.cursor += 1;
        }
        Err(self.error_at(
            self.cursor,
            "reached the end of input while expecting more content",
        ))
    }

    /// Dispatches on the byte under the cursor, which callers guarantee is
    /// the first significant byte of a value.
    fn parse_node(&mut self) -> Result<Node, Error> {
        match self.bytes[self.cursor] {
            b'{' => self.parse_object().map(Node::Object),
            b'[' => self.parse_array().map(Node::Array),
            b'"' => self.parse_string().map(Node::String),
            b'0'..=b'9' | b'-' => self.parse_number().map(Node::Number),
            b't' => self.expect_literal("true").map(|()| Node::Bool(true)),
            b'f' => self.expect_literal("false").map(|()| Node::Bool(false)),
            b'n' => self.expect_literal("null").map(|()| Node::Null),
            other => Err(self.error_at(
                self.cursor,
                format!(
                    "unexpected marker {:?} (expected one of {{ [ \" 0-9 - t f n)",
                    char::from(other)
                ),
            )),
        }
    }

    /// Guarded entry for values nested inside objects and arrays.
    fn parse_nested(&mut self) -> Result<Node, Error> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error_at(
                self.cursor,
                format!(
                    "nesting exceeds the recursion limit of {}; raise it with \
                     ParseOptions::max_depth if the input is trusted",
                    self.max_depth
                ),
            ));
        }
        let node = self.parse_node()?;
        self.depth -= 1;
        Ok(node)
    }

    fn parse_object(&mut self) -> Result<Object, Error> {
        self.cursor += 1; // '{'
        let mut object = Object::new();

        // First member is special-cased so `{}` parses without a lookbehind.
        self.skip_whitespace()?;
        if self.bytes[self.cursor] == b'}' {
            self.cursor += 1;
            return Ok(object);
        }
        self.parse_object_pair(&mut object)?;

        loop {
            self.skip_whitespace()?;
            match self.bytes[self.cursor] {
                b',' => {
                    self.cursor += 1;
                    self.skip_whitespace()?;
                    self.parse_object_pair(&mut object)?;
                }
                b'}' => {
                    self.cursor += 1;
                    return Ok(object);
                }
                _ => {
                    return Err(self.error_at(
                        self.cursor,
                        "missing delimiter: expected `,` or `}` after an object member",
                    ))
                }
            }
        }
    }

    fn parse_object_pair(&mut self, parent: &mut Object) -> Result<(), Error> {
        if self.bytes[self.cursor] != b'"' {
            return Err(self.error_at(self.cursor, "expected `\"` to begin an object key"));
        }
        let key = self.parse_string()?;

        self.skip_whitespace()?;
        if self.bytes[self.cursor] != b':' {
            return Err(self.error_at(
                self.cursor,
                "missing delimiter: expected `:` after an object key",
            ));
        }
        self.cursor += 1;
        self.skip_whitespace()?;

        let value = self.parse_nested()?;

        // RFC 8259 leaves duplicate-key handling implementation-defined;
        // here the first occurrence wins.
        parent.entry(key).or_insert(value);
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Vec<Node>, Error> {
        self.cursor += 1; // '['
        let mut array = Vec::new();

        self.skip_whitespace()?;
        if self.bytes[self.cursor] == b']' {
            self.cursor += 1;
            return Ok(array);
        }
        array.push(self.parse_nested()?);

        loop {
            self.skip_whitespace()?;
            match self.bytes[self.cursor] {
                b',' => {
                    self.cursor += 1;
                    self.skip_whitespace()?;
                    array.push(self.parse_nested()?);
                }
                b']' => {
                    self.cursor += 1;
                    return Ok(array);
                }
                _ => {
                    return Err(self.error_at(
                        self.cursor,
                        "missing delimiter: expected `,` or `]` after an array element",
                    ))
                }
            }
        }
    }

    /// Parses a quoted string. Verbatim runs are appended in whole segments;
    /// the output is only flushed at escape sequences and the closing quote.
    fn parse_string(&mut self) -> Result<String, Error> {
        self.cursor += 1; // '"'
        let mut value = String::new();
        let mut segment_start = self.cursor;

        while self.cursor < self.bytes.len() {
            let byte = self.bytes[self.cursor];

            if byte == b'"' {
                value.push_str(&self.text[segment_start..self.cursor]);
                self.cursor += 1;
                return Ok(value);
            }

            if byte == b'\\' {
                value.push_str(&self.text[segment_start..self.cursor]);
                let escape_start = self.cursor;
                self.cursor += 1;
                let Some(&letter) = self.bytes.get(self.cursor) else {
                    return Err(self.error_at(
                        escape_start,
                        "reached the end of input inside an escape sequence",
                    ));
                };
                let replacement = UNESCAPE[letter as usize];
                if replacement != 0 {
                    value.push(char::from(replacement));
                    self.cursor += 1;
                } else if letter == b'u' {
                    self.cursor += 1;
                    self.parse_unicode_escape(escape_start, &mut value)?;
                } else {
                    return Err(self.error_at(
                        self.cursor,
                        format!("unknown escape sequence `\\{}`", char::from(letter)),
                    ));
                }
                segment_start = self.cursor;
                continue;
            }

            if CONTROL[byte as usize] {
                return Err(self.error_at(
                    self.cursor,
                    format!("unescaped control character (byte {byte:#04x}) in string"),
                ));
            }

            self.cursor += 1;
        }

        Err(self.error_at(
            self.cursor,
            "reached the end of input while reading string contents",
        ))
    }

    /// Decodes `\uXXXX` (the cursor is past the `u`) and re-encodes it as
    /// UTF-8. High surrogates must be followed by a low-surrogate escape;
    /// the pair is combined into one supplementary-plane character.
    fn parse_unicode_escape(&mut self, escape_start: usize, out: &mut String) -> Result<(), Error> {
        let first = self.parse_hex4()?;
        let character = match first {
            0xD800..=0xDBFF => {
                if self.bytes.get(self.cursor) != Some(&b'\\')
                    || self.bytes.get(self.cursor + 1) != Some(&b'u')
                {
                    return Err(self.error_at(
                        escape_start,
                        "unpaired high surrogate: expected a following \\u low surrogate",
                    ));
                }
                self.cursor += 2;
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error_at(
                        escape_start,
                        format!("invalid low surrogate {low:#06x} in \\u escape pair"),
                    ));
                }
                let combined = 0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined).ok_or_else(|| {
                    self.error_at(escape_start, "escape pair is not a valid scalar value")
                })?
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(
                    escape_start,
                    format!("unpaired low surrogate {first:#06x} in \\u escape"),
                ))
            }
            codepoint => char::from_u32(codepoint).ok_or_else(|| {
                self.error_at(escape_start, "\\u escape is not a valid scalar value")
            })?,
        };
        out.push(character);
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32, Error> {
        if self.cursor + 4 > self.bytes.len() {
            return Err(self.error_at(
                self.cursor,
                "truncated \\u escape: expected four hex digits",
            ));
        }
        let mut value = 0u32;
        for _ in 0..4 {
            let byte = self.bytes[self.cursor];
            let digit = match byte {
                b'0'..=b'9' => byte - b'0',
                b'a'..=b'f' => byte - b'a' + 10,
                b'A'..=b'F' => byte - b'A' + 10,
                _ => {
                    return Err(self.error_at(
                        self.cursor,
                        format!("invalid hex digit {:?} in \\u escape", char::from(byte)),
                    ))
                }
            };
            value = (value << 4) | u32::from(digit);
            self.cursor += 1;
        }
        Ok(value)
    }

    /// Converts the longest parseable numeric prefix under the cursor,
    /// locale-independently and without heap allocation. This is slightly
    /// more permissive than the strict JSON number grammar (`-01`, `2.e+3`,
    /// and similar shapes convert cleanly), mirroring prefix-style text-to-
    /// float conversion.
    fn parse_number(&mut self) -> Result<f64, Error> {
        let start = self.cursor;
        let Some(end) = longest_number_prefix(self.bytes, start) else {
            return Err(self.error_at(start, "expected a number at this position"));
        };

        // The scanner only admits prefixes matching the float grammar, so
        // the slice boundary is valid and the conversion succeeds.
        let candidate = &self.text[start..end];
        let value = candidate
            .parse::<f64>()
            .map_err(|_| self.error_at(start, "expected a number at this position"))?;
        let spelled_infinity = candidate.bytes().any(|byte| matches!(byte, b'i' | b'I'));
        if value.is_infinite() && !spelled_infinity {
            return Err(self.error_at(start, "number is out of range for a 64-bit float"));
        }
        self.cursor = end;
        Ok(value)
    }

    fn expect_literal(&mut self, literal: &'static str) -> Result<(), Error> {
        let end = self.cursor + literal.len();
        if end > self.bytes.len() {
            return Err(self.error_at(
                self.cursor,
                format!("reached the end of input while reading `{literal}`"),
            ));
        }
        if &self.bytes[self.cursor..end] != literal.as_bytes() {
            return Err(self.error_at(
                self.cursor,
                format!("could not read the literal `{literal}`"),
            ));
        }
        self.cursor = end;
        Ok(())
    }
}

/// Finds the end of the longest prefix of `bytes[start..]` accepted by
/// `f64::from_str` in a single left-to-right pass: an optional sign, then
/// either a named non-finite spelling (`inf`, `infinity`, `nan`, any case)
/// or a mantissa with one optional `.` and one optional signed exponent.
/// `None` when no prefix forms a number at all.
fn longest_number_prefix(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    if let Some(len) = named_float_prefix(&bytes[pos..]) {
        return Some(pos + len);
    }

    let mut longest = None;
    let integer_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let has_integer_digits = pos > integer_start;
    if has_integer_digits {
        longest = Some(pos);
    }

    if bytes.get(pos) == Some(&b'.') {
        let fraction_start = pos + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        // `1.`, `1.5`, and `.5` are all accepted; a lone `.` is not.
        if has_integer_digits || fraction_end > fraction_start {
            longest = Some(fraction_end);
            pos = fraction_end;
        }
    }

    if longest == Some(pos) && matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exponent_pos = pos + 1;
        if matches!(bytes.get(exponent_pos), Some(b'+' | b'-')) {
            exponent_pos += 1;
        }
        let exponent_digits_start = exponent_pos;
        while bytes.get(exponent_pos).is_some_and(u8::is_ascii_digit) {
            exponent_pos += 1;
        }
        if exponent_pos > exponent_digits_start {
            longest = Some(exponent_pos);
        }
    }

    longest
}

fn named_float_prefix(rest: &[u8]) -> Option<usize> {
    for spelling in [b"infinity".as_slice(), b"inf".as_slice(), b"nan".as_slice()] {
        if rest.len() >= spelling.len()
            && rest[..spelling.len()].eq_ignore_ascii_case(spelling)
        {
            return Some(spelling.len());
        }
    }
    None
}

/// Renders a windowed excerpt of the input around `cursor`: the line number,
/// up to 24 bytes of context on each side, and a caret marking the position.
fn excerpt(text: &str, cursor: usize) -> String {
    const MAX_LEFT_WIDTH: usize = 24;
    const MAX_RIGHT_WIDTH: usize = 24;

    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return String::new();
    }
    let cursor = cursor.min(bytes.len() - 1);

    let line_number = 1 + bytes[..cursor].iter().filter(|&&b| b == b'\n').count();

    let mut line_start = cursor;
    while line_start > 0 {
        if bytes[line_start - 1] == b'\n' || cursor - line_start >= MAX_LEFT_WIDTH {
            break;
        }
        line_start -= 1;
    }
    let mut line_end = cursor;
    while line_end + 1 < bytes.len() {
        if bytes[line_end + 1] == b'\n' || line_end - cursor >= MAX_RIGHT_WIDTH {
            break;
        }
        line_end += 1;
    }

    let contents = String::from_utf8_lossy(&bytes[line_start..=line_end]);
    let prefix = format!("Line {line_number}: ");

    // The caret line is aligned in displayed characters, not bytes, so it
    // stays under the right column when the excerpt contains multibyte UTF-8.
    let left_width = String::from_utf8_lossy(&bytes[line_start..cursor])
        .chars()
        .count();
    let right_width = String::from_utf8_lossy(&bytes[cursor..=line_end])
        .chars()
        .count()
        .saturating_sub(1);

    let mut out = String::with_capacity(7 + 2 * prefix.len() + 2 * contents.len());
    out.push('\n');
    out.push_str(&prefix);
    out.push_str(&contents);
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(prefix.len()));
    out.extend(std::iter::repeat('-').take(left_width));
    out.push('^');
    out.extend(std::iter::repeat('-').take(right_width));
    out.push_str(" [!]");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Null;
    use crate::{from_str, from_str_with};

    #[test]
    fn parses_scalars() {
        assert_eq!(from_str("null").unwrap(), Node::Null);
        assert_eq!(from_str("true").unwrap(), Node::Bool(true));
        assert_eq!(from_str("false").unwrap(), Node::Bool(false));
        assert_eq!(from_str("42").unwrap(), Node::Number(42.0));
        assert_eq!(from_str("-1.5e3").unwrap(), Node::Number(-1500.0));
        assert_eq!(
            from_str("\"hello\"").unwrap(),
            Node::String("hello".into())
        );
    }

    #[test]
    fn parses_empty_containers() {
        assert_eq!(from_str("{}").unwrap(), Node::Object(Object::new()));
        assert_eq!(from_str("[ ]").unwrap(), Node::Array(Vec::new()));
    }

    #[test]
    fn parses_nested_structure() {
        let node = from_str(r#"{"arr": [1, {"nested": true}], "num": 42}"#).unwrap();
        assert!(node.is_object());
        assert!(node["arr"].is_array());
        assert_eq!(node["arr"].get_array().unwrap().len(), 2);
        assert_eq!(node["num"].as_f64(), Some(42.0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let node = from_str(" \r\n\t{\n\"a\" : 1\n}\t ").unwrap();
        assert_eq!(node["a"].as_f64(), Some(1.0));
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        let node = from_str(r#"{"a":1,"a":2}"#).unwrap();
        let object = node.get_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(node["a"].as_f64(), Some(1.0));
    }

    #[test]
    fn string_escapes_decode() {
        let node = from_str(r#""a\"b\\c\td\/e""#).unwrap();
        assert_eq!(node.as_str(), Some("a\"b\\c\td/e"));
    }

    #[test]
    fn unicode_escape_decodes_to_utf8() {
        let node = from_str(r#""\u00e9""#).unwrap();
        assert_eq!(node.as_str(), Some("é"));
        assert_eq!(node.as_str().unwrap().as_bytes(), [0xC3, 0xA9]);
    }

    #[test]
    fn surrogate_pair_combines() {
        let node = from_str(r#""\ud83d\ude00""#).unwrap();
        assert_eq!(node.as_str(), Some("😀"));
    }

    #[test]
    fn unpaired_surrogates_are_rejected() {
        assert!(from_str(r#""\ud83d""#).is_err());
        assert!(from_str(r#""\ud83dx""#).is_err());
        assert!(from_str(r#""\ud83dA""#).is_err());
        assert!(from_str(r#""\ude00""#).is_err());
    }

    #[test]
    fn raw_multibyte_utf8_passes_through() {
        let node = from_str("\"дерево 🌳\"").unwrap();
        assert_eq!(node.as_str(), Some("дерево 🌳"));
    }

    #[test]
    fn control_characters_must_be_escaped() {
        assert!(from_str("\"a\tb\"").is_err());
        assert!(from_str("\"a\u{1}b\"").is_err());
        assert_eq!(from_str(r#""a\tb""#).unwrap().as_str(), Some("a\tb"));
    }

    #[test]
    fn numbers_use_longest_valid_prefix() {
        // `-2..` converts as `-2.`, leaving the second dot for the caller,
        // which then fails on the trailing content.
        assert!(from_str("-2..").is_err());
        let node = from_str("[-2., 1]").unwrap();
        assert_eq!(node.get_array().unwrap()[0].as_f64(), Some(-2.0));
    }

    #[test]
    fn number_prefix_takes_longest_grammar_match() {
        let node = from_str("[1.5e-3, -.5, 0.5e1]").unwrap();
        let array = node.get_array().unwrap();
        assert_eq!(array[0].as_f64(), Some(0.0015));
        assert_eq!(array[1].as_f64(), Some(-0.5));
        assert_eq!(array[2].as_f64(), Some(5.0));

        // The prefix stops where the grammar does; leftovers are trailing
        // content errors.
        assert!(from_str("1e2e3").is_err());
        assert!(from_str("0x10").is_err());
        assert!(from_str("-.").is_err());
    }

    #[test]
    fn long_invalid_number_tails_fail_in_one_pass() {
        // A single left-to-right scan stays linear on inputs shaped to make
        // rescanning quadratic.
        let hostile = format!("{}{}", "1".repeat(200_000), "-".repeat(200_000));
        let started = std::time::Instant::now();
        assert!(from_str(&hostile).is_err());
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn number_overflow_is_an_error() {
        assert!(matches!(
            from_str("1e999"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn truncated_literals_fail_with_position() {
        for input in ["tru", "fals", "nul", "truth", "nulL"] {
            let error = from_str(input).unwrap_err();
            assert!(matches!(error, Error::Parse { .. }), "{input}");
        }
    }

    #[test]
    fn trailing_content_is_rejected() {
        assert!(from_str("null extra").is_err());
        assert!(from_str("{} {}").is_err());
        assert!(from_str("1 2").is_err());
        assert!(from_str("null \n\t ").is_ok());
    }

    #[test]
    fn missing_delimiters_are_rejected() {
        assert!(from_str(r#"{"a":1 "b":2}"#).is_err());
        assert!(from_str("[1 2]").is_err());
        assert!(from_str(r#"{"a" 1}"#).is_err());
        assert!(from_str("[1, 2,]").is_err());
        assert!(from_str(r#"{"a":1,}"#).is_err());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(from_str("").is_err());
        assert!(from_str("   \n ").is_err());
    }

    #[test]
    fn depth_limit_fails_fast() {
        let hostile = "[".repeat(10_000);
        let error = from_str_with(&hostile, ParseOptions::new().max_depth(100)).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("recursion limit of 100"), "{message}");
    }

    #[test]
    fn depth_limit_counts_only_nesting() {
        // A wide but shallow document never trips the limit.
        let wide = format!("[{}]", vec!["1"; 5000].join(","));
        assert!(from_str_with(&wide, ParseOptions::new().max_depth(4)).is_ok());

        let options = ParseOptions::new().max_depth(2);
        assert!(from_str_with("[[1]]", options).is_ok());
        assert!(from_str_with("[[[1]]]", options).is_err());
    }

    #[test]
    fn parse_errors_carry_an_excerpt() {
        let error = from_str("{\"a\": truu}").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("Line 1"), "{message}");
        assert!(message.contains('^'), "{message}");
    }

    #[test]
    fn excerpt_window_is_bounded() {
        let long_line = "x".repeat(500);
        let rendered = excerpt(&long_line, 250);
        // prefix + at most 24 bytes on each side of the caret position
        assert!(rendered.len() < 150, "{}", rendered.len());
        assert!(rendered.contains("Line 1"));
    }

    #[test]
    fn excerpt_caret_aligns_after_multibyte_text() {
        let text = "{\"ключ\": truu}";
        let offset = text.find("truu").unwrap();
        let rendered = excerpt(text, offset);
        let caret_line = rendered.lines().last().unwrap();
        let caret_column = caret_line.chars().position(|c| c == '^').unwrap();
        let expected = "Line 1: ".len() + text[..offset].chars().count();
        assert_eq!(caret_column, expected, "{rendered}");
    }

    #[test]
    fn excerpt_reports_line_numbers() {
        let rendered = excerpt("{\n  1,\n  2\n}", 7);
        assert!(rendered.contains("Line 3"), "{rendered}");
    }

    #[test]
    fn root_null_via_literal_dispatch() {
        assert_eq!(from_str("null").unwrap().get_null().unwrap(), Null);
    }
}
