//! Byte-indexed lookup tables shared by the parser and serializer.
//!
//! All four tables are immutable `const` data, so they are freely shared
//! across threads parsing separate documents.

/// Insignificant whitespace per ECMA-404: space, tab, carriage return, newline.
pub(crate) const WHITESPACE: [bool; 256] = {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\r' as usize] = true;
    table[b'\n' as usize] = true;
    table
};

/// Forward table: byte that must be escaped on output -> its escape letter.
/// Zero marks bytes that are written verbatim. The forward slash is left
/// unmapped: escaping it is permitted by the grammar but redundant.
pub(crate) const ESCAPE: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'"' as usize] = b'"';
    table[b'\\' as usize] = b'\\';
    table[0x08] = b'b';
    table[0x0C] = b'f';
    table[b'\n' as usize] = b'n';
    table[b'\r' as usize] = b'r';
    table[b'\t' as usize] = b't';
    table
};

/// Reverse table: second byte of a 2-character escape sequence -> the byte it
/// denotes. Zero marks invalid escape letters (`u` is handled separately).
pub(crate) const UNESCAPE: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'"' as usize] = b'"';
    table[b'\\' as usize] = b'\\';
    table[b'/' as usize] = b'/';
    table[b'b' as usize] = 0x08;
    table[b'f' as usize] = 0x0C;
    table[b'n' as usize] = b'\n';
    table[b'r' as usize] = b'\r';
    table[b't' as usize] = b'\t';
    table
};

/// Control bytes (U+0000..=U+001F) that must not appear unescaped in strings.
pub(crate) const CONTROL: [bool; 256] = {
    let mut table = [false; 256];
    let mut byte = 0usize;
    while byte <= 31 {
        table[byte] = true;
        byte += 1;
    }
    table
};
