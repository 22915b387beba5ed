//! Backslash escape decoding shared by the literal extractor and the mapping loader.

use std::{iter::Peekable, str::Chars};

/// Decode C-style escape sequences.
///
/// Supports `\n \t \r \\ \" \' \a \b \f \v`, octal `\ooo` (1-3 digits),
/// `\xHH`, `\uXXXX` and `\UXXXXXXXX`. A backslash followed by a line break
/// (`\n`, `\r\n` or `\r`) is a line continuation and produces nothing.
/// Unknown escapes such as `\?` are kept verbatim, backslash included.
///
/// Returns `None` when the input cannot be decoded: a trailing lone
/// backslash, too few hex digits, or a code point that is not a valid `char`.
pub fn decode_escapes(raw: &str) -> Option<String> {
    if !raw.contains('\\') {
        return Some(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = chars.next()?;
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '\n' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            '0'..='7' => out.push(read_octal(escaped, &mut chars)?),
            'x' => out.push(read_hex(&mut chars, 2)?),
            'u' => out.push(read_hex(&mut chars, 4)?),
            'U' => out.push(read_hex(&mut chars, 8)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Some(out)
}

/// Decode escapes, falling back to the raw text when decoding fails.
pub fn decode_or_raw(raw: &str) -> String {
    decode_escapes(raw).unwrap_or_else(|| raw.to_string())
}

fn read_octal(first: char, chars: &mut Peekable<Chars<'_>>) -> Option<char> {
    let mut value = first.to_digit(8)?;
    for _ in 0..2 {
        match chars.peek().and_then(|c| c.to_digit(8)) {
            Some(digit) => {
                value = value * 8 + digit;
                chars.next();
            }
            None => break,
        }
    }
    char::from_u32(value)
}

fn read_hex(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(decode_escapes("保存").as_deref(), Some("保存"));
        assert_eq!(decode_escapes("").as_deref(), Some(""));
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(
            decode_escapes(r#"a\nb\tc\\d\"e\'f"#).as_deref(),
            Some("a\nb\tc\\d\"e'f")
        );
        assert_eq!(decode_escapes(r"\r\a\b\f\v").as_deref(), Some("\r\u{7}\u{8}\u{c}\u{b}"));
    }

    #[test]
    fn test_numeric_escapes() {
        assert_eq!(decode_escapes(r"\x41\102\0").as_deref(), Some("AB\0"));
        assert_eq!(decode_escapes(r"\u4FDD\u5B58").as_deref(), Some("保存"));
        assert_eq!(decode_escapes(r"\U0001F600").as_deref(), Some("\u{1F600}"));
    }

    #[test]
    fn test_unknown_escape_is_kept() {
        assert_eq!(decode_escapes(r"what\?").as_deref(), Some(r"what\?"));
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(decode_escapes("one \\\ntwo").as_deref(), Some("one two"));
        assert_eq!(decode_escapes("one \\\r\ntwo").as_deref(), Some("one two"));
        assert_eq!(decode_escapes("one \\\rtwo").as_deref(), Some("one two"));
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(decode_escapes("trailing\\"), None);
        assert_eq!(decode_escapes(r"\xZZ"), None);
        assert_eq!(decode_escapes(r"\u12"), None);
        assert_eq!(decode_escapes(r"\uD800"), None);
    }

    #[test]
    fn test_decode_or_raw_falls_back() {
        assert_eq!(decode_or_raw(r"bad \x"), r"bad \x");
        assert_eq!(decode_or_raw(r"ok\n"), "ok\n");
    }
}
