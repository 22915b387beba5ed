//! A small C/C++/QML tokenizer.
//!
//! Only the token classes needed to recognise translation calls are
//! distinguished: identifiers, string literals, character literals, numbers
//! and single punctuation characters. Whitespace and comments are skipped.
//! The lexer never fails: malformed input (an unterminated literal or comment)
//! is closed at the end of the line or file.
//!
//! In QML and JavaScript files `'...'` is a string literal like `"..."`; in
//! C++ it is a character literal.

use std::path::Path;

/// Encoding prefixes that may precede an ordinary string or character literal.
const LITERAL_PREFIXES: &[&str] = &["L", "u", "U", "u8"];

/// Prefixes that introduce a raw string literal.
const RAW_PREFIXES: &[&str] = &["R", "LR", "uR", "UR", "u8R"];

/// A string literal as it appears in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLiteral<'a> {
    /// Text between the delimiters, escape sequences left untouched.
    pub body: &'a str,
    /// Raw literals (`R"(...)"`) carry no escape sequences.
    pub raw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Ident(&'a str),
    Str(StringLiteral<'a>),
    Char,
    Number,
    Punct(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// 1-based line where the token starts.
    pub line: usize,
}

/// Language family of a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    #[default]
    Cpp,
    /// QML and JavaScript: single quotes delimit strings.
    Script,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("qml" | "js" | "mjs") => SourceKind::Script,
            _ => SourceKind::Cpp,
        }
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    kind: SourceKind,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self::with_kind(src, SourceKind::Cpp)
    }

    pub fn with_kind(src: &'a str, kind: SourceKind) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            kind,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    fn skip_trivia(&mut self) {
        loop {
            match (self.peek_byte(0), self.peek_byte(1)) {
                (Some(b'\n'), _) => {
                    self.line += 1;
                    self.pos += 1;
                }
                (Some(b), _) if b.is_ascii_whitespace() => self.pos += 1,
                (Some(b'/'), Some(b'/')) => {
                    while let Some(b) = self.peek_byte(0) {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.pos += 2;
                    loop {
                        match (self.peek_byte(0), self.peek_byte(1)) {
                            (Some(b'*'), Some(b'/')) => {
                                self.pos += 2;
                                break;
                            }
                            (Some(b'\n'), _) => {
                                self.line += 1;
                                self.pos += 1;
                            }
                            (Some(_), _) => self.pos += 1,
                            (None, _) => break,
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Lex a quoted literal whose opening quote is at `self.pos`.
    /// Returns the body between the quotes.
    fn quoted(&mut self, quote: u8) -> &'a str {
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek_byte(0) {
            match b {
                b'\\' => {
                    let skip = match (self.peek_byte(1), self.peek_byte(2)) {
                        (Some(b'\r'), Some(b'\n')) => 3,
                        _ => 2,
                    };
                    if matches!(self.peek_byte(skip - 1), Some(b'\n')) {
                        self.line += 1;
                    }
                    self.pos = (self.pos + skip).min(self.src.len());
                }
                b'\n' => return &self.src[start..self.pos],
                b if b == quote => {
                    let body = &self.src[start..self.pos];
                    self.pos += 1;
                    return body;
                }
                _ => self.pos += 1,
            }
        }
        &self.src[start..]
    }

    /// Lex a raw string whose opening quote is at `self.pos`.
    fn raw_string(&mut self) -> &'a str {
        self.pos += 1;
        let rest = &self.src[self.pos..];
        let Some(open) = rest.find('(') else {
            return self.quoted_from_here();
        };
        let delimiter = &rest[..open];
        let body_start = self.pos + open + 1;
        let terminator = format!("){}\"", delimiter);

        let (body, end) = match self.src[body_start..].find(&terminator) {
            Some(len) => (
                &self.src[body_start..body_start + len],
                body_start + len + terminator.len(),
            ),
            None => (&self.src[body_start..], self.src.len()),
        };
        self.line += self.src[self.pos..end].matches('\n').count();
        self.pos = end;
        body
    }

    /// Fallback for `R"` without a delimiter: treat it as an ordinary literal.
    fn quoted_from_here(&mut self) -> &'a str {
        self.pos -= 1;
        self.quoted(b'"')
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek_byte(0) {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    fn number(&mut self) {
        while let Some(b) = self.peek_byte(0) {
            let separator = b == b'\''
                && self
                    .peek_byte(1)
                    .is_some_and(|next| next.is_ascii_alphanumeric());
            if b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || separator {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_trivia();
        let line = self.line;
        let first = self.peek_byte(0)?;

        let kind = match first {
            b'"' => TokenKind::Str(StringLiteral {
                body: self.quoted(b'"'),
                raw: false,
            }),
            b'\'' if self.kind == SourceKind::Script => TokenKind::Str(StringLiteral {
                body: self.quoted(b'\''),
                raw: false,
            }),
            b'\'' => {
                self.quoted(b'\'');
                TokenKind::Char
            }
            b'0'..=b'9' => {
                self.number();
                TokenKind::Number
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                let ident = self.identifier();
                match self.peek_byte(0) {
                    Some(b'"') if RAW_PREFIXES.contains(&ident) => TokenKind::Str(StringLiteral {
                        body: self.raw_string(),
                        raw: true,
                    }),
                    Some(b'"') if LITERAL_PREFIXES.contains(&ident) => {
                        TokenKind::Str(StringLiteral {
                            body: self.quoted(b'"'),
                            raw: false,
                        })
                    }
                    Some(b'\'') if LITERAL_PREFIXES.contains(&ident) => {
                        self.quoted(b'\'');
                        TokenKind::Char
                    }
                    _ => TokenKind::Ident(ident),
                }
            }
            _ => {
                let c = self.src[self.pos..].chars().next()?;
                self.pos += c.len_utf8();
                TokenKind::Punct(c)
            }
        };

        Some(Token { kind, line })
    }
}
