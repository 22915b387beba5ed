//! Literal extraction: recover the text passed to translation-marker calls.
//!
//! A call site is a marker identifier (e.g. `tr`) followed by `(` and one or
//! more adjacent string literals. Adjacent literals are concatenated the way
//! the C++ compiler would, so
//!
//! ```text
//! tr("Select a "
//!    "template")
//! ```
//!
//! yields the single text `Select a template`. The argument list must close
//! (or move on to the next argument) right after the literals; anything else,
//! such as `tr("a" + suffix)`, is a computed argument and yields nothing.

pub mod escape;
pub mod lexer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;

use crate::core::scan::SourceScanner;
use escape::decode_or_raw;
use lexer::{Lexer, SourceKind, TokenKind};

/// One translatable literal found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLiteral {
    /// Concatenated, escape-decoded text.
    pub text: String,
    pub file: PathBuf,
    /// 1-based line of the marker identifier.
    pub line: usize,
}

/// A call site inside a single source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub text: String,
    pub line: usize,
}

/// Find every marker call with a literal argument in `source`.
pub fn find_call_sites(source: &str, markers: &[String], kind: SourceKind) -> Vec<CallSite> {
    let tokens: Vec<_> = Lexer::with_kind(source, kind).collect();
    let mut sites = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        i += 1;

        let TokenKind::Ident(name) = token.kind else {
            continue;
        };
        if !markers.iter().any(|m| m == name) {
            continue;
        }
        if !matches!(tokens.get(i).map(|t| t.kind), Some(TokenKind::Punct('('))) {
            continue;
        }

        let mut j = i + 1;
        let mut text = String::new();
        let mut fragments = 0;
        while let Some(TokenKind::Str(literal)) = tokens.get(j).map(|t| t.kind) {
            if literal.raw {
                text.push_str(literal.body);
            } else {
                text.push_str(&decode_or_raw(literal.body));
            }
            fragments += 1;
            j += 1;
        }

        let closed = matches!(
            tokens.get(j).map(|t| t.kind),
            Some(TokenKind::Punct(')' | ','))
        );
        if fragments > 0 && closed {
            sites.push(CallSite {
                text,
                line: token.line,
            });
            i = j;
        }
    }

    sites
}

/// Walks a source tree and yields the literals of every call site.
///
/// The sequence is lazy and restartable: each call to [`literals`] walks the
/// tree again. Files that cannot be read as UTF-8 are skipped.
///
/// [`literals`]: LiteralExtractor::literals
pub struct LiteralExtractor {
    scanner: SourceScanner,
    markers: Vec<String>,
    verbose: bool,
}

impl LiteralExtractor {
    pub fn new(scanner: SourceScanner, markers: Vec<String>, verbose: bool) -> Self {
        Self {
            scanner,
            markers,
            verbose,
        }
    }

    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    pub fn literals(&self) -> impl Iterator<Item = SourceLiteral> + '_ {
        self.scanner
            .files()
            .flat_map(move |path| self.extract_file(path))
    }

    fn extract_file(&self, path: PathBuf) -> Vec<SourceLiteral> {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if self.verbose {
                    eprintln!(
                        "{} Skipping unreadable file {}: {}",
                        "warning:".bold().yellow(),
                        path.display(),
                        e
                    );
                }
                return Vec::new();
            }
        };

        find_call_sites(&content, &self.markers, SourceKind::from_path(&path))
            .into_iter()
            .map(|site| SourceLiteral {
                text: site.text,
                file: path.clone(),
                line: site.line,
            })
            .collect()
    }
}
