//! Curated source → target translation table.
//!
//! The table is a UTF-8 text file with one `source<TAB>target` pair per line.
//! Blank lines and lines starting with `#` are ignored. Literal `\n` and `\t`
//! sequences become real line breaks and tabs, other backslash escapes are
//! decoded when possible.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};

use crate::core::{error::SyncError, extract::escape::decode_escapes};

/// Lookup table built from the mapping file.
///
/// Duplicate keys are resolved first-wins. Every key whose surrounding
/// whitespace can be trimmed is also registered under its trimmed form, as a
/// fallback consulted only when the exact key is absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<String, String>,
    trimmed: HashMap<String, String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair unless the key is already present.
    pub fn insert(&mut self, source: String, target: String) {
        let stripped = source.trim();
        if !stripped.is_empty() && stripped != source {
            self.trimmed
                .entry(stripped.to_string())
                .or_insert_with(|| target.clone());
        }
        self.entries.entry(source).or_insert(target);
    }

    pub fn lookup(&self, source: &str) -> Option<&str> {
        self.entries
            .get(source)
            .or_else(|| self.trimmed.get(source))
            .map(String::as_str)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.lookup(source).is_some()
    }

    /// Number of distinct source keys (trimmed fallbacks excluded).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a mapping file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::MissingFile {
                what: "Mapping file",
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Parse mapping content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut table = Self::new();

        for (index, raw_line) in content.lines().enumerate() {
            if raw_line.trim().is_empty() || raw_line.trim_start().starts_with('#') {
                continue;
            }

            let Some((source_raw, target_raw)) = raw_line.split_once('\t') else {
                return Err(SyncError::MalformedMappingLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                    content: raw_line.to_string(),
                }
                .into());
            };

            let source_raw = source_raw
                .trim_start_matches(['\u{FEFF}', ' '])
                .trim_end_matches(['\r', '\n']);
            let target_raw = target_raw.trim_start().trim_end_matches(['\r', '\n']);

            table.insert(decode_cell(source_raw), decode_cell(target_raw));
        }

        Ok(table)
    }
}

fn decode_cell(raw: &str) -> String {
    let expanded = raw.replace("\\n", "\n").replace("\\t", "\t");
    if expanded.contains('\\') {
        decode_escapes(&expanded).unwrap_or(expanded)
    } else {
        expanded
    }
}
