//! Reconcile a Qt Linguist catalog (`.ts`) with the mapping table.
//!
//! Every `<message>` is looked up by its `<source>` text:
//!
//! - **hit**: the translation becomes the mapped text and `type="unfinished"`
//!   is cleared;
//! - **miss, translated by hand**: the existing text is kept and the entry is
//!   marked finished;
//! - **miss, empty**: the entry is marked `type="unfinished"` and reported.
//!
//! The file is rewritten only when an entry actually changed, so a no-op run
//! leaves the file (and its timestamp) untouched.

pub mod document;

use std::{
    collections::BTreeSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use tempfile::NamedTempFile;

use crate::core::{error::SyncError, mapping::MappingTable};
use document::{Document, Element};

/// Status carried by the `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationStatus {
    fn of(translation: &Element) -> Self {
        match translation.attr("type") {
            Some("unfinished") => TranslationStatus::Unfinished,
            Some("vanished") => TranslationStatus::Vanished,
            Some("obsolete") => TranslationStatus::Obsolete,
            _ => TranslationStatus::Finished,
        }
    }
}

/// One message of the catalog as seen by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub source: String,
    pub translation: Option<String>,
    pub status: TranslationStatus,
}

impl CatalogEntry {
    pub fn is_unfinished(&self) -> bool {
        self.status == TranslationStatus::Unfinished
    }
}

/// What happened to a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryOutcome {
    Mapped { changed: bool },
    Manual { changed: bool },
    Unmapped { changed: bool },
    Untouched,
}

/// Result of a synchronization pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The catalog was rewritten.
    pub changed: bool,
    /// Source texts still without a translation, deduplicated.
    pub unmapped: BTreeSet<String>,
    /// Messages whose translation came from the mapping.
    pub mapped: usize,
    /// Messages kept because they carry a hand-written translation.
    pub manual: usize,
    /// Messages skipped because they have no `<source>`.
    pub skipped: usize,
}

/// A parsed catalog file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
    document: Document,
}

impl Catalog {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::MissingFile {
                what: "Translation file",
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let document = Document::parse(&content).map_err(|e| SyncError::MalformedCatalog {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Snapshot of every message that has a `<source>`, in document order.
    pub fn entries(&mut self) -> Vec<CatalogEntry> {
        let mut entries = Vec::new();
        self.document.root.for_each_named_mut("message", &mut |message: &mut Element| {
            let Some(source) = message.child("source") else {
                return;
            };
            let translation = message.child("translation");
            entries.push(CatalogEntry {
                source: source.text.clone().unwrap_or_default(),
                translation: translation.and_then(|t| t.text.clone()),
                status: translation
                    .map(TranslationStatus::of)
                    .unwrap_or(TranslationStatus::Unfinished),
            });
        });
        entries
    }

    /// Apply the mapping to every message in memory.
    pub fn apply(&mut self, mapping: &MappingTable, verbose: bool) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        let mut changed = false;

        self.document.root.for_each_named_mut("message", &mut |message: &mut Element| {
            let Some(source) = message.child("source") else {
                outcome.skipped += 1;
                if verbose {
                    eprintln!(
                        "{} Skipping <message> without <source>",
                        "warning:".bold().yellow()
                    );
                }
                return;
            };
            let source_text = source.text.clone().unwrap_or_default();

            match reconcile_message(message, &source_text, mapping) {
                EntryOutcome::Mapped { changed: c } => {
                    outcome.mapped += 1;
                    changed |= c;
                }
                EntryOutcome::Manual { changed: c } => {
                    outcome.manual += 1;
                    changed |= c;
                }
                EntryOutcome::Unmapped { changed: c } => {
                    outcome.unmapped.insert(source_text);
                    changed |= c;
                }
                EntryOutcome::Untouched => {}
            }
        });

        outcome.changed = changed;
        outcome
    }

    /// Re-indent and write the catalog back to its file atomically.
    pub fn save(&mut self) -> Result<()> {
        self.document.root.indent(0);
        let content = self.document.to_xml()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(file.path(), metadata.permissions())?;
        }
        file.persist(&self.path)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        Ok(())
    }
}

/// Update one `<message>` from the mapping.
fn reconcile_message(message: &mut Element, source: &str, mapping: &MappingTable) -> EntryOutcome {
    if message.attr("numerus") == Some("yes") {
        return EntryOutcome::Untouched;
    }

    let translation = message.child_or_insert("translation");
    let status = TranslationStatus::of(translation);
    let current = translation.text.as_deref().unwrap_or("");

    if let Some(target) = mapping.lookup(source) {
        let changed = status == TranslationStatus::Unfinished || current != target;
        if changed {
            translation.text = Some(target.to_string());
            if status == TranslationStatus::Unfinished {
                translation.remove_attr("type");
            }
        }
        return EntryOutcome::Mapped { changed };
    }

    if !current.trim().is_empty() {
        let changed = status == TranslationStatus::Unfinished;
        if changed {
            translation.remove_attr("type");
        }
        EntryOutcome::Manual { changed }
    } else {
        let changed = status != TranslationStatus::Unfinished;
        if changed {
            translation.set_attr("type", "unfinished");
        }
        EntryOutcome::Unmapped { changed }
    }
}

/// Open the catalog, apply the mapping and rewrite the file if anything changed.
pub fn sync_catalog(path: &Path, mapping: &MappingTable, verbose: bool) -> Result<SyncOutcome> {
    let mut catalog = Catalog::open(path)?;
    let outcome = catalog.apply(mapping, verbose);
    if outcome.changed {
        catalog.save()?;
    }
    Ok(outcome)
}
