//! Literals that need translation but have no mapping entry.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use crate::core::{extract::SourceLiteral, filter::NeedsTranslation, mapping::MappingTable};

/// Missing texts grouped with the files they occur in.
///
/// Both texts and file paths iterate in sorted order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MissingReport {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.groups.iter().map(|(text, files)| (text.as_str(), files))
    }

    pub fn files_for(&self, text: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(text)
    }
}

/// Collect literals that pass `filter` and have no entry in `mapping`.
///
/// File paths are recorded relative to `root` with `/` separators, falling
/// back to the full path for files outside of it.
pub fn find_missing<I>(
    literals: I,
    filter: &dyn NeedsTranslation,
    mapping: &MappingTable,
    root: &Path,
) -> MissingReport
where
    I: IntoIterator<Item = SourceLiteral>,
{
    let mut report = MissingReport::default();
    for literal in literals {
        if !filter.needs_translation(&literal.text) || mapping.contains(&literal.text) {
            continue;
        }
        report
            .groups
            .entry(literal.text)
            .or_default()
            .insert(relative_display(&literal.file, root));
    }
    report
}

pub fn relative_display(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}
