use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use anyhow::Result;

use super::super::{args::ExtractCommand, context::CommandContext, exit_status::ExitStatus, report};
use crate::core::{
    NeedsTranslation, SourceLiteral, filter::AcceptAll, missing::relative_display,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(cmd.common.verbose)?;
    let source_root = ctx.source_root(cmd.source_root.as_deref())?;
    let script_filter = ctx.filter()?;
    let filter: &dyn NeedsTranslation = if cmd.all {
        &AcceptAll
    } else {
        &script_filter
    };

    let extractor = ctx.extractor(source_root);
    let literals = extractor
        .literals()
        .filter(|literal| filter.needs_translation(&literal.text));

    if cmd.by_file {
        let groups = group_by_file(literals, extractor.root());
        report::print_literals_by_file(&groups);
    } else {
        let counts = count_occurrences(literals);
        report::print_literal_counts(&counts);
    }

    Ok(ExitStatus::Success)
}

/// Unique texts in sorted order with the number of call sites of each.
fn count_occurrences(literals: impl Iterator<Item = SourceLiteral>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for literal in literals {
        *counts.entry(literal.text).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Texts per file in scan order, first occurrence only within each file.
fn group_by_file(
    literals: impl Iterator<Item = SourceLiteral>,
    root: &Path,
) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for literal in literals {
        let file = relative_display(&literal.file, root);
        if groups.last().is_none_or(|(last, _)| *last != file) {
            groups.push((file, Vec::new()));
            seen.clear();
        }
        if seen.insert(literal.text.clone())
            && let Some((_, texts)) = groups.last_mut()
        {
            texts.push(literal.text);
        }
    }
    groups
}
