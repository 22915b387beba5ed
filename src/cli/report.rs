//! Report formatting and printing utilities.
//!
//! Every printer has a `_to` variant taking a writer, used by tests.
//! Separate from core logic to allow tssync to be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::core::{MissingReport, SyncOutcome};
use crate::utils::{display_width, pad_to_width};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the result of a catalog sync to stdout.
pub fn print_sync_outcome(catalog: &Path, outcome: &SyncOutcome, mapping_len: usize, verbose: bool) {
    print_sync_outcome_to(catalog, outcome, mapping_len, verbose, &mut io::stdout().lock());
}

/// Print the result of a catalog sync to a custom writer.
///
/// The status line is followed by the source texts that are still unmapped.
pub fn print_sync_outcome_to<W: Write>(
    catalog: &Path,
    outcome: &SyncOutcome,
    mapping_len: usize,
    verbose: bool,
    writer: &mut W,
) {
    let status = if outcome.changed {
        "updated"
    } else {
        "up to date"
    };
    let _ = writeln!(
        writer,
        "{} {} is {}; {} mapped strings.",
        SUCCESS_MARK.green(),
        catalog.display(),
        status,
        mapping_len
    );

    if verbose {
        let _ = writeln!(
            writer,
            "  {} from mapping, {} hand-written, {} skipped",
            outcome.mapped, outcome.manual, outcome.skipped
        );
    }

    if outcome.unmapped.is_empty() {
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} source strings missing from mapping:",
        "warning:".bold().yellow(),
        outcome.unmapped.len()
    );
    for text in &outcome.unmapped {
        let _ = writeln!(writer, "  {}", text);
    }
}

/// Print missing translations grouped by text to stdout.
pub fn print_missing(report: &MissingReport) {
    print_missing_to(report, &mut io::stdout().lock());
}

/// Print missing translations to a custom writer.
pub fn print_missing_to<W: Write>(report: &MissingReport, writer: &mut W) {
    if report.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No missing translations found.".green()
        );
        return;
    }

    for (text, files) in report.groups() {
        let _ = writeln!(writer, "{}", text);
        for file in files {
            let _ = writeln!(writer, "  {} {}", "-".blue(), file);
        }
        let _ = writeln!(writer);
    }
}

/// Print unique literals with their occurrence counts to stdout.
pub fn print_literal_counts(counts: &[(String, usize)]) {
    print_literal_counts_to(counts, &mut io::stdout().lock());
}

/// Print unique literals to a custom writer, counts aligned in one column.
pub fn print_literal_counts_to<W: Write>(counts: &[(String, usize)], writer: &mut W) {
    if counts.is_empty() {
        let _ = writeln!(writer, "No strings found.");
        return;
    }

    let width = counts
        .iter()
        .map(|(text, _)| display_width(text))
        .max()
        .unwrap_or(0);

    for (text, count) in counts {
        let _ = writeln!(
            writer,
            "{}  {}",
            pad_to_width(text, width),
            count.to_string().dimmed()
        );
    }
}

/// Print literals grouped by file to stdout.
pub fn print_literals_by_file(groups: &[(String, Vec<String>)]) {
    print_literals_by_file_to(groups, &mut io::stdout().lock());
}

/// Print literals grouped by file to a custom writer.
pub fn print_literals_by_file_to<W: Write>(groups: &[(String, Vec<String>)], writer: &mut W) {
    if groups.is_empty() {
        let _ = writeln!(writer, "No strings found.");
        return;
    }

    for (file, texts) in groups {
        let _ = writeln!(writer, "{}", format!("[{}]", file).bold());
        for text in texts {
            let _ = writeln!(writer, "{}", text);
        }
        let _ = writeln!(writer);
    }
}
