//! Decides whether an extracted literal still needs translation.
//!
//! The default policy treats any text containing a CJK Unified Ideograph
//! (U+4E00..=U+9FFF) as untranslated source-language text. This is only a
//! heuristic for "still written in the source language": the ranges can be
//! replaced through configuration, and any other policy can be plugged in by
//! implementing [`NeedsTranslation`].

use std::{fmt, ops::RangeInclusive, str::FromStr};

use anyhow::{Context, Result, bail};
use regex::Regex;

/// CJK Unified Ideographs.
pub const CJK_UNIFIED_IDEOGRAPHS: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

pub trait NeedsTranslation {
    fn needs_translation(&self, text: &str) -> bool;
}

impl<F> NeedsTranslation for F
where
    F: Fn(&str) -> bool,
{
    fn needs_translation(&self, text: &str) -> bool {
        self(text)
    }
}

/// An inclusive range of code points, written `U+4E00-U+9FFF` in config files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRange(pub RangeInclusive<char>);

impl FromStr for ScriptRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .with_context(|| format!("Expected a range like \"U+4E00-U+9FFF\", got \"{}\"", s))?;
        let start = parse_code_point(start)?;
        let end = parse_code_point(end)?;
        if start > end {
            bail!("Range start is greater than its end: \"{}\"", s);
        }
        Ok(ScriptRange(start..=end))
    }
}

impl fmt::Display for ScriptRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "U+{:04X}-U+{:04X}",
            *self.0.start() as u32,
            *self.0.end() as u32
        )
    }
}

fn parse_code_point(s: &str) -> Result<char> {
    let s = s.trim();
    let hex = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    let value = u32::from_str_radix(hex, 16)
        .with_context(|| format!("Invalid code point: \"{}\"", s))?;
    char::from_u32(value).with_context(|| format!("Not a Unicode scalar value: \"{}\"", s))
}

/// Default filter: text needs translation when it contains a character in
/// one of the source-script ranges and matches none of the ignore patterns.
#[derive(Debug, Clone)]
pub struct ScriptFilter {
    ranges: Vec<RangeInclusive<char>>,
    ignore_texts: Vec<Regex>,
}

impl Default for ScriptFilter {
    fn default() -> Self {
        Self::new(vec![CJK_UNIFIED_IDEOGRAPHS])
    }
}

impl ScriptFilter {
    pub fn new(ranges: Vec<RangeInclusive<char>>) -> Self {
        Self {
            ranges,
            ignore_texts: Vec::new(),
        }
    }

    pub fn with_ignore_texts(mut self, patterns: Vec<Regex>) -> Self {
        self.ignore_texts = patterns;
        self
    }

    fn in_source_script(&self, text: &str) -> bool {
        text.chars()
            .any(|c| self.ranges.iter().any(|range| range.contains(&c)))
    }
}

impl NeedsTranslation for ScriptFilter {
    fn needs_translation(&self, text: &str) -> bool {
        self.in_source_script(text) && !self.ignore_texts.iter().any(|re| re.is_match(text))
    }
}

/// Pass-through filter used when every literal should be listed.
pub struct AcceptAll;

impl NeedsTranslation for AcceptAll {
    fn needs_translation(&self, _text: &str) -> bool {
        true
    }
}
