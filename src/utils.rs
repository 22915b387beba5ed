//! Common utility functions shared across the codebase.

use unicode_width::UnicodeWidthStr;

/// Terminal column width of `text`. CJK characters occupy two columns.
///
/// # Examples
///
/// ```
/// use tssync::utils::display_width;
///
/// assert_eq!(display_width("Save"), 4);
/// assert_eq!(display_width("保存"), 4);
/// assert_eq!(display_width(""), 0);
/// ```
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Pad `text` with trailing spaces up to `width` display columns.
///
/// Text that is already wider is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(padding))
}
