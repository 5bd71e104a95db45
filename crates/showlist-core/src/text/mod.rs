//! # Title Normalization
//!
//! Cleans raw title fields before classification: best-effort repair of
//! UTF-8 text that was decoded as Latin-1, then whitespace collapsing.

pub mod repair;

pub use repair::{RepairError, repair_mojibake};

/// Normalizes a raw title.
///
/// Mojibake is repaired when possible (the original text is kept
/// otherwise), every whitespace run becomes a single space, and the ends
/// are trimmed. Never fails.
///
/// # Examples
/// ```
/// use showlist_core::text::normalize;
///
/// assert_eq!(normalize("  The\tWire:\n Season 1 "), "The Wire: Season 1");
/// assert_eq!(normalize("CafÃ©  Society"), "Café Society");
/// ```
pub fn normalize(raw: &str) -> String {
    match repair_mojibake(raw) {
        Ok(repaired) => collapse_whitespace(&repaired),
        Err(_) => collapse_whitespace(raw),
    }
}

/// Collapses whitespace runs to one space and trims both ends.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
