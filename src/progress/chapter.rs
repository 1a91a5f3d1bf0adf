//! Chapter label normalization
//!
//! Raw chapter labels in the progress tree are typed by hand and come in many
//! shapes ("Chapter 3", "ch03", "Chapter 12 Review"). They are bucketed by the
//! first run of one or two ASCII digits.
//!
//! # Examples
//!
//! ```
//! use chapter_tally::progress::chapter::{normalize_chapter_key, ChapterKey};
//!
//! assert_eq!(normalize_chapter_key("Chapter 12 Review"), Some(ChapterKey(12)));
//! assert_eq!(normalize_chapter_key("ch03").map(|k| k.to_string()), Some("chapter3".into()));
//! assert_eq!(normalize_chapter_key("Intro"), None);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// First run of 1-2 decimal digits. `\d` would also match non-ASCII digits.
static CHAPTER_DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})").expect("Valid regex pattern"));

/// Lowest chapter number present in the report schema
pub const FIRST_REPORTED_CHAPTER: u32 = 1;

/// Highest chapter number present in the report schema
pub const LAST_REPORTED_CHAPTER: u32 = 12;

/// Canonical chapter key, displayed as `chapter<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterKey(pub u32);

impl ChapterKey {
    pub fn number(self) -> u32 {
        self.0
    }

    /// Whether this chapter has a column in the CSV report
    pub fn is_reported(self) -> bool {
        (FIRST_REPORTED_CHAPTER..=LAST_REPORTED_CHAPTER).contains(&self.0)
    }

    /// Chapter keys with a report column, in column order
    pub fn reported() -> impl Iterator<Item = ChapterKey> {
        (FIRST_REPORTED_CHAPTER..=LAST_REPORTED_CHAPTER).map(ChapterKey)
    }
}

impl fmt::Display for ChapterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chapter{}", self.0)
    }
}

/// Pure: Normalize a raw chapter label to its canonical key
///
/// Returns `None` when the label holds no digits. No upper bound is applied
/// here; a label like "Chapter 40" yields `chapter40`, and `"chapter123"`
/// yields `chapter12` because only the first two digits of a run are taken.
pub fn normalize_chapter_key(raw: &str) -> Option<ChapterKey> {
    let captures = CHAPTER_DIGITS_REGEX.captures(raw)?;
    captures.get(1)?.as_str().parse::<u32>().ok().map(ChapterKey)
}
