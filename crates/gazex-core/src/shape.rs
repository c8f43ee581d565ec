//! Document shape classification.
//!
//! A gazette's text layer comes in one of three shapes, each needing its own
//! extraction path: a single-notice document, a long tabular listing of
//! notices, or an "R."-prefixed regulation list. Classification is a
//! heuristic over line starts; false positives on adversarial OCR output
//! are tolerated downstream, not treated as fatal.

use std::sync::LazyLock;

use regex::Regex;

/// Extraction strategy selected for a gazette document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// One notice spanning the whole document.
    Single,
    /// Table-of-contents style listing of many notices.
    LongList,
    /// Regulation list with "R. NNN" row keys.
    RList,
}

/// A trimmed line opening a listing row: a bare 3-4 digit number followed by
/// a word boundary, so longer numbers and digit-letter runs don't count.
static LIST_ROW_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}\b").unwrap());

static REGULATION_ROW_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^R\. \d{3} ").unwrap());

/// Decide which extraction path applies to `text`.
///
/// LongList wins at three or more listing rows anywhere in the document
/// (OCR noise breaks consecutive runs unpredictably, so matches are counted
/// loosely). RList is only considered when LongList does not apply. Single
/// is the explicit default, not a fallthrough.
pub fn classify(text: &str) -> DocumentShape {
    let list_rows = text
        .lines()
        .filter(|line| LIST_ROW_START.is_match(line.trim()))
        .count();
    if list_rows >= 3 {
        return DocumentShape::LongList;
    }

    let regulation_rows = text
        .lines()
        .filter(|line| REGULATION_ROW_START.is_match(line.trim()))
        .count();
    if regulation_rows > 1 {
        return DocumentShape::RList;
    }

    DocumentShape::Single
}
