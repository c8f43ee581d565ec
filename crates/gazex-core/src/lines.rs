//! Logical-line reconstruction for long-list gazettes.
//!
//! The gazette's table of contents lists notices as rows that wrap across
//! one to three raw text lines. Joining must reconstruct each row as one
//! string without merging two genuinely separate entries, while absorbing
//! "continuation" lines that are themselves year-stamped sub-rows (a 4-digit
//! year, a run of dot leaders and two trailing numbers) into the previous
//! entry rather than starting a new one.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::act;
use crate::types::ParsedEntry;

/// A line opening a new logical entry.
static ENTRY_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{3,4})\s+").unwrap());

/// Row terminator: dot leaders, then gazette number and page number.
static DOTTED_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}\s+\d+\s+\d+\s*$").unwrap());

/// Degenerate terminator: two trailing integers without dot leaders.
static NUMERIC_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\d+\s+\d+\s*$").unwrap());

static LONG_DOT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{10,}").unwrap());

static LONG_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]{10,}").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Full row grammar: notice number, content, dot leaders, gazette number,
/// page number.
static ENTRY_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3,4})\s+(.+?)\.{3,}\s+(\d+)\s+(\d+)\s*$").unwrap());

/// Reconstruct the logical entry rows of `text`.
///
/// A line with no dot leaders and no trailing two-integer pattern is always
/// treated as a continuation of the current entry, never discarded as noise.
pub fn join_logical_lines(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut joined = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if !ENTRY_START.is_match(line) {
            i += 1;
            continue;
        }

        let mut parts = vec![line];
        let mut j = i + 1;
        let terminated = DOTTED_END.is_match(line) || NUMERIC_END.is_match(line);

        while j < lines.len() && !terminated {
            let next = lines[j];

            if let Some(start) = ENTRY_START.captures(next) {
                let token = start.get(1).map(|m| m.as_str()).unwrap_or_default();
                let after = &next[start.get(0).map(|m| m.end()).unwrap_or(0)..];
                let year_continuation = token.len() == 4
                    && LONG_DOT_RUN.is_match(after)
                    && DOTTED_END.is_match(next)
                    && !LONG_WORD.is_match(after);
                if year_continuation {
                    parts.push(next);
                    j += 1;
                }
                // Either absorbed a disguised continuation or hit the next
                // entry's start; this entry ends here.
                break;
            }

            parts.push(next);
            if DOTTED_END.is_match(next) {
                j += 1;
                break;
            }
            j += 1;
        }

        let row = WHITESPACE_RUN
            .replace_all(&parts.join(" "), " ")
            .trim()
            .to_string();
        if !row.is_empty() {
            joined.push(row);
        }

        i = j.max(i + 1);
    }

    joined
}

/// Parse one logical row into a [`ParsedEntry`].
///
/// Rows whose content segment carries no recognizable act reference are
/// skipped, matching how bilingual filler rows behave in real gazettes.
pub fn parse_entry(logical_line: &str) -> Option<ParsedEntry> {
    let caps = ENTRY_ROW.captures(logical_line)?;
    let notice_number = caps[1].parse().ok()?;
    let content = caps[2].trim();
    let gazette_number = caps[3].parse().ok()?;
    let page_number = caps[4].parse().ok()?;

    let Some(found) = act::decode_act_phrase(content) else {
        debug!(logical_line, "row without act details, skipping");
        return None;
    };
    let notice_description = act::description_after(content, found.end);

    Some(ParsedEntry {
        logical_line: logical_line.to_string(),
        notice_number,
        law_name: found.act.name,
        law_number: found.act.number,
        law_year: found.act.year,
        gazette_number,
        page_number,
        notice_description,
    })
}

/// Parse a complete long-list gazette into its entry rows.
pub fn parse_document(text: &str) -> Vec<ParsedEntry> {
    join_logical_lines(text)
        .iter()
        .filter_map(|line| parse_entry(line))
        .collect()
}
