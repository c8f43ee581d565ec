//! "R."-prefixed regulation list parsing.
//!
//! Some gazettes list regulations as rows keyed "R. NNN" rather than the
//! bare-number table-of-contents form. Rows share the act cascade with the
//! long-list path, but the trailing gazette/page columns are frequently
//! absent, so both stay optional here.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::act;
use crate::types::Act;

/// One parsed regulation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegulationEntry {
    pub notice_number: u32,
    pub law_name: String,
    pub law_number: Option<u32>,
    pub law_year: Option<u16>,
    pub gazette_number: Option<u32>,
    pub page_number: Option<u32>,
    pub notice_description: String,
}

static REGULATION_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\.\s*(\d{3})\s+(.+)$").unwrap());

/// Dot-leader tail carrying gazette and page numbers, when present.
static TRAILING_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}\s+(\d+)\s+(\d+)\s*$").unwrap());

/// Parse every regulation row in `text`. Rows whose content yields no act
/// reference are skipped.
pub fn parse_regulations(text: &str) -> Vec<RegulationEntry> {
    text.lines()
        .filter_map(|line| parse_regulation(line.trim()))
        .collect()
}

fn parse_regulation(line: &str) -> Option<RegulationEntry> {
    let caps = REGULATION_ROW.captures(line)?;
    let notice_number = caps[1].parse().ok()?;
    let rest = caps.get(2)?.as_str();

    let (content, gazette_number, page_number) = match TRAILING_REFERENCE.captures(rest) {
        Some(tail) => {
            let content = rest[..tail.get(0)?.start()].trim_end();
            (content, tail[1].parse().ok(), tail[2].parse().ok())
        }
        None => (rest, None, None),
    };

    let Some(found) = act::decode_act_phrase(content) else {
        debug!(line, "regulation row without act reference, skipping");
        return None;
    };
    let notice_description = act::description_after(content, found.end);

    Some(RegulationEntry {
        notice_number,
        law_name: found.act.name,
        law_number: found.act.number,
        law_year: found.act.year,
        gazette_number,
        page_number,
        notice_description,
    })
}

/// Enabling act for one regulation number, if its row parses.
pub fn act_for_notice(text: &str, notice_number: u32) -> Option<Act> {
    parse_regulations(text)
        .into_iter()
        .find(|entry| entry.notice_number == notice_number)
        .map(|entry| Act {
            name: entry.law_name,
            number: entry.law_number,
            year: entry.law_year,
        })
}
