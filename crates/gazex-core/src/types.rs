//! Core record types for gazette notice extraction.

use serde::{Deserialize, Serialize};

/// One extracted gazette notice, ready for bulletin rendering.
///
/// Construction is all-or-nothing: only [`crate::assemble::get_notice`]
/// builds one, after every field detector has succeeded. A partially valid
/// `Notice` never exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// The Gen/GN/BN/Proc number printed in the gazette.
    pub notice_number: u32,
    /// The gazette issue this notice was published in.
    pub gazette_number: u32,
    pub publish_day: u8,
    pub publish_month_name: String,
    pub publish_year: u16,
    /// Page within the gazette; regulation lists often omit it.
    pub page_number: Option<u32>,
    /// `####-####`; scans of contents pages routinely corrupt this field.
    pub issn: Option<String>,
    pub major_type: MajorType,
    /// Department or enabling-Act label.
    pub minor_type: String,
    /// Human-readable notice text, usually LLM-summarized.
    pub description: String,
}

/// Coarse notice classification, inferred from the notice number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorType {
    Proclamation,
    BoardNotice,
    GeneralNotice,
    GovernmentNotice,
}

impl MajorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proclamation => "PROCLAMATION",
            Self::BoardNotice => "BOARD_NOTICE",
            Self::GeneralNotice => "GENERAL_NOTICE",
            Self::GovernmentNotice => "GOVERNMENT_NOTICE",
        }
    }

    /// Bulletin section heading this notice type is grouped under.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Proclamation | Self::GeneralNotice | Self::GovernmentNotice => {
                "PROCLAMATIONS AND NOTICES"
            }
            Self::BoardNotice => "BOARD NOTICES",
        }
    }

    /// Citation abbreviation, e.g. "GenN 3228 in GG 52724".
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Proclamation => "Proc",
            Self::BoardNotice => "BN",
            Self::GeneralNotice => "GenN",
            Self::GovernmentNotice => "GN",
        }
    }
}

/// A piece of legislation referenced by name, number and year.
///
/// Produced by the act decoder while deriving a notice's minor type and
/// consumed immediately; special-cased laws may carry only the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Act {
    pub name: String,
    pub number: Option<u32>,
    pub year: Option<u16>,
}

impl Act {
    /// Minor-type label for this act, e.g. "Currency and Exchanges ACT 9 of 1933".
    ///
    /// Department-only acts (no number/year) cite as the bare name.
    pub fn citation(&self) -> String {
        match (self.number, self.year) {
            (Some(number), Some(year)) => format!("{} ACT {} of {}", self.name, number, year),
            _ => self.name.clone(),
        }
    }
}

/// One parsed row of a long-list gazette table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// The reconstructed source row, whitespace-normalized.
    pub logical_line: String,
    pub notice_number: u32,
    pub law_name: String,
    pub law_number: Option<u32>,
    pub law_year: Option<u16>,
    /// Gazette number embedded in the row's trailing columns.
    pub gazette_number: u32,
    pub page_number: u32,
    /// Row text after the act reference.
    pub notice_description: String,
}
