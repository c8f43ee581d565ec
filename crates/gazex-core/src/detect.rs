//! Field detectors.
//!
//! Each detector is a pure function from text to one field value, with its
//! own regex contract. A detector that finds no match (or an out-of-range
//! value) fails with a [`ExtractError::Detection`] naming itself — never a
//! silent default. Detectors are independent and order-insensitive; the
//! assembler calls each once per document.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;
use crate::types::MajorType;

/// Masthead date anchor: "Vol: 719 23 2025" → volume, day, year.
static VOL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Vol[.:]\s*\d+\s+(\d{1,2})\s+(\d{4})").unwrap());

static ISSN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ISSN\s+(\d{4}-\d{4})").unwrap());

static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\b",
    )
    .unwrap()
});

/// Page number after the gazette number, "No. 52724 3" style.
static PAGE_AFTER_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"No[.,:]\s*\d{5}\s*(\d+)").unwrap());

/// Fallback: OCR renders the layout rule before the page number as "_".
static PAGE_AFTER_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\s*\d{5}\s*(\d+)").unwrap());

/// Day of month from the masthead date anchor, validated to [1, 31].
pub fn detect_day(text: &str) -> Result<u8, ExtractError> {
    let caps = VOL_DATE
        .captures(text)
        .ok_or_else(|| ExtractError::detection("publish_day", text))?;
    let day: u8 = caps[1]
        .parse()
        .map_err(|_| ExtractError::detection("publish_day", text))?;
    if !(1..=31).contains(&day) {
        return Err(ExtractError::detection("publish_day", text));
    }
    Ok(day)
}

/// Publication year from the masthead date anchor, validated to [1900, 2100].
pub fn detect_year(text: &str) -> Result<u16, ExtractError> {
    let caps = VOL_DATE
        .captures(text)
        .ok_or_else(|| ExtractError::detection("publish_year", text))?;
    let year: u16 = caps[2]
        .parse()
        .map_err(|_| ExtractError::detection("publish_year", text))?;
    if !(1900..=2100).contains(&year) {
        return Err(ExtractError::detection("publish_year", text));
    }
    Ok(year)
}

pub fn detect_issn(text: &str) -> Result<String, ExtractError> {
    ISSN.captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ExtractError::detection("issn", text))
}

/// First English month name in the text, first letter capitalized.
pub fn detect_month_name(text: &str) -> Result<String, ExtractError> {
    let caps = MONTH_NAME
        .captures(text)
        .ok_or_else(|| ExtractError::detection("publish_month_name", text))?;
    let raw = caps[1].to_lowercase();
    let mut chars = raw.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => raw,
    };
    Ok(capitalized)
}

/// Gazette page number, tried after "No." then after an underscore rule.
pub fn detect_page_number(text: &str) -> Result<u32, ExtractError> {
    let caps = PAGE_AFTER_NO
        .captures(text)
        .or_else(|| PAGE_AFTER_RULE.captures(text))
        .ok_or_else(|| ExtractError::detection("page_number", text))?;
    let page: u32 = caps[1]
        .parse()
        .map_err(|_| ExtractError::detection("page_number", text))?;
    if page == 0 {
        return Err(ExtractError::detection("page_number", text));
    }
    Ok(page)
}

/// Classify a notice number into its major type by numeric range.
///
/// Gazette numbering reserves disjoint bands per notice class; numbers
/// outside every band fail with [`ExtractError::UnknownMajorType`].
pub fn detect_major_type(notice_number: u32) -> Result<MajorType, ExtractError> {
    match notice_number {
        200..=299 => Ok(MajorType::Proclamation),
        700..=899 => Ok(MajorType::BoardNotice),
        3000..=3999 => Ok(MajorType::GeneralNotice),
        6000..=6999 => Ok(MajorType::GovernmentNotice),
        other => Err(ExtractError::UnknownMajorType(other)),
    }
}
