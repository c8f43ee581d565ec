//! Act/law reference decoding.
//!
//! Gazette rows cite enabling legislation in wildly heterogeneous phrasings:
//! English and Afrikaans, with and without parentheses, "No." qualified or
//! bare, year before or after the number, and an all-caps legacy form. The
//! decoder is a strictly ordered cascade of (pattern, extractor) pairs tried
//! until one matches. Order matters: specific patterns (e.g. the Magistrates'
//! Courts literal) must win over generic ones that would mis-segment the act
//! name. Trying the next pattern on a non-match is normal control flow, not
//! an error; only an exhausted cascade with no applicable special case fails.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{ExtractError, snippet};
use crate::rlist;
use crate::shape::{DocumentShape, classify};
use crate::types::Act;

/// A successful cascade match: the act plus where its phrase ends in the
/// searched text, so the trailing notice description can be recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActMatch {
    pub act: Act,
    /// Byte offset one past the matched act phrase.
    pub end: usize,
}

type Extractor = fn(&Captures) -> Act;

fn name_number_year(caps: &Captures) -> Act {
    Act {
        name: caps[1].trim().to_string(),
        number: caps[2].parse().ok(),
        year: caps[3].parse().ok(),
    }
}

fn name_year_number(caps: &Captures) -> Act {
    Act {
        name: caps[1].trim().to_string(),
        number: caps[3].parse().ok(),
        year: caps[2].parse().ok(),
    }
}

/// Afrikaans "Wet op ..." keeps the prefix in the act name.
fn wet_prefixed(caps: &Captures) -> Act {
    Act {
        name: format!("Wet {}", caps[1].trim()),
        number: caps[2].parse().ok(),
        year: caps[3].parse().ok(),
    }
}

/// The cascade, in trial order. Each pattern is more permissive than the
/// last; reordering entries changes which phrasing wins on ambiguous rows.
static CASCADE: LazyLock<Vec<(Regex, Extractor)>> = LazyLock::new(|| {
    vec![
        // Magistrates' Courts literal, straight or curly apostrophe.
        (
            Regex::new(r"(?i)(Magistrates['’]\s?Courts)\s+Act\s*\((\d+)/(\d{4})\)").unwrap(),
            name_number_year as Extractor,
        ),
        // English parenthetical: "Road Accident Fund Act (56/1996)".
        (
            Regex::new(r"(?i)(.+?)\s+Act\s*\((\d+)/(\d{4})\)").unwrap(),
            name_number_year,
        ),
        // Semicolon form: "Currency and Exchanges-Act; 1933 (Act No: 9 of 1933)".
        (
            Regex::new(r"(?i)(.+?)-Act;\s*\d{4}\s*\(Act\s+No:\s*(\d+)\s+of\s+(\d{4})\)").unwrap(),
            name_number_year,
        ),
        // "No."-qualified: "Skills Development Act, No. 97 of 1998".
        (
            Regex::new(r"(?i)(.+?)\s+Act,\s*No\.?\s*(\d+)\s+of\s+(\d{4})").unwrap(),
            name_number_year,
        ),
        // Simple numeric: "Something Act, 56 of 1996".
        (
            Regex::new(r"(?i)(.+?)\s+Act,\s*(\d+)\s+of\s+(\d{4})").unwrap(),
            name_number_year,
        ),
        // Year before number: "Something Act, 2002 (Act No. 71 of 2002)".
        (
            Regex::new(r"(?i)(.+?)\s+Act,\s*(\d{4})\s*\((?:Act\s+)?No\.?\s*(\d+)\s+of\s+\d{4}\)")
                .unwrap(),
            name_year_number,
        ),
        // "Act No." parenthetical: "Something Act (Act No.36 of 1947)".
        (
            Regex::new(r"(?i)(.+?)\s+Act\s*\((?:Act\s+)?No\.?\s*(\d+)\s+of\s+(\d{4})\)").unwrap(),
            name_number_year,
        ),
        // Afrikaans prefix: "Wet op Something (28/2011)".
        (
            Regex::new(r"(?i)\bWet\s+(.+?)\s*\((\d+)/(\d{4})\)").unwrap(),
            wet_prefixed,
        ),
        // Afrikaans "-wet" suffix, no parentheses: "Somethingwet, No. 56 van 1996".
        (
            Regex::new(r"(?i)(.+?wet),\s*No\.?\s*(\d+)\s+van\s+(\d{4})").unwrap(),
            name_number_year,
        ),
        // Afrikaans "-wet" suffix with parentheses: "Somethingwet (No. 56 van 1996)".
        (
            Regex::new(r"(?i)(.+?wet)\s*\((?:No\.?\s*)?(\d+)\s+van\s+(\d{4})\)").unwrap(),
            name_number_year,
        ),
        // All-caps legacy: "COMPETITION ACT, 1998 (ACT NO: 89 OF 1998)".
        (
            Regex::new(r"([A-Z][A-Z'’\s,&-]*?)\s+ACT,\s*(\d{4})\s*\(ACT\s+NO:\s*(\d+)\s+OF\s+\d{4}\)")
                .unwrap(),
            name_year_number,
        ),
    ]
});

static EXCHANGE_CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)exchange\s+control").unwrap());

/// Quoted parenthetical abbreviations like `("the LTA")`.
static QUOTED_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s*\(["'’].*?["'’]\)\s*"#).unwrap());

/// Try the cascade against `content`, returning the first match.
pub fn decode_act_phrase(content: &str) -> Option<ActMatch> {
    for (pattern, extract) in CASCADE.iter() {
        if let Some(caps) = pattern.captures(content) {
            let end = caps.get(0).map(|m| m.end()).unwrap_or(content.len());
            return Some(ActMatch {
                act: extract(&caps),
                end,
            });
        }
    }
    None
}

/// Decode the enabling act for a notice.
///
/// Runs the cascade over `text`; on a miss, applies the literal special
/// cases (exchange-control phrasing, the Mineral Resources department page),
/// then delegates to the regulation-list decoder when a secondary page has
/// that shape. Exhausting all of these is [`ExtractError::ActNotFound`].
pub fn decode_act(text: &str, pages: &[String], notice_number: u32) -> Result<Act, ExtractError> {
    if let Some(found) = decode_act_phrase(text) {
        return Ok(found.act);
    }

    // Exchange-control notices never spell out their enabling act.
    if EXCHANGE_CONTROL.is_match(text) {
        return Ok(Act {
            name: "Currency and Exchanges".into(),
            number: Some(9),
            year: Some(1933),
        });
    }

    for page in pages.iter().skip(1) {
        if page.contains("Mineral Resources and Energy") {
            return Ok(Act {
                name: "Department of Mineral Resources and Energy".into(),
                number: None,
                year: None,
            });
        }
    }

    for page in pages.iter().skip(1) {
        if classify(page) == DocumentShape::RList
            && let Some(act) = rlist::act_for_notice(page, notice_number)
        {
            return Ok(act);
        }
    }

    Err(ExtractError::ActNotFound {
        snippet: snippet(text),
    })
}

/// Notice description trailing a matched act phrase.
///
/// Quoted parenthetical abbreviations are stripped and leading colons
/// trimmed.
pub fn description_after(content: &str, end: usize) -> String {
    let rest = content[end..].trim();
    let cleaned = QUOTED_ABBREVIATION.replace_all(rest, " ");
    cleaned
        .trim()
        .trim_start_matches(':')
        .trim()
        .to_string()
}

/// Literal department phrases that resolve a minor type without an act.
const DEPARTMENT_PHRASES: &[(&str, &str)] = &[
    (
        "department of sports, arts and culture",
        "Department of Sports, Arts and Culture",
    ),
    ("national astro-tourism", "Department of Tourism"),
    ("department of transport", "Department of Transport"),
];

/// Department label for `text`, when a literal phrase matches.
pub fn department_phrase(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    DEPARTMENT_PHRASES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, label)| *label)
}

/// Derive the minor type: department phrase match first, act decoding after.
pub fn minor_type(text: &str, pages: &[String], notice_number: u32) -> Result<String, ExtractError> {
    if let Some(label) = department_phrase(text) {
        return Ok(label.to_string());
    }
    let act = decode_act(text, pages, notice_number)?;
    Ok(act.citation())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(content: &str) -> Act {
        decode_act_phrase(content)
            .unwrap_or_else(|| panic!("no act decoded from {content:?}"))
            .act
    }

    #[test]
    fn english_parenthetical() {
        let act = decode("Road Accident Fund Act (56/1996)");
        assert_eq!(act.name, "Road Accident Fund");
        assert_eq!(act.number, Some(56));
        assert_eq!(act.year, Some(1996));
    }

    #[test]
    fn semicolon_form() {
        let act = decode("Currency and Exchanges-Act; 1933 (Act No: 9 of 1933)");
        assert_eq!(act.name, "Currency and Exchanges");
        assert_eq!(act.number, Some(9));
        assert_eq!(act.year, Some(1933));
    }

    #[test]
    fn no_qualified_form() {
        let act = decode("Skills Development Act, No. 97 of 1998");
        assert_eq!(act.name, "Skills Development");
        assert_eq!(act.number, Some(97));
        assert_eq!(act.year, Some(1998));
    }

    #[test]
    fn simple_numeric_form() {
        let act = decode("National Water Act, 36 of 1998");
        assert_eq!(act.name, "National Water");
        assert_eq!(act.number, Some(36));
        assert_eq!(act.year, Some(1998));
    }

    #[test]
    fn year_before_number_form() {
        let act = decode("Disaster Management Act, 2002 (Act No. 57 of 2002)");
        assert_eq!(act.name, "Disaster Management");
        assert_eq!(act.number, Some(57));
        assert_eq!(act.year, Some(2002));
    }

    #[test]
    fn act_no_parenthetical_form() {
        let act = decode("Fertilizers Act (Act No.36 of 1947)");
        assert_eq!(act.name, "Fertilizers");
        assert_eq!(act.number, Some(36));
        assert_eq!(act.year, Some(1947));

        let act = decode("Fertilizers Act (No. 36 of 1947)");
        assert_eq!(act.number, Some(36));
    }

    #[test]
    fn afrikaans_wet_prefix_keeps_wet_in_name() {
        let act = decode("Wet op Onteiening (28/2011)");
        assert_eq!(act.name, "Wet op Onteiening");
        assert_eq!(act.number, Some(28));
        assert_eq!(act.year, Some(2011));
    }

    #[test]
    fn afrikaans_wet_suffix_forms() {
        let act = decode("Vaardigheidsontwikkelingswet, No. 97 van 1998");
        assert_eq!(act.name, "Vaardigheidsontwikkelingswet");
        assert_eq!(act.number, Some(97));
        assert_eq!(act.year, Some(1998));

        let act = decode("Vaardigheidsontwikkelingswet (No. 97 van 1998)");
        assert_eq!(act.number, Some(97));
        assert_eq!(act.year, Some(1998));
    }

    #[test]
    fn all_caps_legacy_form() {
        let act = decode("COMPETITION ACT, 1998 (ACT NO: 89 OF 1998)");
        assert_eq!(act.name, "COMPETITION");
        assert_eq!(act.number, Some(89));
        assert_eq!(act.year, Some(1998));
    }

    #[test]
    fn magistrates_courts_apostrophe_variants() {
        for content in [
            "Magistrates' Courts Act (32/1944)",
            "Magistrates’ Courts Act (32/1944)",
        ] {
            let act = decode(content);
            assert!(act.name.ends_with("Courts"), "name was {:?}", act.name);
            assert_eq!(act.number, Some(32));
            assert_eq!(act.year, Some(1944));
        }
    }

    #[test]
    fn decoding_is_idempotent() {
        let content = "Road Accident Fund Act (56/1996): Adjustment of the statutory limit";
        assert_eq!(decode_act_phrase(content), decode_act_phrase(content));
    }

    #[test]
    fn parenthetical_round_trip() {
        // Any letters/spaces/hyphens name survives the standard form.
        for name in ["Subdivision of Agricultural Land", "Astro-Tourism", "X"] {
            let content = format!("{name} Act (70/1970)");
            let act = decode(&content);
            assert_eq!(act.name, name);
            assert_eq!(act.number, Some(70));
            assert_eq!(act.year, Some(1970));
        }
    }

    #[test]
    fn description_follows_matched_phrase() {
        let content = "Road Accident Fund Act (56/1996): Adjustment of statutory limit";
        let found = decode_act_phrase(content).unwrap();
        assert_eq!(
            description_after(content, found.end),
            "Adjustment of statutory limit"
        );
    }

    #[test]
    fn description_strips_quoted_abbreviations() {
        let content = r#"Land Transport Act (5/2009) ("the LTA"): Publication of regulations"#;
        let found = decode_act_phrase(content).unwrap();
        assert_eq!(
            description_after(content, found.end),
            "Publication of regulations"
        );
    }

    #[test]
    fn exchange_control_special_case() {
        let text = "with limited authority for the purpose of Exchange Control Regulations";
        let act = decode_act(text, &[], 3197).unwrap();
        assert_eq!(act.name, "Currency and Exchanges");
        assert_eq!(act.number, Some(9));
        assert_eq!(act.year, Some(1933));
    }

    #[test]
    fn mineral_resources_department_page() {
        let pages = vec![
            "masthead page".to_string(),
            "Department of Mineral Resources and Energy notice".to_string(),
        ];
        let act = decode_act("nothing act-shaped here", &pages, 3400).unwrap();
        assert_eq!(act.name, "Department of Mineral Resources and Energy");
        assert_eq!(act.number, None);
        assert_eq!(act.year, None);
    }

    #[test]
    fn delegates_to_regulation_list_page() {
        let pages = vec![
            "masthead page".to_string(),
            "R. 701 Customs and Excise Act (91/1964): Amendment of Schedule No. 1\n\
             R. 702 Value-Added Tax Act (89/1991): Regulations on electronic services"
                .to_string(),
        ];
        let act = decode_act("nothing act-shaped here", &pages, 702).unwrap();
        assert_eq!(act.name, "Value-Added Tax");
        assert_eq!(act.number, Some(89));
        assert_eq!(act.year, Some(1991));
    }

    #[test]
    fn exhausted_cascade_fails() {
        let err = decode_act("Some random text without act information", &[], 3228).unwrap_err();
        assert!(matches!(err, ExtractError::ActNotFound { .. }));
    }

    #[test]
    fn minor_type_prefers_department_phrase() {
        let text = "Notice by the Department of Sports, Arts and Culture about heritage";
        assert_eq!(
            minor_type(text, &[], 3228).unwrap(),
            "Department of Sports, Arts and Culture"
        );
    }

    #[test]
    fn minor_type_astro_tourism_maps_to_tourism() {
        let text = "National Astro-Tourism strategy published for implementation";
        assert_eq!(minor_type(text, &[], 3250).unwrap(), "Department of Tourism");
    }

    #[test]
    fn minor_type_falls_back_to_act_citation() {
        let text = "Road Accident Fund Act (56/1996): Adjustment of statutory limit";
        assert_eq!(
            minor_type(text, &[], 3300).unwrap(),
            "Road Accident Fund ACT 56 of 1996"
        );
    }

    #[test]
    fn minor_type_exchange_control_citation() {
        let text = "appointment of authorised dealers with limited authority for the \
                    purpose of Exchange Control Regulations";
        assert_eq!(
            minor_type(text, &[], 3197).unwrap(),
            "Currency and Exchanges ACT 9 of 1933"
        );
    }
}
