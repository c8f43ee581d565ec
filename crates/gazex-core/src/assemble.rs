//! Notice assembly: shape dispatch and field aggregation.
//!
//! Extraction either succeeds completely or fails with the first detector
//! error; a partially valid [`Notice`] never escapes. The caller is
//! responsible for catching per-notice failures and continuing with the
//! next notice.

use tracing::debug;

use crate::act;
use crate::detect;
use crate::error::ExtractError;
use crate::lines;
use crate::rlist;
use crate::shape::{DocumentShape, classify};
use crate::summarize::Summarize;
use crate::types::Notice;

/// Extract one notice from a gazette's text layer.
///
/// `text` is the full working string; `pages` the per-page texts from the
/// same scan. Each (gazette, notice) lookup is stateless and independent.
pub fn get_notice(
    text: &str,
    pages: &[String],
    gazette_number: u32,
    notice_number: u32,
    summarizer: &dyn Summarize,
) -> Result<Notice, ExtractError> {
    let shape = classify(text);
    debug!(?shape, gazette_number, notice_number, "document classified");
    match shape {
        DocumentShape::Single => single(text, pages, gazette_number, notice_number, summarizer),
        DocumentShape::LongList => long_list(text, gazette_number, notice_number, summarizer),
        DocumentShape::RList => r_list(text, gazette_number, notice_number, summarizer),
    }
}

/// Single-notice documents carry the masthead and the notice body together,
/// so every detector runs against the whole text.
fn single(
    text: &str,
    pages: &[String],
    gazette_number: u32,
    notice_number: u32,
    summarizer: &dyn Summarize,
) -> Result<Notice, ExtractError> {
    let publish_day = detect::detect_day(text)?;
    let publish_year = detect::detect_year(text)?;
    let publish_month_name = detect::detect_month_name(text)?;
    let issn = detect::detect_issn(text)?;
    let page_number = detect::detect_page_number(text)?;
    let major_type = detect::detect_major_type(notice_number)?;
    let minor_type = act::minor_type(text, pages, notice_number)?;
    let description = summarizer.summarize(text)?;

    Ok(Notice {
        notice_number,
        gazette_number,
        publish_day,
        publish_month_name,
        publish_year,
        page_number: Some(page_number),
        issn: Some(issn),
        major_type,
        minor_type,
        description,
    })
}

fn long_list(
    text: &str,
    gazette_number: u32,
    notice_number: u32,
    summarizer: &dyn Summarize,
) -> Result<Notice, ExtractError> {
    // First occurrence wins: bilingual gazettes repeat a notice number for
    // the Afrikaans row, and the English row is listed first.
    let entry = lines::parse_document(text)
        .into_iter()
        .find(|entry| entry.notice_number == notice_number)
        .ok_or(ExtractError::EntryNotFound { notice_number })?;

    if entry.gazette_number != gazette_number {
        return Err(ExtractError::GazetteMismatch {
            expected: gazette_number,
            found: entry.gazette_number,
        });
    }

    let publish_day = detect::detect_day(text)?;
    let publish_year = detect::detect_year(text)?;
    let publish_month_name = detect::detect_month_name(text)?;
    let issn = detect::detect_issn(text).ok();
    let major_type = detect::detect_major_type(notice_number)?;
    // The row already carries its decoded law; only a department phrase on
    // the same row overrides the citation.
    let minor_type = match act::department_phrase(&entry.logical_line) {
        Some(label) => label.to_string(),
        None => crate::types::Act {
            name: entry.law_name.clone(),
            number: entry.law_number,
            year: entry.law_year,
        }
        .citation(),
    };
    let description = summarizer.summarize(&entry.notice_description)?;

    Ok(Notice {
        notice_number,
        gazette_number,
        publish_day,
        publish_month_name,
        publish_year,
        page_number: Some(entry.page_number),
        issn,
        major_type,
        minor_type,
        description,
    })
}

fn r_list(
    text: &str,
    gazette_number: u32,
    notice_number: u32,
    summarizer: &dyn Summarize,
) -> Result<Notice, ExtractError> {
    let entry = rlist::parse_regulations(text)
        .into_iter()
        .find(|entry| entry.notice_number == notice_number)
        .ok_or(ExtractError::EntryNotFound { notice_number })?;

    if let Some(found) = entry.gazette_number
        && found != gazette_number
    {
        return Err(ExtractError::GazetteMismatch {
            expected: gazette_number,
            found,
        });
    }

    let publish_day = detect::detect_day(text)?;
    let publish_year = detect::detect_year(text)?;
    let publish_month_name = detect::detect_month_name(text)?;
    let issn = detect::detect_issn(text).ok();
    let major_type = detect::detect_major_type(notice_number)?;
    let minor_type = crate::types::Act {
        name: entry.law_name.clone(),
        number: entry.law_number,
        year: entry.law_year,
    }
    .citation();
    let description = summarizer.summarize(&entry.notice_description)?;

    Ok(Notice {
        notice_number,
        gazette_number,
        publish_day,
        publish_month_name,
        publish_year,
        page_number: entry.page_number,
        issn,
        major_type,
        minor_type,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::SummarizeError;
    use crate::types::MajorType;

    fn echo(text: &str) -> Result<String, SummarizeError> {
        Ok(text.to_string())
    }

    const SINGLE_NOTICE: &str = "\
Government Gazette Staatskoerant REPUBLIEK VAN SUID AFRIKA Vol: 719 23 2025 No: 52724 Mei ISSN 1682-5845 May
Contents Gazette Page
GENERAL NOTICES ALGEMENE KENNISGEWINGS
Sports, Arts and Culture, Department of / Sport; Kuns en Kultuur; Departement van
Draft National Policy on Heritage Memorialisation: Publication of notice to request
public comment on the draft National Policy Framework for Heritage Memorialisation
Department of Sports, Arts and Culture
No. 52724 3";

    #[test]
    fn single_notice_end_to_end() {
        let notice = get_notice(SINGLE_NOTICE, &[], 52724, 3228, &echo).unwrap();
        assert_eq!(notice.notice_number, 3228);
        assert_eq!(notice.gazette_number, 52724);
        assert_eq!(notice.publish_day, 23);
        assert_eq!(notice.publish_month_name, "May");
        assert_eq!(notice.publish_year, 2025);
        assert_eq!(notice.page_number, Some(3));
        assert_eq!(notice.issn.as_deref(), Some("1682-5845"));
        assert_eq!(notice.major_type, MajorType::GeneralNotice);
        assert_eq!(notice.minor_type, "Department of Sports, Arts and Culture");
        assert!(notice.description.contains("Heritage Memorialisation"));
    }

    #[test]
    fn exchange_control_minor_type_via_special_case() {
        let text = "\
Government Gazette Staatskoerant REPUBLIEK VAN SUID AFRIKA Vol: 719 23 2025 No: 52695 Mei ISSN 1682-5845 May
South African Reserve Bank: appointment of authorised dealers in foreign exchange
with limited authority for the purpose of Exchange Control Regulations
No. 52695 3";
        let notice = get_notice(text, &[], 52695, 3197, &echo).unwrap();
        assert_eq!(notice.minor_type, "Currency and Exchanges ACT 9 of 1933");
        assert_eq!(notice.major_type, MajorType::GeneralNotice);
    }

    const LONG_LIST: &str = "\
Government Gazette Staatskoerant REPUBLIEK VAN SUID AFRIKA Vol: 719 23 2025 No: 52712 Mei ISSN 1682-5845 May
GENERAL NOTICES ALGEMENE KENNISGEWINGS
3379 Subdivision of Agricultural Land Act (70/1970): Intention for the exclusion of certain properties ........ 52712 14
3380 Road Accident Fund Act (56/1996): Adjustment of statutory limit ........ 52712 16
3380 Wet op die Ongevallefonds (56/1996): Aanpassing van statutere perk ........ 52712 17
3381 Skills Development Act, No. 97 of 1998: Registration of trade unions ........ 52712 18";

    #[test]
    fn long_list_end_to_end() {
        let notice = get_notice(LONG_LIST, &[], 52712, 3380, &echo).unwrap();
        assert_eq!(notice.notice_number, 3380);
        assert_eq!(notice.gazette_number, 52712);
        assert_eq!(notice.publish_day, 23);
        assert_eq!(notice.publish_month_name, "May");
        assert_eq!(notice.publish_year, 2025);
        assert_eq!(notice.issn.as_deref(), Some("1682-5845"));
        assert_eq!(notice.major_type, MajorType::GeneralNotice);
        assert_eq!(notice.minor_type, "Road Accident Fund ACT 56 of 1996");
        assert_eq!(notice.description, "Adjustment of statutory limit");
        // English row listed first wins over the Afrikaans repeat.
        assert_eq!(notice.page_number, Some(16));
    }

    #[test]
    fn long_list_unknown_notice_fails() {
        let err = get_notice(LONG_LIST, &[], 52712, 3999, &echo).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::EntryNotFound { notice_number: 3999 }
        ));
    }

    #[test]
    fn long_list_gazette_mismatch_is_fatal() {
        let err = get_notice(LONG_LIST, &[], 99999, 3380, &echo).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::GazetteMismatch {
                expected: 99999,
                found: 52712,
            }
        ));
    }

    const R_LIST: &str = "\
Government Gazette Staatskoerant REPUBLIEK VAN SUID AFRIKA Vol: 720 30 2025 No: 52800 Mei ISSN 1682-5845 May
GOVERNMENT NOTICES
R. 701 Customs and Excise Act (91/1964): Amendment of Schedule No. 1 ........ 52800 22
R. 702 Value-Added Tax Act (89/1991): Regulations on electronic services";

    #[test]
    fn r_list_end_to_end() {
        let notice = get_notice(R_LIST, &[], 52800, 701, &echo).unwrap();
        assert_eq!(notice.notice_number, 701);
        assert_eq!(notice.major_type, MajorType::BoardNotice);
        assert_eq!(notice.minor_type, "Customs and Excise ACT 91 of 1964");
        assert_eq!(notice.page_number, Some(22));
        assert_eq!(notice.description, "Amendment of Schedule No. 1");
    }

    #[test]
    fn r_list_row_without_trailing_columns_has_no_page() {
        let notice = get_notice(R_LIST, &[], 52800, 702, &echo).unwrap();
        assert_eq!(notice.page_number, None);
        assert_eq!(notice.minor_type, "Value-Added Tax ACT 89 of 1991");
    }

    #[test]
    fn summarizer_failure_propagates() {
        let failing = |_: &str| Err::<String, _>(SummarizeError::new("api down"));
        let err = get_notice(SINGLE_NOTICE, &[], 52724, 3228, &failing).unwrap_err();
        assert!(matches!(err, ExtractError::Summarize(_)));
    }

    #[test]
    fn detector_failure_propagates_before_summarization() {
        let text = "no masthead at all, just prose";
        let err = get_notice(text, &[], 52724, 3228, &echo).unwrap_err();
        assert!(matches!(err, ExtractError::Detection { .. }));
    }
}
