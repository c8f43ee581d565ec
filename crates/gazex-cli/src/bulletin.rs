//! Weekly bulletin generation: batch extraction with per-notice isolation.
//!
//! One failed notice must never sink the batch; failures are collected into
//! a trailing "technical issues" section and the run continues.

use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use gazex_ai::{Cached, ClaudeSummarizer, SummaryCache};
use gazex_core::{Notice, Summarize, get_notice};
use gazex_store::{
    CachedScan, DirLocator, LocateGazette, PageCache, PdftotextScanner, ScanPdf,
};

/// One row of the annotated notices CSV.
#[derive(Debug, Deserialize)]
struct NoticeRef {
    gazette_number: u32,
    notice_number: u32,
}

/// A notice that could not be extracted, kept for the issues section.
struct Issue {
    gazette_number: u32,
    notice_number: u32,
    reason: String,
}

pub fn run(notices: &Path, gazettes: &Path, cache_dir: &Path) -> anyhow::Result<()> {
    let refs = read_notice_refs(notices)?;
    let locator = DirLocator::new(gazettes);
    let scanner = CachedScan::new(
        PdftotextScanner::default(),
        PageCache::open(cache_dir.join("pages.json")),
    );
    let summarizer = Cached::new(
        ClaudeSummarizer::from_env()?,
        SummaryCache::open(cache_dir.join("summaries.json")),
    );

    let mut extracted = Vec::new();
    let mut issues = Vec::new();
    for row in refs {
        match extract_one(
            &locator,
            &scanner,
            &summarizer,
            row.gazette_number,
            row.notice_number,
        ) {
            Ok(notice) => extracted.push(notice),
            Err(err) => {
                warn!(
                    gazette = row.gazette_number,
                    notice = row.notice_number,
                    %err,
                    "notice extraction failed"
                );
                issues.push(Issue {
                    gazette_number: row.gazette_number,
                    notice_number: row.notice_number,
                    reason: err.to_string(),
                });
            }
        }
    }
    info!(
        extracted = extracted.len(),
        issues = issues.len(),
        "bulletin assembly complete"
    );

    print!("{}", render(&extracted, &issues));
    Ok(())
}

pub fn print_notice(
    gazette_number: u32,
    notice_number: u32,
    gazettes: &Path,
    cache_dir: &Path,
) -> anyhow::Result<()> {
    let locator = DirLocator::new(gazettes);
    let scanner = CachedScan::new(
        PdftotextScanner::default(),
        PageCache::open(cache_dir.join("pages.json")),
    );
    let summarizer = Cached::new(
        ClaudeSummarizer::from_env()?,
        SummaryCache::open(cache_dir.join("summaries.json")),
    );

    let notice = extract_one(&locator, &scanner, &summarizer, gazette_number, notice_number)?;
    println!("{}", serde_json::to_string_pretty(&notice)?);
    Ok(())
}

fn read_notice_refs(path: &Path) -> anyhow::Result<Vec<NoticeRef>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for row in csv::Reader::from_reader(file).deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn extract_one(
    locator: &impl LocateGazette,
    scanner: &impl ScanPdf,
    summarizer: &dyn Summarize,
    gazette_number: u32,
    notice_number: u32,
) -> anyhow::Result<Notice> {
    let path = locator.locate(gazette_number)?;
    let doc = scanner.scan(&path)?;
    Ok(get_notice(
        &doc.full_text,
        &doc.pages,
        gazette_number,
        notice_number,
        summarizer,
    )?)
}

/// Citation tail of a bulletin entry, e.g.
/// "(GenN 3228 in GG 52724 of 23 May 2025) (p3)".
fn citation(notice: &Notice) -> String {
    let mut cite = format!(
        "({} {} in GG {} of {} {} {})",
        notice.major_type.abbreviation(),
        notice.notice_number,
        notice.gazette_number,
        notice.publish_day,
        notice.publish_month_name,
        notice.publish_year,
    );
    if let Some(page) = notice.page_number {
        let _ = write!(cite, " (p{page})");
    }
    cite
}

/// Render the bulletin text: title block, ISSN, one section per heading,
/// then the technical-issues tail.
fn render(notices: &[Notice], issues: &[Issue]) -> String {
    let mut out = String::new();
    out.push_str("WEEKLY STATUTES BULLETIN\n\n");

    if let Some(issn) = notices.iter().find_map(|notice| notice.issn.as_deref()) {
        let _ = writeln!(out, "ISSN {issn}\n");
    }

    let headings = ["PROCLAMATIONS AND NOTICES", "BOARD NOTICES"];
    for heading in headings {
        let in_section: Vec<&Notice> = notices
            .iter()
            .filter(|notice| notice.major_type.heading() == heading)
            .collect();
        if in_section.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{heading}\n");
        for notice in in_section {
            let _ = writeln!(out, "{}:\n", notice.minor_type);
            let _ = writeln!(out, "{} {}\n", notice.description, citation(notice));
        }
    }

    if !issues.is_empty() {
        out.push_str("NOTICES WITH TECHNICAL ISSUES\n\n");
        for issue in issues {
            let _ = writeln!(
                out,
                "GG {} notice {}: {}",
                issue.gazette_number, issue.notice_number, issue.reason
            );
        }
    }

    out
}
