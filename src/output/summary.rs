//! Console reports for crawls and the email store

use crate::crawler::CrawlResult;
use crate::outreach::SendReport;
use crate::storage::MergeOutcome;
use std::fmt::Write;

/// Renders the end-of-crawl summary
///
/// # Arguments
///
/// * `result` - What the crawl found
/// * `merge` - How the findings changed the store
pub fn format_crawl_summary(result: &CrawlResult, merge: &MergeOutcome) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Summary ===\n");
    let _ = writeln!(out, "Pages:");
    let _ = writeln!(out, "  Scanned: {}", result.pages_scanned);
    let _ = writeln!(out, "  Failed: {}", result.pages_failed);
    let _ = writeln!(out);
    let _ = writeln!(out, "Emails:");
    let _ = writeln!(out, "  Unique found: {}", result.emails.len());
    let _ = writeln!(out, "  Newly added to store: {}", merge.added);
    let _ = writeln!(out, "  Total in store: {}", merge.total);

    if !result.emails.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Found:");
        for email in &result.emails {
            let _ = writeln!(out, "  - {}", email);
        }
    }

    out
}

/// Prints the end-of-crawl summary to stdout
pub fn print_crawl_summary(result: &CrawlResult, merge: &MergeOutcome) {
    print!("{}", format_crawl_summary(result, merge));
}

/// Renders stored addresses as a list numbered from 1
pub fn format_email_list(emails: &[String]) -> String {
    if emails.is_empty() {
        return "No emails in store.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Stored emails ({}):", emails.len());
    for (index, email) in emails.iter().enumerate() {
        let _ = writeln!(out, "{:>4}. {}", index + 1, email);
    }
    out
}

/// Prints stored addresses to stdout
pub fn print_email_list(emails: &[String]) {
    print!("{}", format_email_list(emails));
}

/// Renders the outcome of a batched send
pub fn format_send_report(report: &SendReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Send Summary ===\n");
    let _ = writeln!(out, "  Sent: {}", report.sent.len());
    let _ = writeln!(out, "  Failed: {}", report.failed.len());
    let _ = writeln!(out, "  Batches: {}", report.batches);
    let _ = writeln!(out, "  Removed from store: {}", report.removed);

    if !report.failed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Not delivered:");
        for email in &report.failed {
            let _ = writeln!(out, "  - {}", email);
        }
    }
    out
}

/// Prints the outcome of a batched send to stdout
pub fn print_send_report(report: &SendReport) {
    print!("{}", format_send_report(report));
}
