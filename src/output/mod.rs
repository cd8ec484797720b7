//! Output module for reporting crawl results
//!
//! This module handles:
//! - The end-of-crawl summary (pages, emails, store changes)
//! - Listing the contents of the email store
//! - The outcome of a batched send

mod summary;

pub use summary::{
    format_crawl_summary, format_email_list, format_send_report, print_crawl_summary,
    print_email_list, print_send_report,
};
