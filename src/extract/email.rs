use crate::extract::validate::validate_email;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::collections::BTreeSet;

/// Shape of an address candidate: local part, `@`, domain, alphabetic TLD
static EMAIL_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("hardcoded regex pattern is valid")
});

/// Extracts validated email addresses from an HTML document
///
/// Markup is stripped first, so addresses are only found in visible text
/// content (`mailto:` targets in attributes are not scanned). Candidates that
/// fail validation are dropped; the returned set holds canonical forms.
///
/// # Examples
///
/// ```
/// use email_trawler::extract::extract_emails;
///
/// let html = "<p>contact: <b>jane.doe@example.com</b>!!</p>";
/// let emails = extract_emails(html);
/// assert_eq!(emails.into_iter().collect::<Vec<_>>(), vec!["jane.doe@example.com"]);
/// ```
pub fn extract_emails(html: &str) -> BTreeSet<String> {
    extract_emails_from_text(&html_to_text(html))
}

/// Extracts validated email addresses from plain text
pub fn extract_emails_from_text(text: &str) -> BTreeSet<String> {
    let mut emails = BTreeSet::new();

    for candidate in EMAIL_CANDIDATE.find_iter(text) {
        match validate_email(candidate.as_str()) {
            Ok(canonical) => {
                emails.insert(canonical);
            }
            Err(e) => {
                tracing::trace!("Discarding candidate {}: {}", candidate.as_str(), e);
            }
        }
    }

    emails
}

/// Elements whose boundaries separate words when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "li", "main", "nav", "ol", "option", "p", "pre",
    "section", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// One step of the document walk in [`html_to_text`]
enum Step<'a> {
    Open(ElementRef<'a>),
    Close(bool),
    Text(&'a str),
}

/// Returns the text content of an HTML document
///
/// Text nodes keep their own whitespace and are concatenated as they appear,
/// so inline markup such as `info<b>@example.com</b>` does not split an
/// address. A space is inserted at block-level element boundaries, which
/// keeps `<td>a@b.com</td><td>next</td>` apart.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::with_capacity(html.len());
    let mut stack = vec![Step::Open(document.root_element())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(fragment) => text.push_str(fragment),
            Step::Close(block) => {
                if block {
                    push_separator(&mut text);
                }
            }
            Step::Open(element) => {
                let block = is_block(element.value().name());
                if block {
                    push_separator(&mut text);
                }
                stack.push(Step::Close(block));

                let children: Vec<_> = element.children().collect();
                for child in children.into_iter().rev() {
                    match child.value() {
                        Node::Text(fragment) => {
                            let fragment: &str = fragment;
                            stack.push(Step::Text(fragment));
                        }
                        Node::Element(_) => {
                            if let Some(child) = ElementRef::wrap(child) {
                                stack.push(Step::Open(child));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    text.trim().to_string()
}

fn is_block(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

fn push_separator(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}
