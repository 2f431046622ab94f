//! Content extraction from documentation pages.
//!
//! Selects the primary content region of an HTML page by trying an
//! ordered list of structural candidates (the containers common
//! documentation generators emit), falling back to the largest `<div>`
//! by text length. Boilerplate subtrees are skipped during text
//! collection rather than mutated out of the DOM.
//!
//! Pure with respect to its inputs: no network, no shared state.

use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};

use crate::types::SkipReason;

/// Pages whose normalized text is at or below this many characters are
/// rejected as noise (nav-only or stub pages).
pub const MIN_CONTENT_CHARS: usize = 300;

/// The largest-div fallback is discarded below this many characters to
/// avoid picking a layout wrapper instead of real content.
const FALLBACK_MIN_CHARS: usize = 500;

/// Content-region candidates, tried in priority order. First present
/// candidate wins.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "div.content",
    "div[role=\"main\"]",
    "div.markdown",
    "div#content",
    "div.docs-content",
    "div.page-content",
    "section.content",
];

/// Non-content subtrees skipped when collecting text from the winning
/// region.
const STRIP_TAGS: &[&str] = &[
    "nav", "header", "footer", "script", "style", "aside", "button",
];

/// Extracted text and title for a page that cleared the content
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub text: String,
    pub title: String,
}

/// Full analysis of a fetched page: the extraction outcome plus the
/// winning region's outbound links.
///
/// Links are reported whenever a content region exists, even when its
/// text is too short to produce a document, so the crawl can still
/// advance through stub pages. A page with no content region yields no
/// links.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    pub content: Result<PageContent, SkipReason>,
    pub links: Vec<String>,
}

/// Extract the readable content of a page, or `None` when the page has
/// no usable content region or too little text.
pub fn extract(html: &str, url: &str, title_suffix: &str) -> Option<PageContent> {
    analyze(html, url, title_suffix).content.ok()
}

/// Analyze a fetched page: select the content region, normalize its
/// text, derive the title, and enumerate the region's raw `href`s.
pub fn analyze(html: &str, url: &str, title_suffix: &str) -> PageAnalysis {
    let document = Html::parse_document(html);

    let region = match select_content_region(&document) {
        Some(region) => region,
        None => {
            return PageAnalysis {
                content: Err(SkipReason::NoContentRegion),
                links: Vec::new(),
            }
        }
    };

    let links = region_links(region);
    let text = normalize_text(&collect_text(region));

    let chars = text.chars().count();
    if chars <= MIN_CONTENT_CHARS {
        return PageAnalysis {
            content: Err(SkipReason::ContentTooShort { chars }),
            links,
        };
    }

    let title = page_title(&document, url, title_suffix);

    PageAnalysis {
        content: Ok(PageContent { text, title }),
        links,
    }
}

/// Try the selector cascade, then fall back to the largest div.
fn select_content_region(document: &Html) -> Option<ElementRef<'_>> {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(region) = document.select(&selector).next() {
                return Some(region);
            }
        }
    }

    // Fallback: the div with the most stripped text, if substantial.
    let div_selector = Selector::parse("div").ok()?;
    let largest = document
        .select(&div_selector)
        .max_by_key(|div| stripped_text_len(*div))?;

    if stripped_text_len(largest) < FALLBACK_MIN_CHARS {
        return None;
    }

    Some(largest)
}

/// Character count of an element's text with each fragment trimmed.
fn stripped_text_len(element: ElementRef<'_>) -> usize {
    element
        .text()
        .map(|fragment| fragment.trim().chars().count())
        .sum()
}

/// Collect text fragments from the region, skipping boilerplate
/// subtrees, joined with newlines.
fn collect_text(region: ElementRef<'_>) -> String {
    let mut fragments = Vec::new();
    collect_text_into(region, &mut fragments);
    fragments.join("\n")
}

fn collect_text_into(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            Node::Element(el) => {
                if STRIP_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text_into(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of 3+ newlines to exactly 2 and trim the result.
fn normalize_text(text: &str) -> String {
    let multi_newline = Regex::new(r"\n{3,}").unwrap();
    multi_newline.replace_all(text, "\n\n").trim().to_string()
}

/// Page title from `<title>`, else the URL's last path segment, with
/// the branding suffix stripped when present.
fn page_title(document: &Html, url: &str, title_suffix: &str) -> String {
    let from_tag = Selector::parse("title")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let raw = from_tag.unwrap_or_else(|| {
        url.rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(url)
            .to_string()
    });

    let stripped = if !title_suffix.is_empty() {
        raw.strip_suffix(title_suffix).unwrap_or(&raw)
    } else {
        &raw
    };

    stripped.trim().to_string()
}

/// Raw `href` values of anchors inside the winning region.
fn region_links(region: ElementRef<'_>) -> Vec<String> {
    let anchor = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    region
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}
