//! Link eligibility for the crawl frontier.

use regex::Regex;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Decide whether a candidate link should be enqueued, returning the
/// resolved absolute URL when it should.
///
/// A link is followed only if it resolves against the current page,
/// stays on the crawl's origin, matches the section-inclusion pattern,
/// and is not already visited or queued. Deduplication compares exact
/// URL strings: trailing slashes and query strings are distinct URLs.
///
/// Pure decision over its inputs; calling it again with the same
/// arguments returns the same answer.
pub fn should_follow(
    href: &str,
    page_url: &Url,
    base: &Url,
    section_pattern: &Regex,
    visited: &HashSet<String>,
    frontier: &VecDeque<String>,
) -> Option<Url> {
    // Fragment-only links point into the current page.
    if href.starts_with('#') {
        return None;
    }

    // Non-navigational schemes.
    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }

    let resolved = page_url.join(href).ok()?;

    // Same-origin policy; relative links resolve on-origin by
    // construction.
    if resolved.origin() != base.origin() {
        return None;
    }

    // Scope the crawl to the configured documentation subsection.
    if !section_pattern.is_match(resolved.as_str()) {
        return None;
    }

    let resolved_str = resolved.as_str();
    if visited.contains(resolved_str) {
        return None;
    }
    if frontier.iter().any(|queued| queued == resolved_str) {
        return None;
    }

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Url, Url, Regex, HashSet<String>, VecDeque<String>) {
        let base = Url::parse("https://docs.example.com/docs/overview").unwrap();
        let page = base.clone();
        let pattern = Regex::new("/docs/").unwrap();
        (page, base, pattern, HashSet::new(), VecDeque::new())
    }

    #[test]
    fn test_accepts_in_scope_relative_link() {
        let (page, base, pattern, visited, frontier) = setup();

        let resolved =
            should_follow("/docs/concepts", &page, &base, &pattern, &visited, &frontier);
        assert_eq!(
            resolved.unwrap().as_str(),
            "https://docs.example.com/docs/concepts"
        );
    }

    #[test]
    fn test_rejects_fragment_and_non_navigational() {
        let (page, base, pattern, visited, frontier) = setup();

        for href in ["#section", "javascript:void(0)", "mailto:a@b.c", "tel:123"] {
            assert!(should_follow(href, &page, &base, &pattern, &visited, &frontier).is_none());
        }
    }

    #[test]
    fn test_rejects_cross_origin() {
        let (page, base, pattern, visited, frontier) = setup();

        assert!(should_follow(
            "https://other.example.com/docs/page",
            &page,
            &base,
            &pattern,
            &visited,
            &frontier
        )
        .is_none());

        // Different scheme is a different origin too.
        assert!(should_follow(
            "http://docs.example.com/docs/page",
            &page,
            &base,
            &pattern,
            &visited,
            &frontier
        )
        .is_none());
    }

    #[test]
    fn test_rejects_out_of_section() {
        let (page, base, pattern, visited, frontier) = setup();

        assert!(should_follow("/blog/post", &page, &base, &pattern, &visited, &frontier).is_none());
    }

    #[test]
    fn test_rejects_visited_and_queued() {
        let (page, base, pattern, mut visited, mut frontier) = setup();

        visited.insert("https://docs.example.com/docs/a".to_string());
        frontier.push_back("https://docs.example.com/docs/b".to_string());

        assert!(should_follow("/docs/a", &page, &base, &pattern, &visited, &frontier).is_none());
        assert!(should_follow("/docs/b", &page, &base, &pattern, &visited, &frontier).is_none());
    }

    #[test]
    fn test_dedup_is_exact_string_not_normalized() {
        let (page, base, pattern, mut visited, frontier) = setup();

        visited.insert("https://docs.example.com/docs/a".to_string());

        // Trailing slash and query string are distinct URLs.
        assert!(should_follow("/docs/a/", &page, &base, &pattern, &visited, &frontier).is_some());
        assert!(
            should_follow("/docs/a?v=2", &page, &base, &pattern, &visited, &frontier).is_some()
        );
    }

    #[test]
    fn test_decision_is_idempotent() {
        let (page, base, pattern, visited, frontier) = setup();

        let first = should_follow("/docs/c", &page, &base, &pattern, &visited, &frontier);
        let second = should_follow("/docs/c", &page, &base, &pattern, &visited, &frontier);
        assert_eq!(first, second);
    }
}
