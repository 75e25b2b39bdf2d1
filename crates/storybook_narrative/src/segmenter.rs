//! Story segmentation.
//!
//! Sentences are found with a simple heuristic: a sentence ends at `.`, `!`
//! or `?` followed by whitespace. Abbreviations ("Mr. Fox") and decimals
//! followed by a space are split too.

use regex::Regex;
use std::sync::LazyLock;
use storybook_core::{Page, ReadingLevel};

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\Atitle:[^\n]*\n").expect("valid title regex"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

static PAGE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)page\s*\d+[:\-]?").expect("valid page label regex"));

/// Most pages [`paginate_by_reading_level`] will return.
const MAX_LEVELED_PAGES: usize = 20;

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in SENTENCE_END.find_iter(text) {
        // Keep the punctuation, drop the whitespace.
        sentences.push(&text[last..m.start() + 1]);
        last = m.end();
    }
    sentences.push(&text[last..]);
    sentences
}

/// Split a story into exactly `total_pages` pages.
///
/// A leading `Title:` line is removed. Sentences are grouped in windows of
/// `max(1, sentences / total_pages)`; leftover windows past `total_pages` are
/// dropped and missing ones become empty pages. Residual `Page N:` labels
/// are stripped from each page.
///
/// # Examples
///
/// ```
/// use storybook_narrative::split_story_into_pages;
///
/// let pages = split_story_into_pages("Title: Fox\nOne. Two! Three? Four.", 2);
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[0].text, "One. Two!");
/// assert_eq!(pages[1].index, 2);
/// assert_eq!(pages[1].text, "Three? Four.");
/// ```
pub fn split_story_into_pages(story_text: &str, total_pages: usize) -> Vec<Page> {
    if total_pages == 0 {
        return Vec::new();
    }

    let body = TITLE_LINE.replace(story_text, "");
    let sentences = split_sentences(body.trim());
    let group = (sentences.len() / total_pages).max(1);

    let mut chunks: Vec<String> = sentences
        .chunks(group)
        .take(total_pages)
        .map(|window| PAGE_LABEL.replace_all(&window.join(" "), "").trim().to_string())
        .collect();
    chunks.resize(total_pages, String::new());

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, text)| Page::new(i + 1, text))
        .collect()
}

/// Group a story's sentences into pages sized for a reading level.
///
/// Sentences are split on `". "`. Early readers get one sentence per page,
/// intermediate readers two and advanced readers four, rejoined with `". "`.
/// At most 20 pages are returned.
///
/// # Examples
///
/// ```
/// use storybook_core::ReadingLevel;
/// use storybook_narrative::paginate_by_reading_level;
///
/// let pages = paginate_by_reading_level("A. B. C", ReadingLevel::Intermediate);
/// assert_eq!(pages, vec!["A. B", "C"]);
/// ```
pub fn paginate_by_reading_level(story: &str, level: ReadingLevel) -> Vec<String> {
    let sentences: Vec<&str> = story.split(". ").collect();
    sentences
        .chunks(level.sentences_per_page())
        .take(MAX_LEVELED_PAGES)
        .map(|group| group.join(". "))
        .collect()
}
