//! Text cleanup and extraction helpers for README content.
//!
//! README text reaches the scorers HTML-stripped then Markdown-stripped.
//! Fenced code blocks are left intact: the reproducibility scorer inspects
//! them for runnable demo code.

use regex::Regex;
use std::sync::OnceLock;

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("static regex"))
}

fn md_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // [text](url) and ![alt](url) both reduce to their text
    RE.get_or_init(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("static regex"))
}

fn md_emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[*_]{1,3}([^*_]+)[*_]{1,3}").expect("static regex"))
}

/// Remove HTML tags, keeping inner text.
pub(crate) fn strip_html(text: &str) -> String {
    html_tag_re().replace_all(text, "").to_string()
}

/// Remove Markdown formatting noise: links, images, emphasis, heading
/// markers, and horizontal rules. Heading text and code fences survive.
pub(crate) fn strip_markdown(text: &str) -> String {
    let text = md_link_re().replace_all(text, "$1");
    let text = md_emphasis_re().replace_all(&text, "$1");

    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.chars().all(|c| c == '-' || c == '=' || c == '*') && trimmed.len() >= 3)
        })
        .map(|line| line.trim_start_matches('#').trim_start())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply the full cleanup chain used for all README accessors.
pub(crate) fn clean_readme(text: &str) -> String {
    strip_markdown(&strip_html(text))
}

/// Count whitespace-separated words.
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extract a value from YAML frontmatter delimited by `---` lines.
///
/// Model cards carry their license as frontmatter (`license: apache-2.0`).
/// Only a flat `key: value` scan is needed; malformed frontmatter yields
/// `None` rather than an error.
pub(crate) fn frontmatter_value(text: &str, key: &str) -> Option<String> {
    let mut lines = text.lines();
    if lines.next()?.trim() != "---" {
        return None;
    }

    for line in lines {
        let trimmed = line.trim();
        if trimmed == "---" {
            break;
        }
        if let Some((k, v)) = trimmed.split_once(':') {
            if k.trim() == key {
                let value = v.trim().trim_matches(|c| c == '"' || c == '\'');
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Find the first non-blank line following a heading containing `title`
/// (case-insensitive).
pub(crate) fn line_after_heading(text: &str, title: &str) -> Option<String> {
    let title = title.to_lowercase();
    let mut found = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if found {
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
            continue;
        }
        if trimmed.starts_with('#') && trimmed.to_lowercase().contains(&title) {
            found = true;
        }
    }
    None
}
