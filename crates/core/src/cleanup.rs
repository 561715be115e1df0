//! Text cleanup applied to extracted documents before chunking
//!
//! The cleanup pipeline is a fixed sequence of regex passes, each of which can
//! be switched off through [`CleanupOptions`]:
//!
//! 1. timestamp removal (`D/D/YYYY`, `YYYY/M/D`, `H:MM[:SS][AM/PM]`)
//! 2. URL removal (`http(s)://`, `www.`, `ftp://`)
//! 3. navigation menu fragments (`Home |`, `About Us >`, ...)
//! 4. runs of 3+ whitespace characters collapsed to a single space, except
//!    runs made only of line breaks, which step 5 handles
//! 5. runs of 3+ line breaks collapsed to a blank line
//! 6. runs of 3+ `.`/`!`/`?` collapsed to a single period
//!
//! Line endings are normalized to `\n` and the result is trimmed.
//!
//! # Examples
//!
//! ```
//! use chunkwise_core::cleanup::{clean_text, CleanupOptions};
//!
//! let raw = "Home | Posted 12/03/2023 at 10:45 AM. Visit https://example.com now!!!";
//! let cleaned = clean_text(raw, &CleanupOptions::default());
//!
//! assert!(!cleaned.contains("https://"));
//! assert!(!cleaned.contains("12/03/2023"));
//! assert!(cleaned.ends_with("now."));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}/\d{1,2}/\d{4}|\d{4}/\d{1,2}/\d{1,2})\b")
        .expect("Failed to compile date pattern regex")
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?(?:\s?[AP]M\b)?")
        .expect("Failed to compile time pattern regex")
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://|ftp://|www\.)\S+").expect("Failed to compile URL pattern regex")
});

static NAVIGATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:skip to content|privacy policy|terms of service|about us|contact us|home|about|contact|menu|login|log in|sign in|sign up|register|search|services|products|blog|news|faq|help)\s*[|>»›•·]",
    )
    .expect("Failed to compile navigation pattern regex")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{3,}").expect("Failed to compile whitespace regex"));

static NEWLINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n){3,}").expect("Failed to compile newline regex"));

static PUNCTUATION_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]{3,}").expect("Failed to compile punctuation regex"));

/// Toggles for each cleanup pass
///
/// Every pass is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupOptions {
    /// Remove date and time stamps
    pub remove_timestamps: bool,
    /// Remove URLs
    pub remove_urls: bool,
    /// Remove short navigation menu fragments
    pub remove_navigation: bool,
    /// Collapse runs of 3+ whitespace characters into one space
    pub collapse_whitespace: bool,
    /// Collapse runs of 3+ line breaks into one blank line
    pub collapse_newlines: bool,
    /// Collapse runs of 3+ `.!?` characters into a period
    pub collapse_punctuation: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            remove_timestamps: true,
            remove_urls: true,
            remove_navigation: true,
            collapse_whitespace: true,
            collapse_newlines: true,
            collapse_punctuation: true,
        }
    }
}

impl CleanupOptions {
    /// Options with every pass disabled; only line endings and trimming apply
    pub fn none() -> Self {
        Self {
            remove_timestamps: false,
            remove_urls: false,
            remove_navigation: false,
            collapse_whitespace: false,
            collapse_newlines: false,
            collapse_punctuation: false,
        }
    }
}

/// True when `run` holds nothing but `\n` or `\r\n` line breaks
fn is_line_break_run(run: &str) -> bool {
    run.replace("\r\n", "\n").chars().all(|c| c == '\n')
}

/// Cleans `text` according to `options`
///
/// Blank input yields an empty string. The function is pure and may be
/// applied repeatedly.
pub fn clean_text(text: &str, options: &CleanupOptions) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut result = text.to_string();

    if options.remove_timestamps {
        result = DATE_PATTERN.replace_all(&result, "").into_owned();
        result = TIME_PATTERN.replace_all(&result, "").into_owned();
    }

    if options.remove_urls {
        result = URL_PATTERN.replace_all(&result, "").into_owned();
    }

    if options.remove_navigation {
        result = NAVIGATION_PATTERN.replace_all(&result, "").into_owned();
    }

    if options.collapse_whitespace {
        result = WHITESPACE_RUN
            .replace_all(&result, |caps: &regex::Captures| {
                let run = &caps[0];
                if is_line_break_run(run) {
                    run.to_string()
                } else {
                    " ".to_string()
                }
            })
            .into_owned();
    }

    if options.collapse_newlines {
        result = NEWLINE_RUN.replace_all(&result, "\n\n").into_owned();
    }

    if options.collapse_punctuation {
        result = PUNCTUATION_RUN.replace_all(&result, ".").into_owned();
    }

    result
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_string()
}

/// Reusable cleaner holding a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    options: CleanupOptions,
}

impl TextCleaner {
    /// Creates a cleaner with the given options
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Returns the configured options
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Cleans `text` with the configured options
    pub fn clean(&self, text: &str) -> String {
        clean_text(text, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        clean_text(text, &CleanupOptions::default())
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\t "), "");
    }

    #[test]
    fn test_removes_dates() {
        assert_eq!(clean("Published 3/14/2024 by staff"), "Published  by staff");
        assert_eq!(clean("Updated 2024/3/14"), "Updated");
    }

    #[test]
    fn test_removes_times() {
        assert_eq!(clean("Meeting at 10:30 today"), "Meeting at  today");
        assert_eq!(clean("Starts 9:05:30 PM sharp"), "Starts  sharp");
        assert_eq!(clean("Ends 11:15am"), "Ends");
    }

    #[test]
    fn test_removes_urls() {
        assert_eq!(clean("See https://example.com/docs?a=1 for more"), "See  for more");
        assert_eq!(clean("Go to www.example.org"), "Go to");
        assert_eq!(clean("Mirror ftp://files.example.net/pub"), "Mirror");
        assert_eq!(clean("Plain http://x.io"), "Plain");
    }

    #[test]
    fn test_removes_navigation_fragments() {
        let cleaned = clean("Home | About Us > Contact » Welcome to the guide");
        assert_eq!(cleaned, "Welcome to the guide");
    }

    #[test]
    fn test_navigation_requires_separator() {
        assert_eq!(clean("Welcome home after a long trip"), "Welcome home after a long trip");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean("a     b\t\t\tc  d"), "a b c  d");
    }

    #[test]
    fn test_collapses_mixed_whitespace_runs() {
        assert_eq!(
            clean("Para one.\n\n\nPara two.\t \n  x"),
            "Para one.\n\nPara two. x"
        );
        assert_eq!(clean("left \r\n\t right"), "left right");
        assert_eq!(clean("a\r\r\rb"), "a b");

        let cleaned = clean("one \n \n \n two");
        assert_eq!(cleaned, "one two");
        assert_eq!(clean(&cleaned), cleaned);
    }

    #[test]
    fn test_collapses_newlines() {
        assert_eq!(clean("one\n\n\n\n\ntwo\n\nthree"), "one\n\ntwo\n\nthree");
        assert_eq!(clean("one\r\n\r\n\r\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_collapses_punctuation() {
        assert_eq!(clean("Wait..... really?!?! yes!!"), "Wait. really. yes!!");
    }

    #[test]
    fn test_normalizes_line_endings() {
        assert_eq!(clean("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_toggles_are_independent() {
        let options = CleanupOptions {
            remove_urls: false,
            ..CleanupOptions::default()
        };
        let cleaned = clean_text("Link: https://example.com at 10:30", &options);
        assert!(cleaned.contains("https://example.com"));
        assert!(!cleaned.contains("10:30"));
    }

    #[test]
    fn test_none_only_trims() {
        let text = "  Home | see https://x.io at 10:30...   \r\n";
        let cleaned = clean_text(text, &CleanupOptions::none());
        assert_eq!(cleaned, "Home | see https://x.io at 10:30...");
    }

    #[test]
    fn test_idempotent_on_realistic_input() {
        let raw = "Home | Blog › Posted on 12/01/2023 at 8:15 PM\r\n\r\n\r\n\
                   Rust is fast...   It is safe!!!\n\n\n\n\
                   Read more at https://blog.example.com/rust    or www.rust-lang.org.";
        let once = clean(raw);
        let twice = clean(&once);
        assert_eq!(once, twice);
        assert!(once.contains("Rust is fast. It is safe."));
    }

    #[test]
    fn test_text_cleaner_wrapper() {
        let cleaner = TextCleaner::default();
        assert!(cleaner.options().remove_urls);
        assert_eq!(cleaner.clean("a     b"), "a b");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CleanupOptions = serde_yaml::from_str("remove_urls: false").unwrap();
        assert!(!options.remove_urls);
        assert!(options.remove_timestamps);
    }
}
