use std::sync::OnceLock;

use regex::Regex;

use crate::core::{
    VocabularyEntry,
    WeekFilter,
};

const WEEK_PREFIX: &str = "Week";
const BULLET: char = '*';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub entries: Vec<VocabularyEntry>,
    pub weeks: Vec<String>, // Every week header in document order, filter or not
}

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"^_+$").expect("separator pattern is valid"))
}

// Exported docs start with a byte-order mark on the first line
fn clean_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Splits a bullet line body into `(english, description)` at the first colon.
fn split_vocab_line(line: &str) -> Option<(&str, &str)> {
    let (english, description) = line.split_once(':')?;
    let english = english.trim();
    if english.is_empty() {
        return None;
    }
    Some((english, description.trim()))
}

/// Parses an exported document into vocabulary entries.
///
/// Header lines set the context carried onto the entries below them: lines
/// starting with `Week` set the week, other plain lines set the tag. Lines
/// under a week the filter rejects are ignored entirely, so they can't
/// change the tag either.
pub fn parse_document(content: &str, filter: &WeekFilter) -> ParsedDocument {
    let mut parsed = ParsedDocument::default();

    let mut current_tag = "";
    let mut current_week = "";

    for raw_line in content.lines() {
        let line = clean_line(raw_line);

        if line.is_empty() || separator().is_match(line) {
            continue;
        }

        if line.starts_with(WEEK_PREFIX) {
            current_week = line;
            if !parsed.weeks.iter().any(|week| week == line) {
                parsed.weeks.push(line.to_string());
            }
            continue;
        }

        if !filter.admits(current_week) {
            continue;
        }

        if let Some(vocab_line) = line.strip_prefix(BULLET) {
            if let Some((english, description)) = split_vocab_line(vocab_line.trim()) {
                parsed.entries.push(VocabularyEntry {
                    english: english.to_string(),
                    description: description.to_string(),
                    tag: current_tag.to_string(),
                    week: current_week.to_string(),
                });
            }
            continue;
        }

        current_tag = line;
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Week 1
Animals
* Cat: a small domesticated feline
* Dog: a domesticated canine
Week 2
Food
* Rice: a staple grain
";

    fn words(parsed: &ParsedDocument) -> Vec<&str> {
        parsed.entries.iter().map(|e| e.english.as_str()).collect()
    }

    #[test]
    fn test_parse_all_weeks() {
        let parsed = parse_document(SAMPLE, &WeekFilter::All);

        assert_eq!(words(&parsed), vec!["Cat", "Dog", "Rice"]);
        assert_eq!(parsed.weeks, vec!["Week 1", "Week 2"]);

        let cat = &parsed.entries[0];
        assert_eq!(cat.description, "a small domesticated feline");
        assert_eq!(cat.tag, "Animals");
        assert_eq!(cat.week, "Week 1");
    }

    #[test]
    fn test_parse_single_week() {
        let parsed = parse_document(SAMPLE, &WeekFilter::Week("Week 2".to_string()));

        assert_eq!(parsed.entries.len(), 1);
        let rice = &parsed.entries[0];
        assert_eq!(rice.english, "Rice");
        assert_eq!(rice.tag, "Food");
        assert_eq!(rice.week, "Week 2");

        // Weeks are collected regardless of the filter
        assert_eq!(parsed.weeks, vec!["Week 1", "Week 2"]);
    }

    #[test]
    fn test_filtered_weeks_do_not_leak_tags() {
        let content = "Week 1
Verbs
* run: to move fast
Week 2
Nouns
* table: a piece of furniture
Week 1
* walk: to move on foot
";
        let parsed = parse_document(content, &WeekFilter::Week("Week 1".to_string()));

        assert_eq!(words(&parsed), vec!["run", "walk"]);
        assert!(parsed.entries.iter().all(|e| e.tag == "Verbs"));
        assert!(parsed.entries.iter().all(|e| e.week == "Week 1"));
        // Repeated headers are listed once
        assert_eq!(parsed.weeks, vec!["Week 1", "Week 2"]);
    }

    #[test]
    fn test_all_filter_matches_unfiltered_parse() {
        let content = "Intro
* hello: a greeting
Week 1
* bye: a farewell
";
        let parsed = parse_document(content, &WeekFilter::All);

        assert_eq!(words(&parsed), vec!["hello", "bye"]);
        assert_eq!(parsed.entries[0].week, "");
        assert_eq!(parsed.entries[0].tag, "Intro");
        assert_eq!(parsed.entries[1].week, "Week 1");
        assert_eq!(parsed.entries[1].tag, "Intro");
    }

    #[test]
    fn test_malformed_and_separator_lines() {
        let content = "\u{feff}Animals
____
* no colon here
*   Owl :  a nocturnal bird: mostly
* : missing word

   * Bat:a flying mammal
";
        let parsed = parse_document(content, &WeekFilter::All);

        assert_eq!(words(&parsed), vec!["Owl", "Bat"]);
        assert_eq!(parsed.entries[0].description, "a nocturnal bird: mostly");
        assert_eq!(parsed.entries[1].description, "a flying mammal");
        // Neither the malformed bullet nor the separator changed the tag
        assert!(parsed.entries.iter().all(|e| e.tag == "Animals"));
        assert!(parsed.weeks.is_empty());
    }

    #[test]
    fn test_filter_without_weeks_skips_everything() {
        let content = "Animals
* Cat: a feline
";
        let parsed = parse_document(content, &WeekFilter::Week("Week 1".to_string()));
        assert!(parsed.entries.is_empty());
        assert!(parsed.weeks.is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let parsed = parse_document("Week 1\r\nFood\r\n* Rice: a grain\r\n", &WeekFilter::All);
        assert_eq!(parsed.entries[0].week, "Week 1");
        assert_eq!(parsed.entries[0].tag, "Food");
        assert_eq!(parsed.entries[0].description, "a grain");
    }
}
