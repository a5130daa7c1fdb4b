use std::fmt;

pub const ALL_WEEKS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub english: String,
    pub description: String,
    pub tag: String,  // Last category header seen above the entry
    pub week: String, // Last "Week…" header seen above the entry
}

/// Which week section of the document to build the deck from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WeekFilter {
    #[default]
    All,
    Week(String),
}

impl WeekFilter {
    /// Maps a selector label back to a filter; the `"All"` label is the sentinel.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_WEEKS {
            WeekFilter::All
        } else {
            WeekFilter::Week(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WeekFilter::All => ALL_WEEKS,
            WeekFilter::Week(week) => week,
        }
    }

    /// True when lines under `current_week` should be considered.
    pub fn admits(&self, current_week: &str) -> bool {
        match self {
            WeekFilter::All => true,
            WeekFilter::Week(week) => week == current_week,
        }
    }
}

impl fmt::Display for WeekFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentResult {
    pub pronunciation: String,
    pub english_clause: String,
    pub vietnamese_clause: String,
}

impl EnrichmentResult {
    pub fn is_empty(&self) -> bool {
        self.pronunciation.is_empty()
            && self.english_clause.is_empty()
            && self.vietnamese_clause.is_empty()
    }

    /// Non-empty lines in display order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.pronunciation.is_empty() {
            lines.push(format!("/{}/", self.pronunciation));
        }
        if !self.english_clause.is_empty() {
            lines.push(self.english_clause.clone());
        }
        if !self.vietnamese_clause.is_empty() {
            lines.push(self.vietnamese_clause.clone());
        }
        lines
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFace {
    pub title: String,
    pub body: String,
    pub notes: Vec<String>,
}

impl CardFace {
    pub fn new(title: &str, body: &str) -> Self {
        Self { title: title.to_string(), body: body.to_string(), notes: Vec::new() }
    }

    pub fn enriched(title: &str, body: &str, enrichment: &EnrichmentResult) -> Self {
        Self { title: title.to_string(), body: body.to_string(), notes: enrichment.lines() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrichmentState {
    #[default]
    NotRequested,
    Pending,
    Applied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u32, // 1-based position in the shuffled deck
    pub tag: String,
    pub english: String,
    pub description: String, // Already capitalized
    pub front: CardFace,
    pub back: CardFace,
    pub enrichment: EnrichmentState,
}

impl Card {
    pub fn new(id: u32, entry: VocabularyEntry, description: String) -> Self {
        let front = CardFace::new(&entry.tag, &entry.english);
        let back = CardFace::new(&entry.tag, &description);

        Card {
            id,
            tag: entry.tag,
            english: entry.english,
            description,
            front,
            back,
            enrichment: EnrichmentState::NotRequested,
        }
    }

    pub fn apply_enrichment(&mut self, enrichment: &EnrichmentResult) {
        self.back = CardFace::enriched(&self.tag, &self.description, enrichment);
        self.enrichment = EnrichmentState::Applied;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_filter_labels() {
        assert_eq!(WeekFilter::from_label("All"), WeekFilter::All);
        assert_eq!(WeekFilter::from_label("Week 3"), WeekFilter::Week("Week 3".to_string()));
        assert_eq!(WeekFilter::Week("Week 3".to_string()).to_string(), "Week 3");
        assert_eq!(WeekFilter::default().label(), "All");
    }

    #[test]
    fn test_week_filter_admits() {
        assert!(WeekFilter::All.admits(""));
        assert!(WeekFilter::All.admits("Week 9"));

        let filter = WeekFilter::Week("Week 2".to_string());
        assert!(filter.admits("Week 2"));
        assert!(!filter.admits("Week 20"));
        assert!(!filter.admits(""));
    }

    #[test]
    fn test_enrichment_lines_skip_empty_pieces() {
        let result = EnrichmentResult {
            pronunciation: "kæt".to_string(),
            english_clause: String::new(),
            vietnamese_clause: "Con mèo.".to_string(),
        };
        assert_eq!(result.lines(), vec!["/kæt/".to_string(), "Con mèo.".to_string()]);
        assert!(EnrichmentResult::default().is_empty());
    }

    #[test]
    fn test_apply_enrichment_only_touches_back() {
        let entry = VocabularyEntry {
            english: "Cat".to_string(),
            description: "a small feline".to_string(),
            tag: "Animals".to_string(),
            week: "Week 1".to_string(),
        };
        let mut card = Card::new(4, entry, "A small feline".to_string());
        let front = card.front.clone();

        card.apply_enrichment(&EnrichmentResult {
            pronunciation: "kæt".to_string(),
            english_clause: "The cat sleeps.".to_string(),
            vietnamese_clause: "Con mèo ngủ.".to_string(),
        });

        assert_eq!(card.front, front);
        assert_eq!(card.back.title, "Animals");
        assert_eq!(card.back.body, "A small feline");
        assert_eq!(card.back.notes.len(), 3);
        assert_eq!(card.enrichment, EnrichmentState::Applied);
    }
}
