use rand::Rng;

use crate::core::{
    Card,
    VocabularyEntry,
};

/// Uppercases the first character only.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle_entries<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffles the entries and numbers the resulting cards from 1.
pub fn build_deck<R: Rng + ?Sized>(mut entries: Vec<VocabularyEntry>, rng: &mut R) -> Vec<Card> {
    shuffle_entries(&mut entries, rng);

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let description = capitalize(&entry.description);
            Card::new(index as u32 + 1, entry, description)
        })
        .collect()
}
