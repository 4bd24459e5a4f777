//! Keyword-overlap ranking for the personalized feed
//!
//! Builds a keyword set from a user's declared interests and from the notes
//! they interacted with, then scores candidate notes by how many distinct
//! keywords occur in their text.
//!
//! Algorithm:
//! - Interests: comma split, trimmed, empty pieces dropped
//! - History: tags of interacted notes plus title/description words
//!   (lower-cased, longer than 3 chars, not a stop word)
//! - Keyword set: union, case-folded, deduplicated, keywords of 2 chars or
//!   fewer dropped
//! - Score: +1 per keyword found anywhere in `tags title description`
//! - Order: score desc, then created_at desc, then id desc
//!
//! Everything here is pure; the store lookups live in `personalized_feed`.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{Note, RankedNote};

/// Words ignored when mining titles and descriptions
pub const STOP_WORDS: [&str; 18] = [
    "this", "is", "the", "and", "or", "of", "a", "an", "to", "in", "for", "with", "on", "at",
    "by", "from", "up", "about",
];

/// Title/description tokens must be longer than this
const MIN_TOKEN_EXCLUSIVE: usize = 3;

/// Keywords must be longer than this
const MIN_KEYWORD_EXCLUSIVE: usize = 2;

/// Split a comma-separated interests field into trimmed, non-empty tags
pub fn parse_interests(raw: Option<&str>) -> Vec<String> {
    raw.map(split_tags).unwrap_or_default()
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn text_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > MIN_TOKEN_EXCLUSIVE && !STOP_WORDS.contains(&w.as_str()))
}

/// Mine keywords from the notes a user has interacted with.
///
/// Returns each keyword once, in first-seen order.
pub fn mine_history_keywords(notes: &[Note]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for note in notes {
        let mined = split_tags(&note.tags)
            .into_iter()
            .chain(text_tokens(&note.title))
            .chain(text_tokens(&note.description));

        for keyword in mined {
            if seen.insert(keyword.clone()) {
                keywords.push(keyword);
            }
        }
    }

    keywords
}

/// Case-folded, deduplicated keyword set used to filter and score notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn build<I, M>(interests: I, mined: M) -> Self
    where
        I: IntoIterator<Item = String>,
        M: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let keywords = interests
            .into_iter()
            .chain(mined)
            .map(|k| k.to_lowercase())
            .filter(|k| k.chars().count() > MIN_KEYWORD_EXCLUSIVE)
            .filter(|k| seen.insert(k.clone()))
            .collect();

        Self { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }
}

/// Number of distinct keywords occurring in the note's tags, title or description
pub fn relevance_score(note: &Note, keywords: &KeywordSet) -> u32 {
    let text = format!("{} {} {}", note.tags, note.title, note.description).to_lowercase();
    keywords.iter().filter(|k| text.contains(k)).count() as u32
}

fn by_relevance(a: &RankedNote, b: &RankedNote) -> Ordering {
    b.relevance_score
        .cmp(&a.relevance_score)
        .then_with(|| b.note.created_at.cmp(&a.note.created_at))
        .then_with(|| b.note.id.cmp(&a.note.id))
}

/// Rank candidate notes against the keyword set.
///
/// With an empty keyword set the candidates keep their incoming order and
/// carry no score.
pub fn rank_notes(candidates: Vec<Note>, keywords: &KeywordSet) -> Vec<RankedNote> {
    if keywords.is_empty() {
        return candidates
            .into_iter()
            .map(|note| RankedNote {
                note,
                relevance_score: None,
            })
            .collect();
    }

    let mut ranked: Vec<RankedNote> = candidates
        .into_iter()
        .map(|note| {
            let score = relevance_score(&note, keywords);
            RankedNote {
                note,
                relevance_score: Some(score),
            }
        })
        .collect();

    ranked.sort_by(by_relevance);
    ranked
}
