use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use super::basic::{Card, Face, Level, Rank, Suit};
use super::patterns::{classify, PatternResult};

/// One viable identity for the wildcards in a card set, paired with the shape
/// the set takes once they commit to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WildcardSuggestion {
    pub suit: Suit,
    pub rank: Rank,
    pub result: PatternResult,
}

impl WildcardSuggestion {
    pub fn face(&self) -> Face {
        Face::new(self.rank, self.suit)
    }

    /// Display text of the suggested identity ("8H").
    pub fn label(&self) -> String {
        self.face().to_string()
    }
}

impl fmt::Display for WildcardSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.face(), self.result)
    }
}

/// Brute-force scan of the natural faces as the shared identity of every
/// wildcard in the set, keeping the faces under which the set classifies as
/// something playable. Faces already held in the set are not offered, nor is
/// the wildcard's own face, since a trial card on that face would just be
/// another wildcard. Suggestions come back in scan order: suits in display
/// priority, ranks ascending within a suit.
///
/// All wildcards in the set take the same face per trial. Sets without a
/// wildcard enumerate to nothing.
pub fn enumerate_substitutions(cards: &[Card], level: Level) -> Vec<WildcardSuggestion> {
    let wildcards = cards.iter().filter(|card| card.is_wildcard(level)).count();
    if wildcards == 0 {
        return Vec::new();
    }

    let naturals: Vec<Card> = cards
        .iter()
        .copied()
        .filter(|card| !card.is_wildcard(level))
        .collect();
    let held: HashSet<Face> = naturals.iter().map(|card| card.face()).collect();
    let wildcard_face = Face::new(level.rank(), Suit::Hearts);

    let mut suggestions = Vec::new();
    for suit in Suit::naturals() {
        for rank in Rank::naturals() {
            let face = Face::new(rank, suit);
            if face == wildcard_face || held.contains(&face) {
                continue;
            }
            let mut trial = naturals.clone();
            trial.extend(std::iter::repeat(Card::new(rank, suit)).take(wildcards));
            let result = classify(&trial, level);
            if result.is_valid() {
                suggestions.push(WildcardSuggestion { suit, rank, result });
            }
        }
    }

    debug!(
        cards = cards.len(),
        wildcards,
        found = suggestions.len(),
        "enumerated wildcard substitutions"
    );
    suggestions
}

/// Commit every wildcard in the set to the given face. Identity and ordering
/// are untouched; only the `acting_as` overlay changes.
pub fn commit_substitution(cards: &[Card], face: Face, level: Level) -> Vec<Card> {
    cards
        .iter()
        .map(|card| {
            if card.is_wildcard(level) {
                card.with_acting_as(face)
            } else {
                *card
            }
        })
        .collect()
}
