// Rule engine for the Guandan climbing card game.
// This file exposes the public API for integration tests and embedding.

pub mod cards;
pub mod deck;
pub mod hints;

// Re-export commonly used types for easier access
pub use cards::{
    beats, classify, commit_substitution, compare_played_cards, enumerate_substitutions,
    parse_hand, sort_hand, Card, CardError, Face, Level, PatternKind, PatternResult, Rank, Suit,
    WildcardSuggestion, KING_BOMB_VALUE, LEVEL_CARD_VALUE,
};
pub use deck::{deal, full_pack, shuffled_pack};
pub use hints::{beating_plays, suggest_play};
