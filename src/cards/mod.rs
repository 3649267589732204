pub mod basic;
pub mod patterns;
pub mod wildcard;


pub use basic::{
    parse_hand, sort_hand, Card, CardError, Face, Level, Rank, Suit, LEVEL_CARD_VALUE,
};
pub use patterns::{
    beats, classify, compare_played_cards, PatternKind, PatternResult, KING_BOMB_VALUE,
};
pub use wildcard::{commit_substitution, enumerate_substitutions, WildcardSuggestion};
