use std::collections::BTreeMap;
use std::fmt;

use super::basic::{Card, Level, Rank, LEVEL_CARD_VALUE};

/// Comparison key of the four jokers played together.
pub const KING_BOMB_VALUE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PatternKind {
    Single,
    Pair,
    Triple,
    TripleWithPair,
    Straight,
    StraightFlush,
    Tube,
    Plate,
    Bomb,
    KingBomb,
    Pass,
    Invalid,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PatternKind::Single => "Single",
                PatternKind::Pair => "Pair",
                PatternKind::Triple => "Triple",
                PatternKind::TripleWithPair => "Triple With Pair",
                PatternKind::Straight => "Straight",
                PatternKind::StraightFlush => "Straight Flush",
                PatternKind::Tube => "Tube",
                PatternKind::Plate => "Plate",
                PatternKind::Bomb => "Bomb",
                PatternKind::KingBomb => "King Bomb",
                PatternKind::Pass => "Pass",
                PatternKind::Invalid => "Invalid",
            }
        )
    }
}

/// Classification of one played card set: the kind, its comparison key and
/// the card count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatternResult {
    pub kind: PatternKind,
    pub value: u8,
    pub length: usize,
}

impl PatternResult {
    fn new(kind: PatternKind, value: u8, length: usize) -> Self {
        Self {
            kind,
            value,
            length,
        }
    }

    /// The open table. Never produced by `classify`.
    pub fn pass() -> Self {
        Self::new(PatternKind::Pass, 0, 0)
    }

    pub fn invalid(length: usize) -> Self {
        Self::new(PatternKind::Invalid, 0, length)
    }

    pub fn is_valid(&self) -> bool {
        self.kind != PatternKind::Invalid
    }

    /// Bomb tier: KingBomb above all, then bombs by size with the straight
    /// flush slotted between five and six cards. Zero for ordinary kinds.
    pub fn bomb_rank(&self) -> u8 {
        match self.kind {
            PatternKind::KingBomb => 7,
            PatternKind::StraightFlush => 3,
            PatternKind::Bomb => match self.length {
                8.. => 6,
                7 => 5,
                6 => 4,
                5 => 2,
                _ => 1,
            },
            _ => 0,
        }
    }
}

impl fmt::Display for PatternResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

/// Classify a non-empty card set under the given level. Unrecognizable
/// combinations come back as `Invalid`; this never panics on card content.
pub fn classify(cards: &[Card], level: Level) -> PatternResult {
    assert!(!cards.is_empty(), "classify requires at least one card");
    let n = cards.len();

    // The four jokers outrank everything and are checked before all else.
    if is_king_bomb(cards) {
        return PatternResult::new(PatternKind::KingBomb, KING_BOMB_VALUE, 4);
    }

    let naturals: Vec<Card> = cards
        .iter()
        .copied()
        .filter(|card| !card.is_wildcard(level))
        .collect();
    let wilds = n - naturals.len();

    // Generic bomb: every non-wildcard on one non-joker value, wildcards
    // topping the count up. Pure-wildcard sets are not bombs.
    if n >= 4 {
        if let Some(value) = uniform_value(&naturals, level) {
            return PatternResult::new(PatternKind::Bomb, value, n);
        }
    }

    match n {
        1 => PatternResult::new(PatternKind::Single, cards[0].value(level), 1),
        2 => classify_pair(cards, &naturals, level),
        3 => classify_triple(&naturals, level),
        5 => classify_five(&naturals, wilds, level),
        6 => classify_six(&naturals, wilds, level),
        _ if n >= 7 => match run_value(&naturals, n, level) {
            Some(value) => PatternResult::new(PatternKind::Straight, value, n),
            None => PatternResult::invalid(n),
        },
        _ => PatternResult::invalid(n),
    }
}

/// Does `candidate` legally supersede `incumbent` as the next play?
pub fn beats(candidate: &PatternResult, incumbent: &PatternResult) -> bool {
    if !candidate.is_valid() || !incumbent.is_valid() {
        return false;
    }
    if incumbent.kind == PatternKind::Pass {
        return true;
    }

    let (cand_bomb, inc_bomb) = (candidate.bomb_rank(), incumbent.bomb_rank());
    if cand_bomb > 0 && inc_bomb > 0 {
        // Bomb against bomb: tier, then size, then face value.
        return cand_bomb
            .cmp(&inc_bomb)
            .then(candidate.length.cmp(&incumbent.length))
            .then(candidate.value.cmp(&incumbent.value))
            .is_gt();
    }
    if cand_bomb > 0 || inc_bomb > 0 {
        // Any bomb beats any non-bomb.
        return cand_bomb > 0;
    }

    // Ordinary combinations only yield to the identical shape at a higher key.
    candidate.kind == incumbent.kind
        && candidate.length == incumbent.length
        && candidate.value > incumbent.value
}

/// Classify both played card sets and compare them. Empty slices stand for a
/// pass on either side.
pub fn compare_played_cards(played: &[Card], incumbent: &[Card], level: Level) -> bool {
    let candidate = if played.is_empty() {
        PatternResult::pass()
    } else {
        classify(played, level)
    };
    let current = if incumbent.is_empty() {
        PatternResult::pass()
    } else {
        classify(incumbent, level)
    };
    beats(&candidate, &current)
}

fn is_king_bomb(cards: &[Card]) -> bool {
    cards.len() == 4
        && cards.iter().filter(|c| c.rank == Rank::BigJoker).count() == 2
        && cards.iter().filter(|c| c.rank == Rank::SmallJoker).count() == 2
}

/// The single value shared by every non-wildcard, if there is one and it is
/// not a joker value. `None` for empty input: wildcards alone anchor nothing.
fn uniform_value(naturals: &[Card], level: Level) -> Option<u8> {
    let first = naturals.first()?;
    if naturals.iter().any(|card| card.is_joker()) {
        return None;
    }
    let value = first.value(level);
    naturals
        .iter()
        .all(|card| card.value(level) == value)
        .then_some(value)
}

fn classify_pair(cards: &[Card], naturals: &[Card], level: Level) -> PatternResult {
    // Two bare jokers never form a pair, matched tier or not.
    if cards.iter().all(|card| card.is_joker()) {
        return PatternResult::invalid(2);
    }
    let value = match naturals {
        // Both cards are wildcards: the level pair itself.
        [] => Some(LEVEL_CARD_VALUE),
        [card] if !card.is_joker() => Some(card.value(level)),
        [a, b] if !a.is_joker() && !b.is_joker() && a.value(level) == b.value(level) => {
            Some(a.value(level))
        }
        _ => None,
    };
    match value {
        Some(value) => PatternResult::new(PatternKind::Pair, value, 2),
        None => PatternResult::invalid(2),
    }
}

fn classify_triple(naturals: &[Card], level: Level) -> PatternResult {
    // Jokers never join triples; wildcards fill around a real anchor.
    match uniform_value(naturals, level) {
        Some(value) => PatternResult::new(PatternKind::Triple, value, 3),
        None => PatternResult::invalid(3),
    }
}

fn classify_five(naturals: &[Card], wilds: usize, level: Level) -> PatternResult {
    if let Some(value) = run_value(naturals, 5, level) {
        let kind = if one_suited(naturals) {
            PatternKind::StraightFlush
        } else {
            PatternKind::Straight
        };
        return PatternResult::new(kind, value, 5);
    }
    if let Some(value) = triple_with_pair_value(naturals, wilds, level) {
        return PatternResult::new(PatternKind::TripleWithPair, value, 5);
    }
    PatternResult::invalid(5)
}

fn classify_six(naturals: &[Card], wilds: usize, level: Level) -> PatternResult {
    // Plate before tube; all-same-value sets were already taken as bombs.
    // Six-card straights are not a recognized shape.
    if let Some(value) = grouped_run_value(naturals, wilds, 3, 2, level) {
        return PatternResult::new(PatternKind::Plate, value, 6);
    }
    if let Some(value) = grouped_run_value(naturals, wilds, 2, 3, level) {
        return PatternResult::new(PatternKind::Tube, value, 6);
    }
    PatternResult::invalid(6)
}

/// Scan the length-`n` windows by ascending start and return the top value of
/// the first one every non-wildcard fits, each on its own position; open
/// positions are exactly the wildcards' to fill. In the window anchored at 1
/// every Ace maps to position 1 (A2345 and its long forms); elsewhere the Ace
/// is high. Values above 14 (level cards, jokers) fit no window.
fn run_value(naturals: &[Card], n: usize, level: Level) -> Option<u8> {
    if naturals.is_empty() || n > 14 {
        return None;
    }
    let values: Vec<u8> = naturals.iter().map(|card| card.value(level)).collect();
    for start in 1..=(15 - n as u8) {
        let end = start + n as u8 - 1;
        let mut taken = [false; 15];
        let mut fits = true;
        for &value in &values {
            let position = if start == 1 && value == 14 { 1 } else { value };
            if position < start || position > end || taken[position as usize] {
                fits = false;
                break;
            }
            taken[position as usize] = true;
        }
        if fits {
            return Some(end);
        }
    }
    None
}

fn one_suited(naturals: &[Card]) -> bool {
    naturals
        .first()
        .is_some_and(|first| naturals.iter().all(|card| card.suit == first.suit))
}

/// A 3+2 split over exactly two values, wildcards covering the shortfall in
/// either group. Triple candidates are tried in ascending value order.
fn triple_with_pair_value(naturals: &[Card], wilds: usize, level: Level) -> Option<u8> {
    if naturals.iter().any(|card| card.is_joker()) {
        return None;
    }
    let counts = value_counts(naturals, level);
    if counts.len() != 2 {
        return None;
    }
    let entries: Vec<(u8, usize)> = counts.into_iter().collect();
    for (triple, pair) in [(0, 1), (1, 0)] {
        let (triple_value, triple_count) = entries[triple];
        let (_, pair_count) = entries[pair];
        if triple_count <= 3 && pair_count <= 2 && (3 - triple_count) + (2 - pair_count) == wilds {
            return Some(triple_value);
        }
    }
    None
}

/// Runs of `groups` consecutive values, each filled to `size` cards with
/// wildcards: plates are 3×2, tubes 2×3. Start values are scanned ascending
/// and the first feasible run wins. Values above 14 never participate and no
/// A-low anchoring exists here, so runs top out at the Ace.
fn grouped_run_value(
    naturals: &[Card],
    wilds: usize,
    size: usize,
    groups: usize,
    level: Level,
) -> Option<u8> {
    if naturals.is_empty() || naturals.iter().any(|card| card.is_joker()) {
        return None;
    }
    let counts = value_counts(naturals, level);
    if counts.keys().any(|&value| value > 14) {
        return None;
    }

    let span = groups as u8 - 1;
    for start in 2..=(14 - span) {
        let end = start + span;
        if !counts.keys().all(|&value| value >= start && value <= end) {
            continue;
        }
        let mut needed = 0;
        let mut fits = true;
        for value in start..=end {
            let have = counts.get(&value).copied().unwrap_or(0);
            if have > size {
                fits = false;
                break;
            }
            needed += size - have;
        }
        if fits && needed == wilds {
            return Some(end);
        }
    }
    None
}

fn value_counts(naturals: &[Card], level: Level) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for card in naturals {
        *counts.entry(card.value(level)).or_insert(0) += 1;
    }
    counts
}
