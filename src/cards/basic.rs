use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Dynamic value carried by every card of the current level rank.
pub const LEVEL_CARD_VALUE: u8 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("invalid suit token: {0}")]
    InvalidSuit(String),
    #[error("invalid rank token: {0}")]
    InvalidRank(String),
    #[error("invalid card token: {0}")]
    InvalidCard(String),
    #[error("{0} cannot be a level rank")]
    InvalidLevel(Rank),
    #[error("more than two copies of {0}")]
    TooManyCopies(Face),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Clubs = 2,
    Diamonds = 3,
    Joker = 4,
}

impl Suit {
    pub fn naturals() -> impl Iterator<Item = Suit> {
        Suit::iter().filter(|suit| *suit != Suit::Joker)
    }
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Spades => "S",
                Suit::Hearts => "H",
                Suit::Clubs => "C",
                Suit::Diamonds => "D",
                Suit::Joker => "J",
            }
        )
    }
}

impl TryFrom<&str> for Suit {
    type Error = CardError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "S" => Ok(Suit::Spades),
            "H" => Ok(Suit::Hearts),
            "C" => Ok(Suit::Clubs),
            "D" => Ok(Suit::Diamonds),
            "J" => Ok(Suit::Joker),
            _ => Err(CardError::InvalidSuit(s.to_string())),
        }
    }
}

/// Ranks carry their natural value as discriminant (2..=14); jokers sit above
/// the level-card slot at 16 and 17. Value 15 is reserved for level cards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    SmallJoker = 16,
    BigJoker = 17,
}

impl Rank {
    pub fn is_joker(&self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    pub fn naturals() -> impl Iterator<Item = Rank> {
        Rank::iter().filter(|rank| !rank.is_joker())
    }

    /// Dynamic value under the given level: level cards are elevated to 15,
    /// everything else keeps its discriminant.
    pub fn value(&self, level: Level) -> u8 {
        if *self == level.rank() {
            LEVEL_CARD_VALUE
        } else {
            *self as u8
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "T",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
                Rank::SmallJoker => "SJ",
                Rank::BigJoker => "BJ",
            }
        )
    }
}

impl TryFrom<&str> for Rank {
    type Error = CardError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            "SJ" => Ok(Rank::SmallJoker),
            "BJ" => Ok(Rank::BigJoker),
            _ => Err(CardError::InvalidRank(s.to_string())),
        }
    }
}

/// The rank currently designated as trump. Jokers are rejected at
/// construction so downstream code never has to re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Rank", into = "Rank")]
pub struct Level(Rank);

impl Level {
    pub fn rank(&self) -> Rank {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        // Matches start at level two.
        Level(Rank::Two)
    }
}

impl TryFrom<Rank> for Level {
    type Error = CardError;

    fn try_from(rank: Rank) -> Result<Self, Self::Error> {
        if rank.is_joker() {
            return Err(CardError::InvalidLevel(rank));
        }
        Ok(Level(rank))
    }
}

impl From<Level> for Rank {
    fn from(level: Level) -> Rank {
        level.0
    }
}

impl TryFrom<&str> for Level {
    type Error = CardError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Level::try_from(Rank::try_from(s)?)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A suit-and-rank pair without deck identity: what a wildcard acts as, and
/// what a substitution suggestion names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Face {
    pub suit: Suit,
    pub rank: Rank,
}

impl Face {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        debug_assert_eq!(rank.is_joker(), suit == Suit::Joker);
        Self { suit, rank }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suit == Suit::Joker {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{}{}", self.rank, self.suit)
        }
    }
}

/// One physical card out of the 108-card two-deck pack. `copy` distinguishes
/// the two copies of a face; `acting_as` records what a committed wildcard
/// stands for and is presentation state, not identity.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub copy: u8,
    pub acting_as: Option<Face>,
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank && self.copy == other.copy
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
        self.copy.hash(state);
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        debug_assert_eq!(rank.is_joker(), suit == Suit::Joker);
        Self {
            suit,
            rank,
            copy: 0,
            acting_as: None,
        }
    }

    pub fn second(rank: Rank, suit: Suit) -> Self {
        Self {
            copy: 1,
            ..Self::new(rank, suit)
        }
    }

    pub fn face(&self) -> Face {
        Face {
            suit: self.suit,
            rank: self.rank,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }

    /// The 逢人配: the Hearts card of the current level rank.
    pub fn is_wildcard(&self, level: Level) -> bool {
        self.suit == Suit::Hearts && self.rank == level.rank()
    }

    pub fn value(&self, level: Level) -> u8 {
        self.rank.value(level)
    }

    pub fn with_acting_as(self, face: Face) -> Self {
        Self {
            acting_as: Some(face),
            ..self
        }
    }

    pub fn acting_face(&self) -> Face {
        self.acting_as.unwrap_or_else(|| self.face())
    }

    pub fn from_string(s: &str) -> Result<Self, CardError> {
        match s {
            "SJ" => return Ok(Card::new(Rank::SmallJoker, Suit::Joker)),
            "BJ" => return Ok(Card::new(Rank::BigJoker, Suit::Joker)),
            _ => {}
        }

        // Byte-indexed split; get() keeps multi-byte tokens on the Err path.
        let (rank_token, suit_token) = match (s.get(0..1), s.get(1..2)) {
            (Some(rank), Some(suit)) if s.len() == 2 => (rank, suit),
            _ => return Err(CardError::InvalidCard(s.to_string())),
        };

        let rank = Rank::try_from(rank_token).map_err(|_| CardError::InvalidCard(s.to_string()))?;
        let suit = Suit::try_from(suit_token).map_err(|_| CardError::InvalidCard(s.to_string()))?;
        if rank.is_joker() || suit == Suit::Joker {
            return Err(CardError::InvalidCard(s.to_string()));
        }

        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face())
    }
}

/// Parse a whitespace-separated hand ("AH 2S 3C SJ"). A face seen a second
/// time becomes the second deck copy; a third occurrence is rejected because
/// the pack only holds two.
pub fn parse_hand(s: &str) -> Result<Vec<Card>, CardError> {
    let mut cards: Vec<Card> = Vec::new();
    for token in s.split_whitespace() {
        let mut card = Card::from_string(token)?;
        match cards.iter().filter(|c| c.face() == card.face()).count() {
            0 => {}
            1 => card.copy = 1,
            _ => return Err(CardError::TooManyCopies(card.face())),
        }
        cards.push(card);
    }
    Ok(cards)
}

/// Stable display/canonical order: wildcards first, then dynamic value
/// descending, ties broken by suit priority (Spades < Hearts < Clubs <
/// Diamonds). Inputs are left untouched.
pub fn sort_hand(cards: &[Card], level: Level) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| {
        b.is_wildcard(level)
            .cmp(&a.is_wildcard(level))
            .then_with(|| b.value(level).cmp(&a.value(level)))
            .then_with(|| a.suit.cmp(&b.suit))
    });
    sorted
}
