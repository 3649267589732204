use rand::seq::SliceRandom;
use tracing::debug;

use crate::cards::{sort_hand, Card, Level, Rank, Suit};

/// The full two-deck pack: every face twice, 108 cards in fixed face order.
pub fn full_pack() -> Vec<Card> {
    let mut faces: Vec<(Rank, Suit)> = Vec::with_capacity(54);
    for suit in Suit::naturals() {
        for rank in Rank::naturals() {
            faces.push((rank, suit));
        }
    }
    faces.push((Rank::SmallJoker, Suit::Joker));
    faces.push((Rank::BigJoker, Suit::Joker));

    let mut cards = Vec::with_capacity(108);
    for (rank, suit) in faces {
        cards.push(Card::new(rank, suit));
        cards.push(Card::second(rank, suit));
    }
    cards
}

pub fn shuffled_pack() -> Vec<Card> {
    let mut cards = full_pack();
    cards.shuffle(&mut rand::rng());
    cards
}

/// Deal the shuffled pack into four 27-card hands for a round at the given
/// level, each hand in canonical display order.
pub fn deal(level: Level) -> [Vec<Card>; 4] {
    let mut cards = shuffled_pack();
    let hands = std::array::from_fn(|_| {
        let hand: Vec<Card> = cards.drain(0..27).collect();
        sort_hand(&hand, level)
    });
    debug!(%level, "dealt four hands");
    hands
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::cards::Face;

    fn sort_key(card: &Card) -> (u8, u8, u8) {
        (card.suit as u8, card.rank as u8, card.copy)
    }

    #[test]
    fn test_full_pack_composition() {
        let pack = full_pack();
        assert_eq!(pack.len(), 108);

        let mut by_face: HashMap<Face, Vec<u8>> = HashMap::new();
        for card in &pack {
            by_face.entry(card.face()).or_default().push(card.copy);
        }
        assert_eq!(by_face.len(), 54);
        for (face, mut copies) in by_face {
            copies.sort();
            assert_eq!(copies, vec![0, 1], "face {face} should appear twice");
        }
    }

    #[test]
    fn test_deal_covers_the_pack() {
        let hands = deal(Level::default());
        for hand in &hands {
            assert_eq!(hand.len(), 27);
        }

        let mut dealt: Vec<Card> = hands.iter().flatten().copied().collect();
        dealt.sort_by_key(sort_key);
        let mut pack = full_pack();
        pack.sort_by_key(sort_key);
        assert_eq!(dealt, pack);
    }

    #[test]
    fn test_deal_hands_come_sorted() {
        let level = Level::try_from("8").unwrap();
        for hand in deal(level) {
            assert_eq!(hand, sort_hand(&hand, level));
        }
    }
}
