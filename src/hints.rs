use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::cards::{beats, classify, Card, Level, PatternResult, Rank, LEVEL_CARD_VALUE};

/// Candidate plays from `hand` that beat `incumbent`, drawn from the
/// same-value families: singles, pairs, triples, bombs of every size and the
/// king bomb. Runs and 3+2 splits are not searched. `None` stands for an
/// open table, where every candidate is a legal lead.
///
/// Plays come back weakest first: every card of the hand as a single, then
/// pairs, then triples, each family lowest value first, then bombs by
/// growing size and value, the king bomb last. Above singles there is one
/// play per value and size; identical-value cards are interchangeable so
/// nothing is lost to the pruning.
pub fn beating_plays(
    hand: &[Card],
    incumbent: Option<&PatternResult>,
    level: Level,
) -> Vec<Vec<Card>> {
    let mut wildcards: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|card| card.is_wildcard(level))
        .collect();
    wildcards.sort_by_key(|card| card.copy);

    let mut groups: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for card in hand.iter().filter(|card| !card.is_wildcard(level)) {
        groups.entry(card.value(level)).or_default().push(*card);
    }
    // Canonical in-group order keeps the output independent of hand order.
    for cards in groups.values_mut() {
        cards.sort_by_key(|card| (card.suit as u8, card.copy));
    }

    let mut values: BTreeSet<u8> = groups.keys().copied().collect();
    if !wildcards.is_empty() {
        values.insert(LEVEL_CARD_VALUE);
    }

    let mut plays: Vec<Vec<Card>> = Vec::new();
    for &value in &values {
        for card in groups.get(&value).into_iter().flatten() {
            plays.push(vec![*card]);
        }
        if value == LEVEL_CARD_VALUE {
            for card in &wildcards {
                plays.push(vec![*card]);
            }
        }
    }
    for size in 2..=3 {
        for &value in &values {
            if let Some(play) = same_value_play(&groups, &wildcards, value, size) {
                plays.push(play);
            }
        }
    }
    for size in 4..=hand.len().min(10) {
        for &value in &values {
            if let Some(play) = same_value_play(&groups, &wildcards, value, size) {
                plays.push(play);
            }
        }
    }

    let smalls: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|card| card.rank == Rank::SmallJoker)
        .collect();
    let bigs: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|card| card.rank == Rank::BigJoker)
        .collect();
    if smalls.len() == 2 && bigs.len() == 2 {
        plays.push(smalls.into_iter().chain(bigs).collect());
    }

    let table = incumbent.copied().unwrap_or_else(PatternResult::pass);
    plays.retain(|play| beats(&classify(play, level), &table));

    debug!(
        hand = hand.len(),
        against = %table,
        found = plays.len(),
        "collected beating plays"
    );
    plays
}

/// The weakest play that beats the table, or `None` to pass.
pub fn suggest_play(
    hand: &[Card],
    incumbent: Option<&PatternResult>,
    level: Level,
) -> Option<Vec<Card>> {
    let choice = beating_plays(hand, incumbent, level).into_iter().next();
    debug!(choice = ?choice, "suggested play");
    choice
}

/// A same-value play of `size` cards: naturals of that value first, wildcards
/// topping up the count. Jokers stand alone and wildcards never impersonate
/// them; away from the level value a natural anchor is required, so only the
/// wildcard single and the wildcard pair are ever built from wildcards alone.
fn same_value_play(
    groups: &BTreeMap<u8, Vec<Card>>,
    wildcards: &[Card],
    value: u8,
    size: usize,
) -> Option<Vec<Card>> {
    let naturals = groups.get(&value).map(Vec::as_slice).unwrap_or(&[]);
    let from_naturals = naturals.len().min(size);
    let from_wildcards = size - from_naturals;
    if from_wildcards > wildcards.len() {
        return None;
    }
    if value > LEVEL_CARD_VALUE && size > 1 {
        return None;
    }
    if from_naturals == 0 && value != LEVEL_CARD_VALUE {
        return None;
    }
    let mut play = naturals[..from_naturals].to_vec();
    play.extend_from_slice(&wildcards[..from_wildcards]);
    Some(play)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_hand, PatternKind};

    fn level(s: &str) -> Level {
        Level::try_from(s).unwrap()
    }

    fn hand(s: &str) -> Vec<Card> {
        parse_hand(s).unwrap()
    }

    fn table(cards: &str, at: &str) -> PatternResult {
        classify(&hand(cards), level(at))
    }

    #[test]
    fn test_open_table_enumerates_every_family() {
        let at = level("2");
        let cards = hand("3S 3H 7D 2H");
        let plays = beating_plays(&cards, None, at);

        // Every card as a single, pairs of threes and of the seven plus
        // wildcard, the wildcard-completed triple of threes.
        assert_eq!(plays.len(), 7);
        for card in &cards {
            assert!(plays.contains(&vec![*card]));
        }
        assert_eq!(plays[0], hand("3S"));
        assert_eq!(plays[3], hand("2H"));
        assert_eq!(plays[4], hand("3S 3H"));
        assert_eq!(plays[5], hand("7D 2H"));
        assert_eq!(plays[6], hand("3S 3H 2H"));
        for play in &plays {
            assert!(classify(&play, at).is_valid());
        }
    }

    #[test]
    fn test_plays_filtered_by_incumbent() {
        let at = level("2");
        let plays = beating_plays(&hand("3S 3H 7D 2H"), Some(&table("5C 5D", "2")), at);
        assert_eq!(plays, vec![hand("7D 2H")]);
    }

    #[test]
    fn test_naturals_spent_before_wildcards() {
        let at = level("2");
        let plays = beating_plays(&hand("7S 7H 2H 3D"), None, at);
        let pair = plays
            .iter()
            .find(|play| classify(play, at) == table("7C 7D", "2"))
            .unwrap();
        assert_eq!(*pair, hand("7S 7H"));
    }

    #[test]
    fn test_suggest_weakest_beating_play() {
        let at = level("2");
        let choice = suggest_play(&hand("9S 9H 5S 5H"), Some(&table("3C 3D", "2")), at);
        assert_eq!(choice, Some(hand("5S 5H")));
    }

    #[test]
    fn test_suggest_bomb_when_shape_cannot_follow() {
        let at = level("2");
        let choice = suggest_play(&hand("6S 6H 6C 6D 3S"), Some(&table("AS AH", "2")), at);
        assert_eq!(choice, Some(hand("6S 6H 6C 6D")));
    }

    #[test]
    fn test_suggest_pass_when_nothing_beats() {
        let at = level("2");
        assert_eq!(
            suggest_play(&hand("3S 4H"), Some(&table("AS AH", "2")), at),
            None
        );
    }

    #[test]
    fn test_king_bomb_answers_the_largest_bomb() {
        let at = level("2");
        let eight_card = table("TS TS TH TH TC TC TD TD", "2");
        let plays = beating_plays(&hand("SJ SJ BJ BJ 4D"), Some(&eight_card), at);
        assert_eq!(plays, vec![hand("SJ SJ BJ BJ")]);
        assert_eq!(classify(&plays[0], at).kind, PatternKind::KingBomb);
    }

    #[test]
    fn test_wildcard_pair_offered_without_level_naturals() {
        let at = level("2");
        let plays = beating_plays(&hand("2H 2H"), Some(&table("AS AH", "2")), at);
        assert_eq!(plays, vec![hand("2H 2H")]);
        assert_eq!(classify(&plays[0], at), table("2S 2C", "2"));
    }
}
