use guandan::{
    beating_plays, beats, classify, commit_substitution, compare_played_cards, deal,
    enumerate_substitutions, full_pack, parse_hand, sort_hand, suggest_play, Card, Face, Level,
    PatternKind, Rank, Suit,
};

fn level(s: &str) -> Level {
    Level::try_from(s).unwrap()
}

fn hand(s: &str) -> Vec<Card> {
    parse_hand(s).unwrap()
}

#[test]
fn test_arranged_trick_adjudication() {
    let at = level("8");

    // The instructor lays out a trick: a pair opens, a higher pair answers,
    // a bomb takes the table, a bigger bomb takes it back.
    let south = hand("4S 4H");
    let west = hand("9C 9D");
    let north = hand("QS QH QC QD");
    let east = hand("KS KH KC KD KS");

    assert!(compare_played_cards(&west, &south, at));
    assert!(compare_played_cards(&north, &west, at));
    assert!(compare_played_cards(&east, &north, at));

    // An ordinary pair cannot answer a bomb, and neither can a pass.
    assert!(!compare_played_cards(&hand("AS AH"), &north, at));
    assert!(!compare_played_cards(&[], &north, at));
}

#[test]
fn test_wildcard_commitment_workflow() {
    let at = level("4");
    let cards = hand("7S 7C 8S 8C 4H");

    // Two pairs plus the wildcard: the player may declare it a seven or an
    // eight, in any suit not already held.
    let suggestions = enumerate_substitutions(&cards, at);
    let faces: Vec<Face> = suggestions.iter().map(|s| s.face()).collect();
    assert_eq!(
        faces,
        vec![
            Face::new(Rank::Seven, Suit::Hearts),
            Face::new(Rank::Eight, Suit::Hearts),
            Face::new(Rank::Seven, Suit::Diamonds),
            Face::new(Rank::Eight, Suit::Diamonds),
        ]
    );

    // Declaring an eight scores the play as the higher full set.
    let chosen = suggestions
        .iter()
        .find(|s| s.face() == Face::new(Rank::Eight, Suit::Diamonds))
        .unwrap();
    assert_eq!(chosen.result.kind, PatternKind::TripleWithPair);
    assert_eq!(chosen.result.value, 8);

    // Committing overlays the identity without changing which card it is.
    let committed = commit_substitution(&cards, chosen.face(), at);
    assert_eq!(committed, cards);
    assert_eq!(committed[4].acting_face(), chosen.face());
    assert_eq!(committed[0].acting_as, None);
}

#[test]
fn test_hint_workflow_against_live_table() {
    let at = level("2");
    let held = hand("3S 3H 9S 9H 9C 2H KS");
    let incumbent = classify(&hand("8S 8H"), at);

    let plays = beating_plays(&held, Some(&incumbent), at);
    assert_eq!(plays.len(), 3);
    for play in &plays {
        assert!(beats(&classify(play, at), &incumbent));
    }

    // Weakest first: the natural nines, the wildcard-backed kings, the bomb.
    assert_eq!(plays[0], hand("9S 9H"));
    assert_eq!(plays[1], hand("KS 2H"));
    assert_eq!(plays[2], hand("9S 9H 9C 2H"));
    assert_eq!(suggest_play(&held, Some(&incumbent), at), Some(hand("9S 9H")));
}

#[test]
fn test_deal_provides_playable_sorted_hands() {
    let at = Level::default();
    let hands = deal(at);

    let mut dealt = 0;
    for held in &hands {
        assert_eq!(held.len(), 27);
        assert_eq!(*held, sort_hand(held, at));

        // On an open table every hand has a legal lead.
        let plays = beating_plays(held, None, at);
        assert!(!plays.is_empty());
        dealt += held.len();
    }
    assert_eq!(dealt, full_pack().len());
}

#[test]
fn test_level_retunes_values_and_wildcards() {
    let eights = hand("8S 8H 8C 8D");
    assert_eq!(classify(&eights, level("2")).value, 8);
    assert_eq!(classify(&eights, level("8")).value, 15);

    // At its own level the hearts eight goes wild and leads the sort.
    let at = level("8");
    let sorted = sort_hand(&hand("AS 8H 3C"), at);
    assert!(sorted[0].is_wildcard(at));
    assert_eq!(sorted[0], Card::new(Rank::Eight, Suit::Hearts));
}
