//! Tests for dealing and shuffling decks.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use strictly_pairs::{CardPosition, Deck, DeckError, DeckSource, ShuffledDecks, Symbol};

fn counts(deck: &Deck) -> HashMap<Symbol, usize> {
    let mut counts = HashMap::new();
    for symbol in deck.symbols() {
        *counts.entry(*symbol).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_every_symbol_appears_exactly_twice() {
    let alphabet = Symbol::alphabet();
    for k in 1..=alphabet.len() {
        let symbols = &alphabet[..k];
        let mut rng = StdRng::seed_from_u64(k as u64);
        let deck = Deck::shuffled(symbols, &mut rng);

        assert_eq!(deck.len(), 2 * k);
        let counts = counts(&deck);
        assert_eq!(counts.len(), k);
        assert!(counts.values().all(|c| *c == 2), "K={} dealt {:?}", k, counts);
    }
}

#[test]
fn test_shuffle_eventually_moves_cards() {
    let mut dealer = ShuffledDecks::new(Symbol::alphabet(), Some(99));
    let first = dealer.deal();
    let changed = (0..20).any(|_| dealer.deal() != first);
    assert!(changed, "twenty deals in a row came out identical");
}

#[test]
fn test_every_position_sees_several_symbols() {
    let symbols = vec![Symbol::Anchor, Symbol::Bolt, Symbol::Cube];
    let mut dealer = ShuffledDecks::new(symbols, Some(5));
    let mut seen: Vec<Vec<Symbol>> = vec![Vec::new(); 6];

    for _ in 0..200 {
        let deck = dealer.deal();
        for position in deck.positions() {
            let symbol = deck.symbol_at(position).unwrap();
            if !seen[position.index()].contains(&symbol) {
                seen[position.index()].push(symbol);
            }
        }
    }

    assert!(seen.iter().all(|s| s.len() == 3));
}

#[test]
fn test_seeded_dealers_agree() {
    let mut a = ShuffledDecks::new(Symbol::alphabet(), Some(42));
    let mut b = ShuffledDecks::new(Symbol::alphabet(), Some(42));
    for _ in 0..5 {
        assert_eq!(a.deal(), b.deal());
    }
}

#[test]
fn test_from_order_rejects_unpaired_symbol() {
    let result = Deck::from_order(vec![Symbol::Anchor, Symbol::Bolt, Symbol::Anchor]);
    assert!(matches!(result, Err(DeckError::UnpairedSymbol(Symbol::Bolt, 1))));
}

#[test]
fn test_from_order_rejects_empty() {
    assert!(matches!(Deck::from_order(Vec::new()), Err(DeckError::Empty)));
}

#[test]
fn test_symbol_at_out_of_range() {
    let deck = Deck::from_order(vec![Symbol::Leaf, Symbol::Leaf]).unwrap();
    assert_eq!(deck.symbol_at(CardPosition::new(1)).unwrap(), Symbol::Leaf);
    assert!(matches!(
        deck.symbol_at(CardPosition::new(2)),
        Err(DeckError::OutOfRange { len: 2, .. })
    ));
}
