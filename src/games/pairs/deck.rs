//! Deck model: card identities, shuffled layout and position lookup.
//!
//! The deck knows nothing about game rules. It is built once per session and
//! replaced wholesale when the session restarts.

use super::types::{CardPosition, Symbol};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Error raised by deck construction or lookup.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DeckError {
    /// Position outside `[0, len)`.
    #[display("Position {} is outside a deck of {} cards", position, len)]
    OutOfRange {
        /// The requested position.
        position: CardPosition,
        /// Number of cards in the deck.
        len: usize,
    },

    /// A symbol does not appear exactly twice.
    #[display("Symbol {} appears {} times, expected 2", _0, _1)]
    UnpairedSymbol(Symbol, usize),

    /// A deck needs at least one pair.
    #[display("Deck has no cards")]
    Empty,
}

impl std::error::Error for DeckError {}

/// An ordered sequence of cards holding every symbol exactly twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Symbol>,
}

impl Deck {
    /// Duplicates each symbol and applies a Fisher-Yates shuffle.
    ///
    /// For `i` from `len - 1` down to `1`, card `i` is swapped with a card
    /// drawn uniformly from `[0, i]`, giving every ordering equal probability
    /// for a uniform `rng`.
    #[instrument(skip(rng), fields(pairs = symbols.len()))]
    pub fn shuffled<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Self {
        debug_assert!(!symbols.is_empty(), "alphabet must not be empty");
        debug_assert!(
            symbols
                .iter()
                .enumerate()
                .all(|(i, s)| !symbols[..i].contains(s)),
            "alphabet must not repeat symbols"
        );

        let mut cards: Vec<Symbol> = symbols.iter().chain(symbols.iter()).copied().collect();
        for i in (1..cards.len()).rev() {
            let j = rng.random_range(0..=i);
            cards.swap(i, j);
        }

        debug!(cards = cards.len(), "Dealt shuffled deck");
        Self { cards }
    }

    /// Builds a deck in a fixed order, checking the pairing invariant.
    #[instrument]
    pub fn from_order(cards: Vec<Symbol>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for symbol in &cards {
            *counts.entry(*symbol).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.into_iter().find(|(_, count)| *count != 2) {
            return Err(DeckError::UnpairedSymbol(symbol, count));
        }

        Ok(Self { cards })
    }

    /// Looks up the symbol at a position.
    pub fn symbol_at(&self, position: CardPosition) -> Result<Symbol, DeckError> {
        self.cards
            .get(position.index())
            .copied()
            .ok_or(DeckError::OutOfRange {
                position,
                len: self.cards.len(),
            })
    }

    /// Returns true if the position addresses a card in this deck.
    pub fn contains(&self, position: CardPosition) -> bool {
        position.index() < self.cards.len()
    }

    /// Number of cards (always `2K`).
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the deck has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All positions in layout order.
    pub fn positions(&self) -> impl Iterator<Item = CardPosition> + '_ {
        (0..self.cards.len()).map(CardPosition::new)
    }

    /// Cards in layout order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.cards
    }
}

/// Supplies a deck for each new session.
pub trait DeckSource: std::fmt::Debug {
    /// Deals the deck for the next session.
    fn deal(&mut self) -> Deck;
}

/// Deals freshly shuffled decks from a fixed alphabet.
pub struct ShuffledDecks {
    symbols: Vec<Symbol>,
    rng: StdRng,
}

impl ShuffledDecks {
    /// Creates a dealer. A seed makes the sequence of decks reproducible.
    #[instrument(skip(symbols), fields(pairs = symbols.len()))]
    pub fn new(symbols: Vec<Symbol>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { symbols, rng }
    }
}

impl std::fmt::Debug for ShuffledDecks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShuffledDecks")
            .field("symbols", &self.symbols)
            .finish_non_exhaustive()
    }
}

impl DeckSource for ShuffledDecks {
    fn deal(&mut self) -> Deck {
        Deck::shuffled(&self.symbols, &mut self.rng)
    }
}

/// Deals the same deck every time.
#[derive(Debug, Clone)]
pub struct FixedDeck {
    deck: Deck,
}

impl FixedDeck {
    /// Wraps a deck to be replayed on every deal.
    pub fn new(deck: Deck) -> Self {
        Self { deck }
    }
}

impl DeckSource for FixedDeck {
    fn deal(&mut self) -> Deck {
        self.deck.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffled_deck_pairs_every_symbol() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::shuffled(&Symbol::alphabet(), &mut rng);
        assert_eq!(deck.len(), 16);
        assert!(Deck::from_order(deck.symbols().to_vec()).is_ok());
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = ShuffledDecks::new(Symbol::alphabet(), Some(3)).deal();
        let b = ShuffledDecks::new(Symbol::alphabet(), Some(3)).deal();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_order_rejects_unpaired() {
        let result = Deck::from_order(vec![Symbol::Bolt, Symbol::Bolt, Symbol::Cube]);
        assert_eq!(result, Err(DeckError::UnpairedSymbol(Symbol::Cube, 1)));
    }

    #[test]
    fn test_from_order_rejects_empty() {
        assert_eq!(Deck::from_order(Vec::new()), Err(DeckError::Empty));
    }

    #[test]
    fn test_symbol_at_out_of_range() {
        let deck = Deck::from_order(vec![Symbol::Leaf, Symbol::Leaf]).unwrap();
        assert_eq!(deck.symbol_at(CardPosition::new(1)), Ok(Symbol::Leaf));
        assert!(matches!(
            deck.symbol_at(CardPosition::new(2)),
            Err(DeckError::OutOfRange { len: 2, .. })
        ));
    }

    #[test]
    fn test_single_pair_shuffle() {
        let mut rng = StdRng::seed_from_u64(1);
        let deck = Deck::shuffled(&[Symbol::Anchor], &mut rng);
        assert_eq!(deck.symbols(), &[Symbol::Anchor, Symbol::Anchor]);
    }
}
