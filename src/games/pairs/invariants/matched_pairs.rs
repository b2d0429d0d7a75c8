//! Matched pairs invariant: matched cards come in symbol pairs.

use super::super::{Session, Symbol};
use super::Invariant;
use std::collections::BTreeMap;

/// Invariant: `matched_count` equals the number of `Matched` cards, and every
/// symbol is matched either zero or two times.
pub struct MatchedPairsInvariant;

impl Invariant<Session> for MatchedPairsInvariant {
    fn holds(session: &Session) -> bool {
        let mut per_symbol: BTreeMap<Symbol, usize> = BTreeMap::new();
        for (symbol, visibility) in session.deck().symbols().iter().zip(session.visibilities()) {
            if visibility.is_matched() {
                *per_symbol.entry(*symbol).or_default() += 1;
            }
        }

        let matched: usize = per_symbol.values().sum();
        matched == session.matched_count()
            && matched <= session.total_cards()
            && per_symbol.values().all(|count| *count == 2)
    }

    fn description() -> &'static str {
        "Matched cards form complete symbol pairs and agree with matched count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pairs::{Deck, Visibility};
    use std::time::Duration;

    fn session() -> Session {
        let deck = Deck::from_order(vec![Symbol::Bolt, Symbol::Leaf, Symbol::Leaf, Symbol::Bolt])
            .unwrap();
        Session::new(0, deck, 3, Duration::from_millis(10))
    }

    #[test]
    fn test_matched_pair_holds() {
        let mut session = session();
        session.visibility[0] = Visibility::Matched;
        session.visibility[3] = Visibility::Matched;
        session.matched_count = 2;
        assert!(MatchedPairsInvariant::holds(&session));
    }

    #[test]
    fn test_mixed_symbols_violate() {
        let mut session = session();
        session.visibility[0] = Visibility::Matched;
        session.visibility[1] = Visibility::Matched;
        session.matched_count = 2;
        assert!(!MatchedPairsInvariant::holds(&session));
    }

    #[test]
    fn test_count_mismatch_violates() {
        let mut session = session();
        session.matched_count = 2;
        assert!(!MatchedPairsInvariant::holds(&session));
    }
}
