//! Pair comparison and completion.

use super::super::Symbol;
use tracing::instrument;

/// Two open cards match when they show the same symbol.
#[instrument]
pub fn is_match(first: Symbol, second: Symbol) -> bool {
    first == second
}

/// The game is over once every card is matched.
#[instrument]
pub fn is_complete(matched_count: usize, total_cards: usize) -> bool {
    total_cards > 0 && matched_count == total_cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_symbol_matches() {
        assert!(is_match(Symbol::Cube, Symbol::Cube));
        assert!(!is_match(Symbol::Cube, Symbol::Leaf));
    }

    #[test]
    fn test_complete_only_when_all_matched() {
        assert!(!is_complete(0, 16));
        assert!(!is_complete(14, 16));
        assert!(is_complete(16, 16));
        assert!(!is_complete(0, 0));
    }
}
