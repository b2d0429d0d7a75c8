//! Input events and selection outcomes.
//!
//! Selections are domain events: the controller decides what they mean and
//! reports the decision back as a [`SelectOutcome`].

use super::presentation::Summary;
use super::types::{CardPosition, Symbol};
use serde::{Deserialize, Serialize};

/// Input accepted by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A card was clicked or chosen.
    Select(CardPosition),
    /// Start over with a fresh deck.
    Restart,
}

/// Why a selection had no effect.
///
/// Ignored selections are not errors: nothing changes and nothing is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoreReason {
    /// The card is already open and awaiting its partner.
    #[display("Card {} is already open", _0)]
    AlreadyOpen(CardPosition),

    /// The card has been matched.
    #[display("Card {} is already matched", _0)]
    AlreadyMatched(CardPosition),

    /// Every pair has been found.
    #[display("Game is already over")]
    GameOver,
}

/// Result of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Nothing happened.
    Ignored(IgnoreReason),
    /// First card of a pair is face up.
    Opened(CardPosition),
    /// The two open cards matched.
    Matched {
        /// The matched cards, in selection order.
        positions: [CardPosition; 2],
        /// Their shared symbol.
        symbol: Symbol,
    },
    /// The two open cards differ and will be flipped back.
    Mismatched {
        /// The mismatched cards, in selection order.
        positions: [CardPosition; 2],
    },
    /// The last pair matched.
    Completed {
        /// The final matched cards.
        positions: [CardPosition; 2],
        /// Final score.
        summary: Summary,
    },
}

impl SelectOutcome {
    /// Returns true if the selection changed anything.
    pub fn is_ignored(&self) -> bool {
        matches!(self, SelectOutcome::Ignored(_))
    }

    /// Returns true if this selection completed a pair evaluation.
    pub fn evaluated_pair(&self) -> bool {
        matches!(
            self,
            SelectOutcome::Matched { .. }
                | SelectOutcome::Mismatched { .. }
                | SelectOutcome::Completed { .. }
        )
    }
}

impl std::fmt::Display for SelectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectOutcome::Ignored(reason) => write!(f, "Ignored: {}", reason),
            SelectOutcome::Opened(position) => write!(f, "Opened {}", position),
            SelectOutcome::Matched { positions, symbol } => {
                write!(f, "Matched {} and {} ({})", positions[0], positions[1], symbol)
            }
            SelectOutcome::Mismatched { positions } => {
                write!(f, "No match: {} and {}", positions[0], positions[1])
            }
            SelectOutcome::Completed { summary, .. } => write!(f, "Completed in {}", summary),
        }
    }
}
