//! Core domain types for the memory-matching game.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A card face. Two cards sharing a symbol form a matching pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum Symbol {
    /// Diamond.
    Diamond,
    /// Paper plane.
    PaperPlane,
    /// Anchor.
    Anchor,
    /// Lightning bolt.
    Bolt,
    /// Cube.
    Cube,
    /// Leaf.
    Leaf,
    /// Bicycle.
    Bicycle,
    /// Bomb.
    Bomb,
}

impl Symbol {
    /// The full alphabet dealt in a standard game.
    #[instrument]
    pub fn alphabet() -> Vec<Symbol> {
        Symbol::iter().collect()
    }

    /// Short label used when a card is drawn face-up.
    pub fn label(self) -> &'static str {
        match self {
            Symbol::Diamond => "diamond",
            Symbol::PaperPlane => "plane",
            Symbol::Anchor => "anchor",
            Symbol::Bolt => "bolt",
            Symbol::Cube => "cube",
            Symbol::Leaf => "leaf",
            Symbol::Bicycle => "bicycle",
            Symbol::Bomb => "bomb",
        }
    }

    /// Single glyph for compact rendering.
    pub fn glyph(self) -> char {
        match self {
            Symbol::Diamond => '◆',
            Symbol::PaperPlane => '✈',
            Symbol::Anchor => '⚓',
            Symbol::Bolt => '⚡',
            Symbol::Cube => '■',
            Symbol::Leaf => '♣',
            Symbol::Bicycle => '∞',
            Symbol::Bomb => '●',
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Stable index of a card within its deck.
///
/// Positions are assigned when the deck is dealt and never change for the
/// lifetime of that deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardPosition(usize);

impl CardPosition {
    /// Creates a position from a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for CardPosition {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for CardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visibility of a single card.
///
/// `Hidden -> Revealed -> Hidden` on a mismatch (after the display delay),
/// `Hidden -> Revealed -> Matched` on a match. `Matched` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Face down.
    #[default]
    Hidden,
    /// Face up, either open or waiting to be flipped back.
    Revealed,
    /// Permanently face up.
    Matched,
}

impl Visibility {
    /// Returns true once the card can no longer change.
    pub fn is_matched(self) -> bool {
        matches!(self, Visibility::Matched)
    }
}
