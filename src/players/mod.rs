//! Automated players.

mod memory;

pub use memory::MemoryPlayer;

use crate::games::pairs::{CardPosition, Session};

/// Something that picks the next card to turn over.
pub trait Player {
    /// Picks a selectable card, or `None` when nothing is left to pick.
    fn choose(&mut self, session: &Session) -> Option<CardPosition>;

    /// Learns from the session after a selection was applied.
    fn observe(&mut self, session: &Session);

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
