//! Terminal-side view state painted by the session.

use super::input::GRID_COLUMNS;
use crate::games::pairs::{
    CardHandle, CardPosition, ClockReading, Presentation, Summary, Symbol, Visibility,
};
use tracing::debug;

/// One card as the terminal shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFace {
    /// Face shown when revealed.
    pub symbol: Symbol,
    /// Current state.
    pub visibility: Visibility,
}

/// Main application state.
///
/// Holds only what the session told it to show plus the keyboard cursor.
/// Game decisions never read from here.
#[derive(Debug, Clone)]
pub struct TerminalApp {
    cards: Vec<CardFace>,
    moves: u32,
    stars: u8,
    max_stars: u8,
    clock: ClockReading,
    summary: Option<Summary>,
    cursor: usize,
    status_message: String,
}

impl TerminalApp {
    /// Creates an empty view with `max_stars` star icons.
    pub fn new(max_stars: u8) -> Self {
        Self {
            cards: Vec::new(),
            moves: 0,
            stars: max_stars,
            max_stars,
            clock: ClockReading::default(),
            summary: None,
            cursor: 0,
            status_message: "Pick a card".to_string(),
        }
    }

    /// Cards in layout order.
    pub fn cards(&self) -> &[CardFace] {
        &self.cards
    }

    /// Move counter.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Star icons shown.
    pub fn stars(&self) -> u8 {
        self.stars
    }

    /// Star icons at the start of a game.
    pub fn max_stars(&self) -> u8 {
        self.max_stars
    }

    /// Clock display.
    pub fn clock(&self) -> ClockReading {
        self.clock
    }

    /// The summary overlay, when visible.
    pub fn summary(&self) -> Option<Summary> {
        self.summary
    }

    /// Cursor index into the grid.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Card under the cursor.
    pub fn cursor_position(&self) -> CardPosition {
        CardPosition::new(self.cursor)
    }

    /// Moves the cursor to `index` if it is on the grid.
    pub fn set_cursor(&mut self, index: usize) {
        if index < self.cards.len() {
            self.cursor = index;
        }
    }

    /// Grid width in cards.
    pub fn columns(&self) -> usize {
        GRID_COLUMNS
    }

    /// Status line text.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Replaces the status line.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    fn set_face(&mut self, card: CardHandle, visibility: Visibility) {
        match self.cards.get_mut(card.position.index()) {
            Some(face) => face.visibility = visibility,
            None => debug!(position = %card.position, "Command for a card not on screen"),
        }
    }
}

impl Presentation for TerminalApp {
    fn render_deck(&mut self, cards: &[CardHandle]) {
        self.cards = cards
            .iter()
            .map(|card| CardFace {
                symbol: card.symbol,
                visibility: Visibility::Hidden,
            })
            .collect();
        self.cursor = 0;
        self.status_message = "Pick a card".to_string();
    }

    fn reveal_card(&mut self, card: CardHandle) {
        self.set_face(card, Visibility::Revealed);
    }

    fn unreveal_card(&mut self, card: CardHandle) {
        self.set_face(card, Visibility::Hidden);
    }

    fn mark_matched(&mut self, card: CardHandle) {
        self.set_face(card, Visibility::Matched);
        self.status_message = format!("Found the {} pair", card.symbol);
    }

    fn update_move_counter(&mut self, moves: u32) {
        self.moves = moves;
    }

    fn remove_star_icon(&mut self) {
        self.stars = self.stars.saturating_sub(1);
    }

    fn reset_star_icons(&mut self) {
        self.stars = self.max_stars;
    }

    fn update_clock_display(&mut self, reading: ClockReading) {
        self.clock = reading;
    }

    fn show_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
        self.status_message = "Press 'r' to play again or 'q' to quit".to_string();
    }

    fn hide_summary(&mut self) {
        self.summary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(index: usize, symbol: Symbol) -> CardHandle {
        CardHandle {
            position: CardPosition::new(index),
            symbol,
        }
    }

    #[test]
    fn test_render_deck_hides_everything() {
        let mut app = TerminalApp::new(3);
        app.render_deck(&[handle(0, Symbol::Bolt), handle(1, Symbol::Bolt)]);
        assert_eq!(app.cards().len(), 2);
        assert!(app.cards().iter().all(|c| c.visibility == Visibility::Hidden));
    }

    #[test]
    fn test_card_commands_update_faces() {
        let mut app = TerminalApp::new(3);
        app.render_deck(&[handle(0, Symbol::Leaf), handle(1, Symbol::Leaf)]);
        app.reveal_card(handle(0, Symbol::Leaf));
        assert_eq!(app.cards()[0].visibility, Visibility::Revealed);
        app.unreveal_card(handle(0, Symbol::Leaf));
        assert_eq!(app.cards()[0].visibility, Visibility::Hidden);
        app.mark_matched(handle(1, Symbol::Leaf));
        assert_eq!(app.cards()[1].visibility, Visibility::Matched);
    }

    #[test]
    fn test_star_icons() {
        let mut app = TerminalApp::new(3);
        app.remove_star_icon();
        app.remove_star_icon();
        assert_eq!(app.stars(), 1);
        app.reset_star_icons();
        assert_eq!(app.stars(), 3);
    }

    #[test]
    fn test_summary_overlay() {
        let mut app = TerminalApp::new(3);
        let summary = Summary {
            moves: 8,
            stars: 3,
            elapsed: std::time::Duration::from_secs(5),
        };
        app.show_summary(summary);
        assert_eq!(app.summary(), Some(summary));
        app.hide_summary();
        assert_eq!(app.summary(), None);
    }
}
