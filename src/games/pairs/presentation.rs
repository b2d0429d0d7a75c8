//! Boundary between the session and whatever paints it.
//!
//! The session emits commands through [`Presentation`] and never reads
//! anything back. Presentations are free to ignore commands they cannot show.

use super::clock::ClockReading;
use super::types::{CardPosition, Symbol};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a presentation needs to paint one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardHandle {
    /// Stable position in the deck.
    pub position: CardPosition,
    /// Face shown when revealed.
    pub symbol: Symbol,
}

/// Final score of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Completed pair evaluations.
    pub moves: u32,
    /// Stars left.
    pub stars: u8,
    /// Clock value when the last pair matched.
    pub elapsed: Duration,
}

impl Summary {
    /// Elapsed time in display form.
    pub fn clock(&self) -> ClockReading {
        ClockReading::from_duration(self.elapsed)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} moves, {} stars, {}",
            self.moves,
            self.stars,
            self.clock()
        )
    }
}

/// Display operations the session drives.
pub trait Presentation {
    /// Paints a fresh, all-hidden deck in layout order.
    fn render_deck(&mut self, cards: &[CardHandle]);

    /// Shows a card's face.
    fn reveal_card(&mut self, card: CardHandle);

    /// Turns a card face down again.
    fn unreveal_card(&mut self, card: CardHandle);

    /// Locks a card face up.
    fn mark_matched(&mut self, card: CardHandle);

    /// Shows the move counter.
    fn update_move_counter(&mut self, moves: u32);

    /// Removes one star icon.
    fn remove_star_icon(&mut self);

    /// Restores the full row of star icons.
    fn reset_star_icons(&mut self);

    /// Shows the elapsed clock.
    fn update_clock_display(&mut self, reading: ClockReading);

    /// Shows the end-of-game summary.
    fn show_summary(&mut self, summary: Summary);

    /// Hides the end-of-game summary.
    fn hide_summary(&mut self);
}

/// One emitted presentation command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// See [`Presentation::render_deck`].
    RenderDeck {
        /// Cards in layout order.
        cards: Vec<CardHandle>,
    },
    /// See [`Presentation::reveal_card`].
    Reveal {
        /// Target card.
        card: CardHandle,
    },
    /// See [`Presentation::unreveal_card`].
    Unreveal {
        /// Target card.
        card: CardHandle,
    },
    /// See [`Presentation::mark_matched`].
    MarkMatched {
        /// Target card.
        card: CardHandle,
    },
    /// See [`Presentation::update_move_counter`].
    MoveCounter {
        /// New value.
        moves: u32,
    },
    /// See [`Presentation::remove_star_icon`].
    RemoveStar,
    /// See [`Presentation::reset_star_icons`].
    ResetStars,
    /// See [`Presentation::update_clock_display`].
    Clock {
        /// New reading.
        reading: ClockReading,
    },
    /// See [`Presentation::show_summary`].
    ShowSummary {
        /// Final score.
        summary: Summary,
    },
    /// See [`Presentation::hide_summary`].
    HideSummary,
}

/// Presentation that records every command it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    commands: Vec<DisplayCommand>,
}

impl RecordingPresentation {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&mut self) -> Vec<DisplayCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clock updates are noisy; this filters them out.
    pub fn without_clock(&self) -> Vec<DisplayCommand> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DisplayCommand::Clock { .. }))
            .cloned()
            .collect()
    }

    /// Summaries shown so far.
    pub fn summaries(&self) -> Vec<Summary> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DisplayCommand::ShowSummary { summary } => Some(*summary),
                _ => None,
            })
            .collect()
    }
}

impl Presentation for RecordingPresentation {
    fn render_deck(&mut self, cards: &[CardHandle]) {
        self.commands.push(DisplayCommand::RenderDeck {
            cards: cards.to_vec(),
        });
    }

    fn reveal_card(&mut self, card: CardHandle) {
        self.commands.push(DisplayCommand::Reveal { card });
    }

    fn unreveal_card(&mut self, card: CardHandle) {
        self.commands.push(DisplayCommand::Unreveal { card });
    }

    fn mark_matched(&mut self, card: CardHandle) {
        self.commands.push(DisplayCommand::MarkMatched { card });
    }

    fn update_move_counter(&mut self, moves: u32) {
        self.commands.push(DisplayCommand::MoveCounter { moves });
    }

    fn remove_star_icon(&mut self) {
        self.commands.push(DisplayCommand::RemoveStar);
    }

    fn reset_star_icons(&mut self) {
        self.commands.push(DisplayCommand::ResetStars);
    }

    fn update_clock_display(&mut self, reading: ClockReading) {
        self.commands.push(DisplayCommand::Clock { reading });
    }

    fn show_summary(&mut self, summary: Summary) {
        self.commands.push(DisplayCommand::ShowSummary { summary });
    }

    fn hide_summary(&mut self) {
        self.commands.push(DisplayCommand::HideSummary);
    }
}
