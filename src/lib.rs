//! Strictly Pairs library - a memory-matching card game
//!
//! The game is a single-player session state machine: a shuffled deck of
//! symbol pairs, a two-card open set, a move counter, a star rating and an
//! elapsed clock. Everything the player sees flows out through the
//! [`Presentation`] trait, and every deferred action is a cancellable
//! [`Scheduler`] task tagged with the session generation.
//!
//! # Architecture
//!
//! - **Games**: deck, clock, rules, invariants and the [`SessionController`]
//! - **Players**: automated players such as [`MemoryPlayer`]
//! - **Autoplay**: headless games in virtual time
//! - **TUI**: ratatui front end driven by tokio timers
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strictly_pairs::{
//!     CardPosition, Deck, FixedDeck, ManualScheduler, RecordingPresentation,
//!     SelectOutcome, SessionController, SessionRules, Symbol,
//! };
//!
//! let deck = Deck::from_order(vec![Symbol::Anchor, Symbol::Bolt, Symbol::Anchor, Symbol::Bolt])
//!     .unwrap();
//! let mut controller = SessionController::new(
//!     SessionRules::default(),
//!     Box::new(FixedDeck::new(deck)),
//!     RecordingPresentation::new(),
//!     ManualScheduler::new(),
//! );
//!
//! controller.select_card(CardPosition::new(0));
//! let outcome = controller.select_card(CardPosition::new(2));
//! assert!(matches!(outcome, SelectOutcome::Matched { .. }));
//! controller.advance_time(Duration::from_millis(800));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod autoplay;
mod config;
mod games;
mod players;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types
pub use games::pairs::{
    CardHandle, CardIsClosed, CardPosition, CardSelectable, ClockReading, ClockState, Contract,
    ContractViolation, Deck, DeckError, DeckSource, DisplayCommand, ElapsedClock, FiredTimer,
    FixedDeck, GameNotOver, IgnoreReason, InputEvent, ManualScheduler, Presentation,
    RecordingPresentation, Scheduler, SelectOutcome, SelectionContract, Session,
    SessionController, SessionRules, ShuffledDecks, Snapshot, StarPolicy, Summary, Symbol,
    TaskHandle, TimerEvent, Visibility, assert_transition, invariants, rules,
};

// Crate-level exports - Players
pub use players::{MemoryPlayer, Player};

// Crate-level exports - Autoplay
pub use autoplay::{AutoplayReport, autoplay};

// Crate-level exports - Terminal UI
pub use tui::{CardFace, TerminalApp, TokioScheduler, run_tui};
