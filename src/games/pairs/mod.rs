//! Memory-matching game: deck model and session state machine.

mod action;
mod clock;
mod contracts;
mod deck;
mod presentation;
mod schedule;
mod session;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{IgnoreReason, InputEvent, SelectOutcome};
pub use clock::{ClockReading, ClockState, ElapsedClock};
pub use contracts::{
    CardIsClosed, CardSelectable, Contract, ContractViolation, GameNotOver, SelectionContract,
    assert_transition,
};
pub use deck::{Deck, DeckError, DeckSource, FixedDeck, ShuffledDecks};
pub use presentation::{CardHandle, DisplayCommand, Presentation, RecordingPresentation, Summary};
pub use rules::{SessionRules, StarPolicy};
pub use schedule::{FiredTimer, ManualScheduler, Scheduler, TaskHandle, TimerEvent};
pub use session::{Session, SessionController, Snapshot};
pub use types::{CardPosition, Symbol, Visibility};
