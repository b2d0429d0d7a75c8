//! Contract-based validation for card selection.
//!
//! Preconditions decide whether a selection is accepted at all.
//! Postconditions compare the session before and after an accepted
//! selection and are checked in debug builds only.

use super::action::IgnoreReason;
use super::invariants::{InvariantSet, PairsInvariants};
use super::session::Session;
use super::types::{CardPosition, Visibility};
use tracing::{instrument, warn};

/// A contract over a state transition.
pub trait Contract<S, A> {
    /// Error reported when a precondition fails.
    type Rejection;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Rejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ContractViolation>;
}

/// A postcondition or invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Contract violated: {}", _0)]
pub struct ContractViolation(pub String);

impl std::error::Error for ContractViolation {}

// ─────────────────────────────────────────────────────────────
//  Selection Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is still running.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects selections once every pair is matched.
    pub fn check(session: &Session) -> Result<(), IgnoreReason> {
        if session.is_finished() {
            Err(IgnoreReason::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the card is neither matched nor already open.
pub struct CardIsClosed;

impl CardIsClosed {
    /// Rejects matched and open cards.
    pub fn check(session: &Session, position: CardPosition) -> Result<(), IgnoreReason> {
        if session.visibility(position) == Some(Visibility::Matched) {
            return Err(IgnoreReason::AlreadyMatched(position));
        }
        if session.open().contains(&position) {
            return Err(IgnoreReason::AlreadyOpen(position));
        }
        Ok(())
    }
}

/// Composite precondition for a selection.
pub struct CardSelectable;

impl CardSelectable {
    /// Validates all preconditions for selecting `position`.
    #[instrument(skip(session), fields(generation = session.generation()))]
    pub fn check(session: &Session, position: CardPosition) -> Result<(), IgnoreReason> {
        GameNotOver::check(session)?;
        CardIsClosed::check(session, position)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Selection Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for card selection.
///
/// Postconditions:
/// - Move count grows by at most one
/// - Stars never increase
/// - Matched cards stay matched and the matched count never drops
/// - All session invariants hold
pub struct SelectionContract;

impl Contract<Session, CardPosition> for SelectionContract {
    type Rejection = IgnoreReason;

    fn pre(session: &Session, position: &CardPosition) -> Result<(), IgnoreReason> {
        CardSelectable::check(session, *position)
    }

    fn post(before: &Session, after: &Session) -> Result<(), ContractViolation> {
        if after.generation() != before.generation() {
            return Err(ContractViolation(
                "selection changed the session generation".to_string(),
            ));
        }
        if after.move_count() < before.move_count()
            || after.move_count() > before.move_count() + 1
        {
            return Err(ContractViolation(format!(
                "move count went from {} to {}",
                before.move_count(),
                after.move_count()
            )));
        }
        if after.star_rating() > before.star_rating() {
            return Err(ContractViolation(format!(
                "stars went up from {} to {}",
                before.star_rating(),
                after.star_rating()
            )));
        }
        if after.matched_count() < before.matched_count() {
            return Err(ContractViolation("matched count dropped".to_string()));
        }
        let unmatched = before
            .visibilities()
            .iter()
            .zip(after.visibilities())
            .any(|(b, a)| b.is_matched() && !a.is_matched());
        if unmatched {
            return Err(ContractViolation("a matched card left Matched".to_string()));
        }

        PairsInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ContractViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Panics if a selection broke its postconditions.
#[instrument(skip_all)]
pub fn assert_transition(before: &Session, after: &Session) {
    if let Err(violation) = SelectionContract::post(before, after) {
        warn!(%violation, "Selection contract violated");
        panic!("{}", violation);
    }
}
