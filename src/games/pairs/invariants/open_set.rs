//! Open set invariant: at most two unresolved cards, all face up.

use super::super::{Session, Visibility};
use super::Invariant;

/// Invariant: the open set never exceeds two cards.
///
/// Every open card is `Revealed` (never `Matched`) and appears once.
pub struct OpenSetInvariant;

impl Invariant<Session> for OpenSetInvariant {
    fn holds(session: &Session) -> bool {
        let open = session.open();
        if open.len() > 2 {
            return false;
        }
        if open.len() == 2 && open[0] == open[1] {
            return false;
        }
        open.iter()
            .all(|p| session.visibility(*p) == Some(Visibility::Revealed))
    }

    fn description() -> &'static str {
        "Open set holds at most two distinct revealed cards"
    }
}
