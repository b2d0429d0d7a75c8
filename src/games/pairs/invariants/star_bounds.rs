//! Star bounds invariant.

use super::super::Session;
use super::Invariant;

/// Invariant: the star rating never exceeds the starting rating.
pub struct StarBoundsInvariant;

impl Invariant<Session> for StarBoundsInvariant {
    fn holds(session: &Session) -> bool {
        session.star_rating() <= session.max_stars()
    }

    fn description() -> &'static str {
        "Star rating stays within [0, max_stars]"
    }
}
