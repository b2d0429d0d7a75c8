//! Player with perfect recall of every face it has seen.

use super::Player;
use crate::games::pairs::{CardPosition, Session, Symbol, Visibility};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Remembers every face it has seen and never forgets.
///
/// Plays a known pair when one exists, otherwise turns over a card it has
/// not seen yet. The second card of a turn is the known partner when there
/// is one.
#[derive(Debug, Clone)]
pub struct MemoryPlayer {
    name: String,
    seen: BTreeMap<CardPosition, Symbol>,
    generation: Option<u64>,
}

impl MemoryPlayer {
    /// Creates a player with an empty memory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seen: BTreeMap::new(),
            generation: None,
        }
    }

    /// Number of cards remembered and not yet matched.
    pub fn remembered(&self) -> usize {
        self.seen.len()
    }

    fn forget_if_new_deal(&mut self, session: &Session) {
        if self.generation != Some(session.generation()) {
            self.seen.clear();
            self.generation = Some(session.generation());
        }
    }

    fn known_partner(&self, position: CardPosition, symbol: Symbol) -> Option<CardPosition> {
        self.seen
            .iter()
            .find(|(p, s)| **p != position && **s == symbol)
            .map(|(p, _)| *p)
    }

    fn known_pair(&self, session: &Session) -> Option<CardPosition> {
        self.seen
            .iter()
            .filter(|(p, _)| !session.open().contains(p))
            .find(|(p, s)| self.known_partner(**p, **s).is_some())
            .map(|(p, _)| *p)
    }

    fn unseen(&self, session: &Session, except: Option<CardPosition>) -> Option<CardPosition> {
        selectable(session)
            .filter(|p| Some(*p) != except)
            .find(|p| !self.seen.contains_key(p))
    }
}

fn selectable(session: &Session) -> impl Iterator<Item = CardPosition> + '_ {
    session.deck().positions().filter(move |p| {
        session.visibility(*p) != Some(Visibility::Matched) && !session.open().contains(p)
    })
}

impl Player for MemoryPlayer {
    #[instrument(skip_all, fields(player = %self.name))]
    fn choose(&mut self, session: &Session) -> Option<CardPosition> {
        self.forget_if_new_deal(session);
        if session.is_finished() {
            return None;
        }

        let choice = match session.open() {
            [first] => {
                let symbol = session.deck().symbol_at(*first).ok()?;
                self.known_partner(*first, symbol)
                    .or_else(|| self.unseen(session, Some(*first)))
            }
            _ => self.known_pair(session).or_else(|| self.unseen(session, None)),
        };

        let choice = choice.or_else(|| selectable(session).next());
        debug!(?choice, remembered = self.seen.len(), "Chose card");
        choice
    }

    fn observe(&mut self, session: &Session) {
        self.forget_if_new_deal(session);
        for position in session.deck().positions() {
            match session.visibility(position) {
                Some(Visibility::Matched) => {
                    self.seen.remove(&position);
                }
                Some(Visibility::Revealed) => {
                    if let Ok(symbol) = session.deck().symbol_at(position) {
                        self.seen.insert(position, symbol);
                    }
                }
                _ => {}
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
