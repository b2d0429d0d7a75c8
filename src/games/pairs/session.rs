//! Session state and the controller that drives it.
//!
//! A [`Session`] is the aggregate for one deal: deck, open cards, counters,
//! clock and outstanding timers. The [`SessionController`] owns exactly one
//! session at a time and replaces it wholesale on restart.

use super::action::{InputEvent, SelectOutcome};
use super::clock::{ClockReading, ClockState, ElapsedClock};
#[cfg(debug_assertions)]
use super::contracts::assert_transition;
use super::contracts::CardSelectable;
use super::deck::{Deck, DeckSource};
use super::presentation::{CardHandle, Presentation, Summary};
use super::rules::{SessionRules, is_complete, is_match};
use super::schedule::{FiredTimer, ManualScheduler, Scheduler, TaskHandle, TimerEvent};
use super::types::{CardPosition, Symbol, Visibility};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// All mutable state of one deal.
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) generation: u64,
    pub(super) deck: Deck,
    pub(super) visibility: Vec<Visibility>,
    pub(super) open: Vec<CardPosition>,
    pub(super) move_count: u32,
    pub(super) star_rating: u8,
    pub(super) max_stars: u8,
    pub(super) matched_count: usize,
    pub(super) clock: ElapsedClock,
    pub(super) clock_task: Option<TaskHandle>,
    pub(super) unreveal_tasks: Vec<(TaskHandle, Vec<CardPosition>)>,
    pub(super) summary: Option<Summary>,
}

impl Session {
    /// Creates a fresh session: all cards hidden, clock unstarted.
    #[instrument(skip(deck), fields(cards = deck.len()))]
    pub fn new(generation: u64, deck: Deck, max_stars: u8, clock_tick: Duration) -> Self {
        Self {
            generation,
            visibility: vec![Visibility::Hidden; deck.len()],
            deck,
            open: Vec::with_capacity(2),
            move_count: 0,
            star_rating: max_stars,
            max_stars,
            matched_count: 0,
            clock: ElapsedClock::new(clock_tick),
            clock_task: None,
            unreveal_tasks: Vec::new(),
            summary: None,
        }
    }

    /// Generation id; increases on every restart.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The deal.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Visibility of a card, or `None` outside the deck.
    pub fn visibility(&self, position: CardPosition) -> Option<Visibility> {
        self.visibility.get(position.index()).copied()
    }

    /// Visibility of every card in layout order.
    pub fn visibilities(&self) -> &[Visibility] {
        &self.visibility
    }

    /// Face-up cards awaiting evaluation.
    pub fn open(&self) -> &[CardPosition] {
        &self.open
    }

    /// Completed pair evaluations.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Stars left.
    pub fn star_rating(&self) -> u8 {
        self.star_rating
    }

    /// Stars at the start of the session.
    pub fn max_stars(&self) -> u8 {
        self.max_stars
    }

    /// Cards permanently matched.
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    /// Number of cards dealt.
    pub fn total_cards(&self) -> usize {
        self.deck.len()
    }

    /// The clock.
    pub fn clock(&self) -> &ElapsedClock {
        &self.clock
    }

    /// Final score, once the game is over.
    pub fn summary(&self) -> Option<Summary> {
        self.summary
    }

    /// Returns true once every pair is matched.
    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    /// Outstanding mismatch flip-backs.
    pub fn pending_unreveals(&self) -> usize {
        self.unreveal_tasks.len()
    }

    fn symbol(&self, position: CardPosition) -> Symbol {
        self.deck
            .symbol_at(position)
            .expect("position checked against the deck")
    }

    fn handle(&self, position: CardPosition) -> CardHandle {
        CardHandle {
            position,
            symbol: self.symbol(position),
        }
    }

    fn handles(&self) -> Vec<CardHandle> {
        self.deck.positions().map(|p| self.handle(p)).collect()
    }

    fn set_visibility(&mut self, position: CardPosition, visibility: Visibility) {
        self.visibility[position.index()] = visibility;
    }
}

/// Read-only view of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session generation.
    pub generation: u64,
    /// Completed pair evaluations.
    pub move_count: u32,
    /// Stars left.
    pub star_rating: u8,
    /// Clock value.
    pub elapsed: Duration,
    /// Cards permanently matched.
    pub matched_count: usize,
    /// Cards dealt.
    pub total_cards: usize,
    /// Cards open and unresolved.
    pub open: Vec<CardPosition>,
    /// Whether the game is over.
    pub finished: bool,
}

impl Snapshot {
    /// Clock value in display form.
    pub fn clock(&self) -> ClockReading {
        ClockReading::from_duration(self.elapsed)
    }
}

/// Drives one session at a time through selections, timers and restarts.
///
/// All work happens synchronously inside each call; a selection is fully
/// evaluated before the call returns.
#[derive(Debug)]
pub struct SessionController<P, S> {
    rules: SessionRules,
    deck_source: Box<dyn DeckSource>,
    presentation: P,
    scheduler: S,
    session: Session,
}

impl<P: Presentation, S: Scheduler> SessionController<P, S> {
    /// Deals the first session and paints it.
    #[instrument(skip_all)]
    pub fn new(
        rules: SessionRules,
        mut deck_source: Box<dyn DeckSource>,
        presentation: P,
        scheduler: S,
    ) -> Self {
        let deck = deck_source.deal();
        let session = Session::new(0, deck, *rules.stars().max_stars(), *rules.clock_tick());
        let mut controller = Self {
            rules,
            deck_source,
            presentation,
            scheduler,
            session,
        };
        controller.paint_fresh();
        info!(cards = controller.session.total_cards(), "Session controller ready");
        controller
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Tuning in effect.
    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    /// The presentation.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Mutable presentation access for the owning event loop.
    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Counters for initial paint or debugging.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.session.generation,
            move_count: self.session.move_count,
            star_rating: self.session.star_rating,
            elapsed: self.session.clock.elapsed(),
            matched_count: self.session.matched_count,
            total_cards: self.session.total_cards(),
            open: self.session.open.clone(),
            finished: self.session.is_finished(),
        }
    }

    /// Dispatches an input event.
    ///
    /// Returns the selection outcome for `Select` and `None` for `Restart`.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<SelectOutcome> {
        match event {
            InputEvent::Select(position) => Some(self.select_card(position)),
            InputEvent::Restart => {
                self.restart();
                None
            }
        }
    }

    /// Selects a card.
    ///
    /// Selecting an open or matched card, or any card after the game is over,
    /// is ignored without emitting anything.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the deck. Positions come from the deck
    /// the controller painted, so this is a caller bug.
    #[instrument(skip(self), fields(generation = self.session.generation, %position))]
    pub fn select_card(&mut self, position: CardPosition) -> SelectOutcome {
        assert!(
            self.session.deck.contains(position),
            "card {} is outside a deck of {} cards",
            position,
            self.session.total_cards()
        );

        if let Err(reason) = CardSelectable::check(&self.session, position) {
            debug!(%reason, "Selection ignored");
            return SelectOutcome::Ignored(reason);
        }

        #[cfg(debug_assertions)]
        let before = self.session.clone();

        if self.session.open.is_empty()
            && self.session.move_count == 0
            && self.session.clock.state() == ClockState::Unstarted
        {
            self.start_clock();
        }

        self.withdraw_unreveal(position);
        self.session.set_visibility(position, Visibility::Revealed);
        self.presentation.reveal_card(self.session.handle(position));
        self.session.open.push(position);

        let outcome = if self.session.open.len() == 2 {
            self.evaluate_pair()
        } else {
            SelectOutcome::Opened(position)
        };

        #[cfg(debug_assertions)]
        assert_transition(&before, &self.session);

        debug!(%outcome, "Selection handled");
        outcome
    }

    /// Discards the current session and deals a new one.
    ///
    /// Cancels the clock and every pending flip-back before dealing, so no
    /// timer from the old session can touch the new one. Safe to call at any
    /// point, including twice in a row.
    #[instrument(skip(self), fields(generation = self.session.generation))]
    pub fn restart(&mut self) {
        self.cancel_timers();

        let deck = self.deck_source.deal();
        let generation = self.session.generation + 1;
        self.session = Session::new(
            generation,
            deck,
            *self.rules.stars().max_stars(),
            *self.rules.clock_tick(),
        );

        self.presentation.hide_summary();
        self.paint_fresh();
        info!(generation, "Session restarted");
    }

    /// Applies a timer that came due.
    ///
    /// Timers from an earlier generation are dropped. A flip-back only hides
    /// the cards still waiting on it; a card picked again in the meantime was
    /// withdrawn from it. It never touches counters or the open set.
    #[instrument(skip(self), fields(generation = self.session.generation, handle = fired.handle.id()))]
    pub fn on_timer(&mut self, fired: FiredTimer) {
        if fired.event.generation() != self.session.generation {
            debug!(
                stale_generation = fired.event.generation(),
                "Dropping timer from an earlier session"
            );
            return;
        }

        match fired.event {
            TimerEvent::ClockTick { .. } => {
                if let Some(reading) = self.session.clock.tick() {
                    self.presentation.update_clock_display(reading);
                }
            }
            TimerEvent::Unreveal { .. } => {
                let Some(index) = self
                    .session
                    .unreveal_tasks
                    .iter()
                    .position(|(handle, _)| *handle == fired.handle)
                else {
                    debug!("Flip-back no longer pending");
                    return;
                };
                let (_, positions) = self.session.unreveal_tasks.remove(index);

                for position in positions {
                    let still_showing =
                        self.session.visibility(position) == Some(Visibility::Revealed);
                    if still_showing && !self.session.open.contains(&position) {
                        self.session.set_visibility(position, Visibility::Hidden);
                        self.presentation
                            .unreveal_card(self.session.handle(position));
                    } else {
                        debug!(%position, "Card no longer waiting to flip back");
                    }
                }
            }
        }
    }

    fn paint_fresh(&mut self) {
        let handles = self.session.handles();
        self.presentation.render_deck(&handles);
        self.presentation.update_move_counter(0);
        self.presentation.reset_star_icons();
        self.presentation
            .update_clock_display(self.session.clock.reading());
    }

    fn start_clock(&mut self) {
        if self.session.clock.start() {
            let handle = self.scheduler.schedule_repeating(
                self.session.clock.interval(),
                TimerEvent::ClockTick {
                    generation: self.session.generation,
                },
            );
            self.session.clock_task = Some(handle);
        }
    }

    fn stop_clock(&mut self) {
        self.session.clock.stop();
        if let Some(handle) = self.session.clock_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_timers(&mut self) {
        self.stop_clock();
        for (handle, _) in self.session.unreveal_tasks.drain(..) {
            self.scheduler.cancel(handle);
        }
    }

    /// Takes `position` out of any pending flip-back, cancelling the task
    /// once it has no cards left.
    fn withdraw_unreveal(&mut self, position: CardPosition) {
        let Some(index) = self
            .session
            .unreveal_tasks
            .iter()
            .position(|(_, cards)| cards.contains(&position))
        else {
            return;
        };

        let (handle, cards) = &mut self.session.unreveal_tasks[index];
        cards.retain(|card| *card != position);
        if cards.is_empty() {
            let handle = *handle;
            self.session.unreveal_tasks.remove(index);
            self.scheduler.cancel(handle);
            debug!(handle = handle.id(), "Flip-back cancelled, both cards picked again");
        }
    }

    fn evaluate_pair(&mut self) -> SelectOutcome {
        let positions = [self.session.open[0], self.session.open[1]];

        self.session.move_count += 1;
        let moves = self.session.move_count;
        self.presentation.update_move_counter(moves);

        if self
            .rules
            .stars()
            .loses_star_at(moves, self.session.star_rating)
        {
            self.session.star_rating -= 1;
            self.presentation.remove_star_icon();
            info!(moves, stars = self.session.star_rating, "Star lost");
        }

        let first = self.session.symbol(positions[0]);
        let second = self.session.symbol(positions[1]);
        self.session.open.clear();

        if !is_match(first, second) {
            let handle = self.scheduler.schedule_once(
                *self.rules.mismatch_delay(),
                TimerEvent::Unreveal {
                    generation: self.session.generation,
                    positions,
                },
            );
            self.session.unreveal_tasks.push((handle, positions.to_vec()));
            debug!(moves, "Mismatch");
            return SelectOutcome::Mismatched { positions };
        }

        for position in positions {
            self.session.set_visibility(position, Visibility::Matched);
            self.presentation.mark_matched(self.session.handle(position));
        }
        self.session.matched_count += 2;
        debug!(moves, symbol = %first, matched = self.session.matched_count, "Match");

        if is_complete(self.session.matched_count, self.session.total_cards()) {
            return self.finish(positions);
        }

        SelectOutcome::Matched {
            positions,
            symbol: first,
        }
    }

    fn finish(&mut self, positions: [CardPosition; 2]) -> SelectOutcome {
        self.cancel_timers();

        let summary = Summary {
            moves: self.session.move_count,
            stars: self.session.star_rating,
            elapsed: self.session.clock.elapsed(),
        };
        if self.session.summary.replace(summary).is_some() {
            warn!("Session finished twice");
        }
        self.presentation.show_summary(summary);
        info!(%summary, "Game complete");

        SelectOutcome::Completed { positions, summary }
    }
}

impl<P: Presentation> SessionController<P, ManualScheduler> {
    /// Advances virtual time, delivering every timer that comes due.
    ///
    /// Timers are delivered one at a time, so a cancellation made while
    /// handling one timer stops any later firing.
    #[instrument(skip(self))]
    pub fn advance_time(&mut self, by: Duration) {
        let deadline = self.scheduler.now() + by;
        while let Some(fired) = self.scheduler.pop_due(deadline) {
            self.on_timer(fired);
        }
        self.scheduler.settle(deadline);
    }
}
