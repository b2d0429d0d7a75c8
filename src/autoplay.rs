//! Headless games driven by an automated player in virtual time.

use crate::config::GameConfig;
use crate::games::pairs::{
    DisplayCommand, ManualScheduler, RecordingPresentation, SelectOutcome, SessionController,
    Snapshot, Summary,
};
use crate::players::Player;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Virtual time between two selections.
const THINK_TIME: Duration = Duration::from_millis(1000);

/// Selections after which a game is abandoned.
const SELECTION_LIMIT: usize = 10_000;

/// How an automated game went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayReport {
    /// Name of the player.
    pub player: String,
    /// Final score, if the game was finished.
    pub summary: Option<Summary>,
    /// Counters when play stopped.
    pub snapshot: Snapshot,
    /// Selections made, including ignored ones.
    pub selections: usize,
    /// Presentation commands emitted, clock updates excluded.
    pub commands: Vec<DisplayCommand>,
}

/// Plays one game to completion with `player`.
///
/// Time is virtual: each selection is followed by one second of timers, so
/// mismatched pairs always flip back before the next turn.
#[instrument(skip_all, fields(player = player.name()))]
pub fn autoplay(config: &GameConfig, player: &mut dyn Player) -> AutoplayReport {
    let mut controller = SessionController::new(
        config.rules(),
        config.deck_source(),
        RecordingPresentation::new(),
        ManualScheduler::new(),
    );
    info!(cards = controller.session().total_cards(), "Autoplay started");

    let mut selections = 0;
    while !controller.session().is_finished() && selections < SELECTION_LIMIT {
        player.observe(controller.session());
        let Some(position) = player.choose(controller.session()) else {
            warn!("Player had no card to choose");
            break;
        };

        let outcome = controller.select_card(position);
        selections += 1;
        debug!(%outcome, selections, "Autoplay selection");

        player.observe(controller.session());
        if matches!(outcome, SelectOutcome::Mismatched { .. } | SelectOutcome::Opened(_)) {
            controller.advance_time(THINK_TIME);
        }
    }

    let snapshot = controller.snapshot();
    let summary = controller.session().summary();
    info!(?summary, selections, "Autoplay finished");

    AutoplayReport {
        player: player.name().to_string(),
        summary,
        snapshot,
        selections,
        commands: controller.presentation().without_clock(),
    }
}
