//! Tests for headless games played by the memory player.

use std::time::Duration;
use strictly_pairs::{
    CardPosition, Deck, DisplayCommand, FixedDeck, GameConfig, ManualScheduler, MemoryPlayer,
    Player, RecordingPresentation, SelectOutcome, SessionController, SessionRules, Symbol,
    autoplay,
};

#[test]
fn test_memory_player_finishes_game() {
    let config = GameConfig::default().with_seed(Some(1));
    let mut player = MemoryPlayer::new("Memory");
    let report = autoplay(&config, &mut player);

    let summary = report.summary.expect("game should finish");
    assert!(report.snapshot.finished);
    assert_eq!(report.snapshot.matched_count, 16);
    assert_eq!(summary.moves, report.snapshot.move_count);
    assert!(summary.moves >= 8);
    assert_eq!(report.player, "Memory");
}

#[test]
fn test_memory_player_never_wastes_a_known_pair() {
    // Each mismatch uncovers two unseen cards, so at most eight of them.
    for seed in 0..10 {
        let config = GameConfig::default().with_seed(Some(seed));
        let mut player = MemoryPlayer::new("Memory");
        let report = autoplay(&config, &mut player);
        let summary = report.summary.expect("game should finish");
        assert!(summary.moves <= 16, "seed {} took {} moves", seed, summary.moves);
    }
}

#[test]
fn test_report_emits_exactly_one_summary() {
    let config = GameConfig::default().with_seed(Some(3));
    let mut player = MemoryPlayer::new("Memory");
    let report = autoplay(&config, &mut player);

    let summaries = report
        .commands
        .iter()
        .filter(|c| matches!(c, DisplayCommand::ShowSummary { .. }))
        .count();
    assert_eq!(summaries, 1);
    assert!(
        report
            .commands
            .iter()
            .all(|c| !matches!(c, DisplayCommand::Clock { .. }))
    );
}

#[test]
fn test_report_serializes_to_json() {
    let config = GameConfig::default().with_seed(Some(4));
    let mut player = MemoryPlayer::new("Memory");
    let report = autoplay(&config, &mut player);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["player"], "Memory");
    assert_eq!(json["snapshot"]["finished"], true);
    assert_eq!(json["commands"][0]["command"], "render_deck");
}

#[test]
fn test_memory_player_uses_what_it_saw() {
    let deck = Deck::from_order(vec![Symbol::Anchor, Symbol::Bolt, Symbol::Anchor, Symbol::Bolt])
        .unwrap();
    let mut controller = SessionController::new(
        SessionRules::default(),
        Box::new(FixedDeck::new(deck)),
        RecordingPresentation::new(),
        ManualScheduler::new(),
    );
    let mut player = MemoryPlayer::new("Memory");

    controller.select_card(CardPosition::new(0));
    controller.select_card(CardPosition::new(1));
    player.observe(controller.session());
    controller.advance_time(Duration::from_secs(1));
    assert_eq!(player.remembered(), 2);

    let first = player.choose(controller.session()).unwrap();
    assert_eq!(first, CardPosition::new(2));
    controller.select_card(first);
    player.observe(controller.session());

    let second = player.choose(controller.session()).unwrap();
    assert_eq!(second, CardPosition::new(0));
    assert!(matches!(
        controller.select_card(second),
        SelectOutcome::Matched { .. }
    ));

    player.observe(controller.session());
    assert_eq!(player.choose(controller.session()), Some(CardPosition::new(3)));
}

#[test]
fn test_memory_player_forgets_on_restart() {
    let config = GameConfig::default().with_seed(Some(6));
    let mut controller = SessionController::new(
        config.rules(),
        config.deck_source(),
        RecordingPresentation::new(),
        ManualScheduler::new(),
    );
    let mut player = MemoryPlayer::new("Memory");

    controller.select_card(CardPosition::new(0));
    player.observe(controller.session());
    assert_eq!(player.remembered(), 1);

    controller.restart();
    player.observe(controller.session());
    assert_eq!(player.remembered(), 0);
}
