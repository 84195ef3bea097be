use setlatro_core::*;
use std::sync::Arc;

fn populated_run(seed: u64) -> GameState {
    let catalog = Catalog::builtin();
    let mut events = EventBus::default();
    let mut state = GameState::new_run(
        Arc::clone(&catalog),
        Arc::new(GameConfig::default()),
        seed,
        &mut events,
    )
    .expect("run starts");
    let eternal = catalog.joker("J_ETERNAL_MULT").expect("known joker");
    let mut joker = eternal.instantiate(Variant::Foil, 12);
    joker.data = JokerData::Accumulated { mult: 3.0 };
    state.inventory.jokers.push(joker);
    let misprint = catalog.joker("J_MISPRINT").expect("known joker");
    state
        .inventory
        .jokers
        .push(misprint.instantiate(Variant::Basic, 4));
    let hermit = catalog.tarot("T_THE_HERMIT").expect("known tarot");
    state
        .inventory
        .add_consumable(hermit.instantiate())
        .expect("room");
    state.last_consumable = catalog.tarot("T_THE_SUN").map(|template| template.instantiate());
    state.level_up(SetType::new(3, 1), 2);
    state.board[0] = state.board[0].with_enhancement(Enhancement::Gold);
    ensure_set_on_board(&mut state);
    state
}

fn ensure_set_on_board(state: &mut GameState) {
    if find_set(&state.board).is_some() {
        return;
    }
    let (a, b) = (state.board[0].attributes, state.board[1].attributes);
    let mut wanted = [0i8; 4];
    for attr in 0..4 {
        wanted[attr] = (6 - a[attr] - b[attr]) % 3;
    }
    let position = state
        .deck
        .iter()
        .position(|card| card.attributes == wanted)
        .expect("completion is in the deck");
    std::mem::swap(&mut state.board[2], &mut state.deck[position]);
}

fn through_json(snapshot: &GameSnapshot) -> GameSnapshot {
    let text = serde_json::to_string(snapshot).expect("serializes");
    serde_json::from_str(&text).expect("deserializes")
}

fn restore(snapshot: GameSnapshot) -> Restored {
    GameState::restore(snapshot, Catalog::builtin(), Arc::new(GameConfig::default()))
        .expect("restores")
}

#[test]
fn snapshot_survives_a_json_round_trip() {
    let state = populated_run(41);
    let snapshot = state.snapshot();
    let restored = restore(through_json(&snapshot));
    assert!(restored.dropped.is_empty());
    assert_eq!(restored.state.snapshot(), snapshot);
    assert_eq!(restored.state.inventory.jokers[0].variant, Variant::Foil);
    assert_eq!(
        restored.state.inventory.jokers[0].blocks.len(),
        state.inventory.jokers[0].blocks.len()
    );
    assert_eq!(snapshot.current_blind, "Small Blind");
    assert_eq!(snapshot.blind_score_required, 300);
    assert_eq!(snapshot.jokers[0].display_badge.as_deref(), Some("+3 M"));
}

#[test]
fn restored_run_plays_identically() {
    let mut original = populated_run(42);
    let mut restored = restore(through_json(&original.snapshot())).state;
    let indices = find_set(&original.board).expect("set on board");
    let mut events = EventBus::default();
    let first = original.play_set(&indices, &mut events).expect("plays");
    let second = restored.play_set(&indices, &mut events).expect("plays");
    assert_eq!(first, second);
    assert_eq!(original.snapshot(), restored.snapshot());
}

#[test]
fn unknown_ids_are_dropped_and_reported() {
    let state = populated_run(43);
    let mut snapshot = state.snapshot();
    snapshot.jokers[1].id = "J_GONE".to_string();
    snapshot.consumables[0].id = "T_GONE".to_string();
    let restored = restore(snapshot);
    assert_eq!(restored.dropped, vec!["J_GONE".to_string(), "T_GONE".to_string()]);
    assert_eq!(restored.state.inventory.jokers.len(), 1);
    assert!(restored.state.inventory.consumables.is_empty());
}

#[test]
fn mismatched_instance_data_falls_back_to_the_template() {
    let state = populated_run(44);
    let mut snapshot = state.snapshot();
    snapshot.jokers[0].custom_data = JokerData::Countdown { hands_left: 3 };
    let restored = restore(snapshot);
    assert_eq!(
        restored.state.inventory.jokers[0].data,
        JokerData::Accumulated { mult: 0.0 }
    );
}

#[test]
fn other_schema_versions_are_rejected() {
    let state = populated_run(45);
    let mut snapshot = state.snapshot();
    snapshot.version = SAVE_SCHEMA_VERSION + 1;
    let result = GameState::restore(snapshot, Catalog::builtin(), Arc::new(GameConfig::default()));
    assert!(matches!(
        result,
        Err(SnapshotError::UnsupportedVersion { found: 2, expected: 1 })
    ));
}

#[test]
fn summary_describes_the_current_blind() {
    let state = populated_run(46);
    let summary = state.summary("abc");
    assert_eq!(summary.id, "abc");
    assert_eq!(summary.ante, 1);
    assert_eq!(summary.current_blind, "Small Blind");
    assert_eq!(summary.blind_score_required, 300);
    assert_eq!(summary.game_phase, Phase::Playing);
    assert_eq!(summary.money, state.money);
}

#[test]
fn dropped_negative_joker_takes_its_slot_along() {
    let state = populated_run(47);
    let mut snapshot = state.snapshot();
    snapshot.jokers[1].id = "J_GONE".to_string();
    snapshot.jokers[1].variant = Variant::Negative;
    snapshot.joker_slots += 1;
    let restored = restore(snapshot);
    assert_eq!(restored.dropped, vec!["J_GONE".to_string()]);
    assert_eq!(restored.state.inventory.joker_slots, state.inventory.joker_slots);
    assert_eq!(restored.state.inventory.jokers.len(), 1);
}

#[test]
fn discards_used_survive_a_round_trip() {
    let mut state = populated_run(48);
    let mut events = EventBus::default();
    state.discard(&[0, 1], &mut events).expect("discards");
    let restored = restore(through_json(&state.snapshot()));
    assert_eq!(restored.state.discards_used, 1);
}
