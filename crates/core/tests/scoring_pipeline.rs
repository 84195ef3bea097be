use setlatro_core::*;
use std::sync::Arc;

fn state_with(ids: &[&str], seed: u64) -> GameState {
    let catalog = Catalog::builtin();
    let mut events = EventBus::default();
    let mut state = GameState::new_run(
        Arc::clone(&catalog),
        Arc::new(GameConfig::default()),
        seed,
        &mut events,
    )
    .expect("run starts");
    state.inventory.joker_slots = ids.len().max(5);
    for id in ids {
        let template = catalog.joker(id).expect("known joker");
        state.inventory.jokers.push(template.instantiate(Variant::Basic, 4));
    }
    state
}

/// Three cards differing only in colour: red, purple, green.
fn colour_ladder() -> Vec<Card> {
    vec![
        Card::new([RED, 0, 0, 0]),
        Card::new([PURPLE, 0, 0, 0]),
        Card::new([GREEN, 0, 0, 0]),
    ]
}

fn score(state: &mut GameState, cards: Vec<Card>) -> ScoringContext {
    let set_type = classify(&cards);
    state.score_set(cards, set_type).expect("scores")
}

#[test]
fn base_score_without_jokers() {
    let mut state = state_with(&[], 1);
    let scoring = score(&mut state, colour_ladder());
    assert_eq!(scoring.set_type, SetType::new(3, 1));
    assert_eq!(scoring.chips(), 25);
    assert_eq!(scoring.mult(), 3.0);
    assert_eq!(scoring.total(), 75);
    assert_eq!(scoring.log.len(), 1);
    assert_eq!(scoring.log[0].source, "Played Set (3U, 1L)");
    assert_eq!(scoring.log[0].source_type, SourceType::Set);
}

#[test]
fn levels_raise_chips_and_mult() {
    let mut state = state_with(&[], 1);
    state.level_up(SetType::new(3, 1), 2);
    let scoring = score(&mut state, colour_ladder());
    assert_eq!(scoring.level, 3);
    assert_eq!(scoring.chips(), 55);
    assert_eq!(scoring.mult(), 6.0);
    assert_eq!(scoring.total(), 330);
}

#[test]
fn card_enhancements_apply_in_order() {
    let mut state = state_with(&[], 1);
    let mut cards = colour_ladder();
    cards[0] = cards[0].with_enhancement(Enhancement::BonusChips);
    cards[1] = cards[1].with_enhancement(Enhancement::BonusMult);
    cards[2] = cards[2].with_enhancement(Enhancement::XMult);
    let scoring = score(&mut state, cards);
    assert_eq!(scoring.chips(), 55);
    assert!((scoring.mult() - 7.5).abs() < 1e-9);
    assert_eq!(scoring.total(), 412);
    let sources: Vec<&str> = scoring.log.iter().map(|entry| entry.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["Played Set (3U, 1L)", "Bonus Chips", "Bonus Mult", "X-Mult Card"]
    );
    assert_eq!(scoring.log[1].description, "+30 Chips");
    assert_eq!(scoring.log[3].description, "x1.5 Mult");
}

#[test]
fn gold_cards_pay_when_scored() {
    let mut state = state_with(&[], 1);
    let money = state.money;
    let mut cards = colour_ladder();
    cards[0] = cards[0].with_enhancement(Enhancement::Gold);
    cards[2] = cards[2].with_enhancement(Enhancement::Gold);
    let scoring = score(&mut state, cards);
    assert_eq!(state.money, money + 6);
    assert_eq!(scoring.total(), 75);
}

fn state_with_config(config: GameConfig, seed: u64) -> GameState {
    let mut events = EventBus::default();
    GameState::new_run(Catalog::builtin(), Arc::new(config), seed, &mut events)
        .expect("run starts")
}

#[test]
fn lucky_cards_pay_out_when_the_odds_land() {
    let mut config = GameConfig::default();
    config.scoring.chance_cards.lucky_mult_chance = 1.0;
    config.scoring.chance_cards.lucky_money_chance = 1.0;
    let mut state = state_with_config(config, 1);
    let money = state.money;
    let mut cards = colour_ladder();
    cards[0] = cards[0].with_enhancement(Enhancement::Lucky);
    let scoring = score(&mut state, cards);
    assert_eq!(scoring.additive_mult, 20.0);
    assert_eq!(state.money, money + 20);
    let descriptions: Vec<&str> = scoring
        .log
        .iter()
        .filter(|entry| entry.source == "Lucky Card")
        .map(|entry| entry.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["+20 Mult", "+$20"]);
}

#[test]
fn unlucky_cards_score_nothing() {
    let mut config = GameConfig::default();
    config.scoring.chance_cards.lucky_mult_chance = 0.0;
    config.scoring.chance_cards.lucky_money_chance = 0.0;
    let mut state = state_with_config(config, 1);
    let mut cards = colour_ladder();
    cards[1] = cards[1].with_enhancement(Enhancement::Lucky);
    let scoring = score(&mut state, cards);
    assert_eq!(scoring.total(), 75);
    assert_eq!(scoring.log.len(), 1);
}

#[test]
fn glass_cards_double_the_multiplier() {
    let mut state = state_with(&[], 1);
    let mut cards = colour_ladder();
    cards[2] = cards[2].with_enhancement(Enhancement::Glass);
    let scoring = score(&mut state, cards);
    assert_eq!(scoring.multiplicative_mult(), 2.0);
    assert_eq!(scoring.total(), 150);
    assert_eq!(scoring.log[1].source, "Glass Card");
    assert_eq!(scoring.log[1].description, "x2 Mult");
}

#[test]
fn played_glass_cards_can_break() {
    let mut config = GameConfig::default();
    config.scoring.chance_cards.glass_break_chance = 1.0;
    let mut state = state_with_config(config, 8);
    let indices = playable_set(&mut state);
    for index in indices {
        state.board[index] = state.board[index].with_enhancement(Enhancement::Glass);
    }
    let mut events = EventBus::default();
    state.play_set(&indices, &mut events).expect("plays");
    assert!(state.discard_pile.is_empty());
    assert_eq!(state.board.len(), 12);
    assert_eq!(state.card_count(), 78);
    assert!(events
        .drain()
        .any(|event| event == Event::CardsShattered { count: 3 }));
}

#[test]
fn amplify_doubles_what_was_gathered() {
    let mut state = state_with(&[], 1);
    let mut cards = colour_ladder();
    cards[0] = cards[0].with_enhancement(Enhancement::BonusChips);
    cards[1] = cards[1].with_enhancement(Enhancement::Amplify);
    let scoring = score(&mut state, cards);
    assert_eq!(scoring.flat_chips, 60);
    assert_eq!(scoring.total(), 85 * 3);
}

#[test]
fn late_enhancement_is_read_after_card_abilities() {
    let mut state = state_with(&["J_VAMPIRE"], 1);
    let mut cards = colour_ladder();
    cards[2] = cards[2].with_enhancement(Enhancement::XMult);
    let scoring = score(&mut state, cards);
    assert!(scoring.log.iter().all(|entry| entry.source != "X-Mult Card"));
    assert!((scoring.mult() - 3.3).abs() < 1e-9);
    match &state.inventory.jokers[0].data {
        JokerData::XMult { x_mult } => assert!((x_mult - 1.1).abs() < 1e-9),
        other => panic!("unexpected data {other:?}"),
    }
}

#[test]
fn audit_log_accounts_for_the_final_score() {
    let mut state = state_with(&["J_CHIPS", "J_MULT", "J_XMULT", "J_LUSTY", "J_ONYX"], 1);
    let scoring = score(&mut state, colour_ladder());
    assert_eq!(scoring.chips(), 85);
    assert!((scoring.mult() - 16.0).abs() < 1e-9);
    assert_eq!(scoring.total(), 1360);

    let (base, rest) = scoring.log.split_first().expect("base entry");
    let chips: i64 = base.after.chips
        + rest
            .iter()
            .map(|entry| entry.after.chips - entry.before.chips)
            .sum::<i64>();
    let mult = rest
        .iter()
        .fold(base.after.mult, |acc, entry| acc * entry.after.mult / entry.before.mult);
    assert_eq!(chips, scoring.chips());
    assert!((mult - scoring.mult()).abs() < 1e-6);
}

#[test]
fn first_card_bonus_applies_once_per_set() {
    let mut state = state_with(&["J_FIRST_CARD"], 1);
    assert_eq!(score(&mut state, colour_ladder()).flat_chips, 50);
    assert_eq!(score(&mut state, colour_ladder()).flat_chips, 50);
}

#[test]
fn same_seed_same_selection_same_score() {
    let ids = ["J_MISPRINT", "J_BLOODSTONE", "J_GAMBLER", "J_8_BALL"];
    let mut first = state_with(&ids, 99);
    let mut second = state_with(&ids, 99);
    for _ in 0..5 {
        let a = score(&mut first, colour_ladder());
        let b = score(&mut second, colour_ladder());
        assert_eq!(a.total(), b.total());
        assert_eq!(a.log, b.log);
    }
    assert_eq!(first.rng, second.rng);
}

#[test]
fn play_set_adds_to_round_score_and_keeps_the_board_full() {
    let mut state = state_with(&["J_CHIPS"], 3);
    let mut events = EventBus::default();
    let indices = playable_set(&mut state);
    let outcome = state.play_set(&indices, &mut events).expect("plays");
    assert_eq!(state.round_score, outcome.score_gained);
    assert_eq!(state.boards_remaining, 3);
    assert_eq!(state.board.len(), 12);
    assert_eq!(state.discard_pile.len(), 3);
    assert_eq!(state.card_count(), 81);
    assert_eq!(state.played_set_types, vec![outcome.set_type]);
    assert_eq!(outcome.blind, BlindOutcome::Continue);
    assert!(events
        .drain()
        .any(|event| matches!(event, Event::SetScored { .. })));
}

fn playable_set(state: &mut GameState) -> [usize; 3] {
    if let Some(found) = find_set(&state.board) {
        return found;
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
    [0, 1, 2]
}
