use setlatro_core::*;
use std::sync::Arc;

fn state_with(jokers: Vec<JokerTemplate>) -> GameState {
    let catalog = Arc::new(Catalog::new(jokers.clone(), Vec::new()));
    let mut events = EventBus::default();
    let mut state = GameState::new_run(catalog, Arc::new(GameConfig::default()), 5, &mut events)
        .expect("run starts");
    state.inventory.joker_slots = jokers.len().max(5);
    for template in &jokers {
        state.inventory.jokers.push(template.instantiate(Variant::Basic, 4));
    }
    state
}

fn calc_joker(id: &str, priority: i32, effect: EffectOp) -> JokerTemplate {
    JokerTemplate::new(id, id, "", Rarity::Common)
        .on(EffectBlock::new(Trigger::OnScoreCalculation, effect).priority(priority))
}

fn ladder_set() -> Vec<Card> {
    vec![
        Card::new([0, 0, 0, 0]),
        Card::new([1, 1, 1, 1]),
        Card::new([2, 2, 2, 2]),
    ]
}

fn joker_sources(log: &[ScoreLogEntry], phase: TriggerPhase) -> Vec<String> {
    log.iter()
        .filter(|entry| entry.source_type == SourceType::Joker && entry.trigger_phase == phase)
        .map(|entry| entry.source.clone())
        .collect()
}

#[test]
fn priorities_run_ascending_regardless_of_roster_order() {
    let mut state = state_with(vec![
        calc_joker("late", priority::COPY, EffectOp::AddChips(1)),
        calc_joker("times", priority::MULTIPLICATIVE, EffectOp::MultiplyMult(2.0)),
        calc_joker("convert", priority::CONVERSION, EffectOp::AddMult(1.0)),
        calc_joker("early", priority::DEFAULT, EffectOp::AddChips(5)),
    ]);
    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards, set_type).expect("scores");
    assert_eq!(
        joker_sources(&scoring.log, TriggerPhase::EndScoring),
        vec!["early", "convert", "times", "late"]
    );
}

#[test]
fn equal_priorities_keep_roster_order() {
    let mut state = state_with(vec![
        calc_joker("second", priority::DEFAULT, EffectOp::AddChips(2)),
        calc_joker("first", priority::DEFAULT, EffectOp::AddChips(1)),
        calc_joker("third", priority::DEFAULT, EffectOp::AddChips(3)),
    ]);
    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards, set_type).expect("scores");
    assert_eq!(
        joker_sources(&scoring.log, TriggerPhase::EndScoring),
        vec!["second", "first", "third"]
    );
}

#[test]
fn effects_without_movement_are_not_logged() {
    let mut state = state_with(vec![
        calc_joker("nothing", priority::DEFAULT, EffectOp::AddChips(0)),
        calc_joker("tiny", priority::DEFAULT, EffectOp::MultiplyMult(1.0005)),
        calc_joker("real", priority::DEFAULT, EffectOp::AddChips(10)),
    ]);
    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards, set_type).expect("scores");
    let joker_entries: Vec<&ScoreLogEntry> = scoring
        .log
        .iter()
        .filter(|entry| entry.source_type == SourceType::Joker)
        .collect();
    assert_eq!(joker_entries.len(), 1);
    assert_eq!(joker_entries[0].source, "real");
    assert_eq!(joker_entries[0].description, "+10 Chips");
}

#[test]
fn boss_debuff_skips_first_joker_only_in_aggregate_phase() {
    let template = |id: &str| {
        JokerTemplate::new(id, id, "", Rarity::Common)
            .data(JokerData::Accumulated { mult: 0.0 })
            .on(EffectBlock::new(Trigger::OnScoreCalculation, EffectOp::AddChips(1)))
            .on(EffectBlock::new(Trigger::OnScoreCard, EffectOp::AddMult(1.0)))
            .on(EffectBlock::new(Trigger::OnEndOfRound, EffectOp::GrowMult(1.0)))
    };
    let mut state = state_with(vec![template("a"), template("b"), template("c")]);
    state.boss_effect = Some(BossEffect::DebuffFirstJoker);

    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards, set_type).expect("scores");
    assert_eq!(
        joker_sources(&scoring.log, TriggerPhase::EndScoring),
        vec!["b", "c"]
    );
    assert_eq!(joker_sources(&scoring.log, TriggerPhase::CardScoring).len(), 9);

    state
        .dispatch(Trigger::OnEndOfRound, &mut Scope::none())
        .expect("end of round");
    for joker in &state.inventory.jokers {
        assert_eq!(joker.data, JokerData::Accumulated { mult: 1.0 });
    }
}

#[test]
fn self_scoped_triggers_only_reach_the_joker_concerned() {
    let template = |id: &str| {
        JokerTemplate::new(id, id, "", Rarity::Common)
            .on(EffectBlock::new(Trigger::OnBuySelf, EffectOp::AddMoney(10)))
    };
    let mut state = state_with(vec![template("a"), template("b"), template("c")]);
    let money = state.money;
    state
        .dispatch(Trigger::OnBuySelf, &mut Scope::joker(1))
        .expect("buy self");
    assert_eq!(state.money, money + 10);
}

#[test]
fn copy_runs_the_next_jokers_bindings_for_the_same_trigger() {
    let mimic = JokerTemplate::new("mimic", "mimic", "", Rarity::Rare).on(
        EffectBlock::new(Trigger::OnScoreCalculation, EffectOp::CopyNextJoker)
            .priority(priority::COPY),
    );
    let mut state = state_with(vec![
        mimic,
        calc_joker("chips", priority::DEFAULT, EffectOp::AddChips(10)),
    ]);
    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards, set_type).expect("scores");
    assert_eq!(scoring.flat_chips, 20);
    assert_eq!(
        joker_sources(&scoring.log, TriggerPhase::EndScoring),
        vec!["chips", "mimic"]
    );
}

#[test]
fn faulted_effect_aborts_the_rest_of_the_dispatch() {
    let mut state = state_with(vec![
        calc_joker("broken", priority::DEFAULT, EffectOp::GrowMult(1.0)),
        calc_joker("after", priority::MULTIPLICATIVE, EffectOp::AddMoney(5)),
    ]);
    let money = state.money;
    let cards = ladder_set();
    let set_type = classify(&cards);
    let result = state.score_set(cards, set_type);
    assert!(matches!(result, Err(RunError::AbilityFault { .. })));
    assert_eq!(state.money, money);
}

#[test]
fn discard_trigger_sees_the_discarded_cards() {
    let faceless = JokerTemplate::new("faceless", "faceless", "", Rarity::Common).on(
        EffectBlock::new(Trigger::OnDiscard, EffectOp::AddMoney(5)).when(
            Condition::DiscardedAtLeast {
                attr: COLOR,
                value: RED,
                count: 2,
            },
        ),
    );
    let mut state = state_with(vec![faceless]);
    let money = state.money;
    let reds = [Card::new([RED, 0, 0, 0]), Card::new([RED, 1, 0, 0])];
    state
        .dispatch(Trigger::OnDiscard, &mut Scope::discarding(&reds))
        .expect("discard");
    assert_eq!(state.money, money + 5);

    let mixed = [Card::new([RED, 0, 0, 0]), Card::new([GREEN, 1, 0, 0])];
    state
        .dispatch(Trigger::OnDiscard, &mut Scope::discarding(&mixed))
        .expect("discard");
    assert_eq!(state.money, money + 5);
}

#[test]
fn gamble_miss_pins_additive_mult_and_keeps_earlier_factors() {
    let mut state = state_with(vec![
        calc_joker("times", priority::MULTIPLICATIVE, EffectOp::MultiplyMult(2.0)),
        calc_joker(
            "gamble",
            priority::LAST_WORD,
            EffectOp::Gamble {
                chance: 0.0,
                factor: 3.0,
            },
        ),
    ]);
    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards, set_type).expect("scores");
    assert_eq!(scoring.multiplicative_mult(), 2.0);
    assert!((scoring.base_mult + scoring.additive_mult - 1.0).abs() < 1e-9);
    assert!((scoring.mult() - 2.0).abs() < 1e-9);
}

#[test]
fn multiplier_per_empty_slot_skips_a_full_roster() {
    let stencil = JokerTemplate::new("stencil", "stencil", "", Rarity::Common).on(
        EffectBlock::new(
            Trigger::OnScoreCalculation,
            EffectOp::MultiplyPer {
                per: Quantity::EmptyJokerSlots,
                amount: 1.0,
            },
        )
        .priority(priority::MULTIPLICATIVE),
    );
    let mut state = state_with(vec![stencil]);
    state.inventory.joker_slots = 1;
    let cards = ladder_set();
    let set_type = classify(&cards);
    let scoring = state.score_set(cards.clone(), set_type).expect("scores");
    assert_eq!(scoring.multiplicative_mult(), 1.0);
    assert!(joker_sources(&scoring.log, TriggerPhase::EndScoring).is_empty());

    state.inventory.joker_slots = 4;
    let scoring = state.score_set(cards, set_type).expect("scores");
    assert_eq!(scoring.multiplicative_mult(), 3.0);
    assert_eq!(joker_sources(&scoring.log, TriggerPhase::EndScoring), vec!["stencil"]);
}
