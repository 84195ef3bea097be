use setlatro_core::*;
use std::collections::HashSet;
use std::sync::Arc;

fn new_run(seed: u64) -> (GameState, EventBus) {
    let mut events = EventBus::default();
    let state = GameState::new_run(
        Catalog::builtin(),
        Arc::new(GameConfig::default()),
        seed,
        &mut events,
    )
    .expect("run starts");
    (state, events)
}

fn completion(a: [i8; 4], b: [i8; 4]) -> [i8; 4] {
    let mut wanted = [0i8; 4];
    for attr in 0..4 {
        wanted[attr] = (6 - a[attr] - b[attr]) % 3;
    }
    wanted
}

/// A valid set on the board, swapping a card in from the deck or discard
/// pile when the dealt board has none.
fn playable_set(state: &mut GameState) -> [usize; 3] {
    if let Some(found) = find_set(&state.board) {
        return found;
    }
    let wanted = completion(state.board[0].attributes, state.board[1].attributes);
    if let Some(position) = state.deck.iter().position(|card| card.attributes == wanted) {
        std::mem::swap(&mut state.board[2], &mut state.deck[position]);
    } else {
        let position = state
            .discard_pile
            .iter()
            .position(|card| card.attributes == wanted)
            .expect("completion is somewhere");
        std::mem::swap(&mut state.board[2], &mut state.discard_pile[position]);
    }
    [0, 1, 2]
}

fn invalid_triple(board: &[Card]) -> [usize; 3] {
    for a in 0..board.len() {
        for b in (a + 1)..board.len() {
            for c in (b + 1)..board.len() {
                if !is_valid_set(&[board[a], board[b], board[c]]) {
                    return [a, b, c];
                }
            }
        }
    }
    panic!("every triple is a set");
}

fn assert_partition(state: &GameState) {
    assert_eq!(state.card_count(), 81);
    let distinct: HashSet<[i8; 4]> = state
        .deck
        .iter()
        .chain(&state.board)
        .chain(&state.discard_pile)
        .map(|card| card.attributes)
        .collect();
    assert_eq!(distinct.len(), 81);
}

fn clear_blind(state: &mut GameState, events: &mut EventBus) -> PlayOutcome {
    state.round_score = state.target();
    let indices = playable_set(state);
    state.play_set(&indices, events).expect("plays")
}

#[test]
fn new_run_deals_the_first_small_blind() {
    let (state, mut events) = new_run(1);
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.ante, 1);
    assert_eq!(state.blind, BlindKind::Small);
    assert_eq!(state.board.len(), 12);
    assert_eq!(state.deck.len(), 69);
    assert_eq!(state.money, 4);
    assert_eq!(state.boards_remaining, 4);
    assert_eq!(state.discards_remaining, 3);
    assert_eq!(state.target(), 300);
    assert_eq!(state.blind_name(), "Small Blind");
    for set_type in SetType::ALL {
        assert_eq!(state.set_level(set_type), 1);
    }
    assert_partition(&state);
    let events: Vec<Event> = events.drain().collect();
    assert_eq!(events[0], Event::RunStarted { seed: 1 });
    assert!(matches!(events[1], Event::BlindStarted { target: 300, .. }));
}

#[test]
fn rejected_plays_leave_the_state_untouched() {
    let (mut state, mut events) = new_run(2);
    let before = state.snapshot();
    assert_eq!(
        state.play_set(&[0, 1], &mut events),
        Err(RunError::InvalidCardCount)
    );
    assert_eq!(
        state.play_set(&[0, 0, 1], &mut events),
        Err(RunError::InvalidSelection)
    );
    assert_eq!(
        state.play_set(&[0, 1, 12], &mut events),
        Err(RunError::InvalidSelection)
    );
    let invalid = invalid_triple(&state.board);
    assert_eq!(state.play_set(&invalid, &mut events), Err(RunError::NotASet));
    assert_eq!(state.snapshot(), before);
}

#[test]
fn plays_and_discards_keep_every_card() {
    let (mut state, mut events) = new_run(3);
    for _ in 0..3 {
        let indices = playable_set(&mut state);
        state.play_set(&indices, &mut events).expect("plays");
        assert_partition(&state);
        state.discard(&[0, 1, 2, 3, 4], &mut events).expect("discards");
        assert_partition(&state);
        if state.discards_remaining == 0 {
            break;
        }
    }
    assert_eq!(state.boards_remaining, 1);
    assert_eq!(state.board.len(), 12);
}

#[test]
fn discard_pile_is_reshuffled_when_the_deck_runs_short() {
    let (mut state, mut events) = new_run(4);
    state.discards_remaining = 100;
    for _ in 0..20 {
        state.discard(&[0, 1, 2, 3, 4], &mut events).expect("discards");
        assert_eq!(state.board.len(), 12);
        assert_partition(&state);
    }
}

#[test]
fn discard_validates_its_selection() {
    let (mut state, mut events) = new_run(5);
    assert_eq!(state.discard(&[], &mut events), Err(RunError::InvalidCardCount));
    assert_eq!(
        state.discard(&[0, 1, 2, 3, 4, 5], &mut events),
        Err(RunError::InvalidCardCount)
    );
    assert_eq!(state.discard(&[3, 3], &mut events), Err(RunError::InvalidSelection));
    state.discards_remaining = 0;
    assert_eq!(state.discard(&[0], &mut events), Err(RunError::NoDiscardsLeft));
}

#[test]
fn meeting_the_target_opens_the_shop() {
    let (mut state, mut events) = new_run(6);
    events.drain().for_each(drop);
    let outcome = clear_blind(&mut state, &mut events);
    assert_eq!(outcome.blind, BlindOutcome::Cleared);
    assert_eq!(state.phase, Phase::Shop);
    assert_eq!(state.money, 4 + 3 + 3);
    assert_eq!(state.shop.jokers.len(), 2);
    assert_eq!(state.shop.packs.len(), 2);
    let emitted: Vec<Event> = events.drain().collect();
    assert!(emitted
        .iter()
        .any(|event| matches!(event, Event::BlindCleared { reward: 6, .. })));
    assert!(emitted
        .iter()
        .any(|event| matches!(event, Event::ShopEntered { jokers: 2, packs: 2 })));
    let indices = playable_set(&mut state);
    assert_eq!(
        state.play_set(&indices, &mut events),
        Err(RunError::InvalidPhase(Phase::Shop))
    );
}

#[test]
fn running_out_of_boards_below_target_ends_the_run() {
    let (mut state, mut events) = new_run(7);
    state.boards_remaining = 1;
    let indices = playable_set(&mut state);
    let outcome = state.play_set(&indices, &mut events).expect("plays");
    assert_eq!(outcome.blind, BlindOutcome::Failed);
    assert_eq!(state.phase, Phase::GameOver);
    assert!(events
        .drain()
        .any(|event| matches!(event, Event::BlindFailed { .. })));
    assert_eq!(
        state.play_set(&indices, &mut events),
        Err(RunError::InvalidPhase(Phase::GameOver))
    );
}

#[test]
fn leaving_the_shop_pays_interest_and_deals_the_next_blind() {
    let (mut state, mut events) = new_run(8);
    clear_blind(&mut state, &mut events);
    state.money = 23;
    events.drain().for_each(drop);
    state.leave_shop(&mut events).expect("leaves");
    assert_eq!(state.money, 27);
    assert_eq!(state.blind, BlindKind::Big);
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.round_score, 0);
    assert_eq!(state.boards_remaining, 4);
    assert_eq!(state.discards_remaining, 3);
    assert!(state.played_set_types.is_empty());
    assert!(state.discard_pile.is_empty());
    assert!(state.shop.jokers.is_empty());
    assert_eq!(state.board.len(), 12);
    assert_partition(&state);
    let events: Vec<Event> = events.drain().collect();
    assert_eq!(events[0], Event::InterestEarned { amount: 4, money: 27 });
    assert!(matches!(events[1], Event::BlindStarted { target: 450, .. }));
}

#[test]
fn interest_is_capped() {
    let (mut state, _) = new_run(9);
    state.money = 100;
    assert_eq!(state.interest(), 5);
    state.money = 9;
    assert_eq!(state.interest(), 1);
    state.money = -3;
    assert_eq!(state.interest(), 0);
}

#[test]
fn boss_blind_shrinks_the_board() {
    let (mut state, mut events) = new_run(10);
    state.ante = 2;
    state.blind = BlindKind::Boss;
    state.start_blind(&mut events).expect("starts");
    assert_eq!(state.boss_effect, Some(BossEffect::ReduceBoardSize));
    assert_eq!(state.blind_name(), "The Needle");
    assert_eq!(state.board_size, 9);
    assert_eq!(state.board.len(), 9);
    assert_eq!(state.discard_pile.len(), 3);
    assert_partition(&state);

    state.blind = BlindKind::Small;
    state.ante = 3;
    state.start_blind(&mut events).expect("starts");
    assert_eq!(state.boss_effect, None);
    assert_eq!(state.board.len(), 12);
}

#[test]
fn first_boss_debuffs_the_first_joker() {
    let (mut state, mut events) = new_run(11);
    state.blind = BlindKind::Boss;
    state.start_blind(&mut events).expect("starts");
    assert_eq!(state.boss_effect, Some(BossEffect::DebuffFirstJoker));
    assert_eq!(state.blind_name(), "The Wall");
}

#[test]
fn leaving_the_last_boss_wins_the_run() {
    let (mut state, mut events) = new_run(12);
    state.ante = 8;
    state.blind = BlindKind::Boss;
    clear_blind(&mut state, &mut events);
    events.drain().for_each(drop);
    state.leave_shop(&mut events).expect("leaves");
    assert_eq!(state.phase, Phase::RunWon);
    assert!(events
        .drain()
        .any(|event| event == Event::RunWon { ante: 8 }));
}

#[test]
fn missing_ante_rule_is_reported() {
    let mut config = GameConfig::default();
    config.antes.retain(|rule| rule.ante != 1);
    let mut events = EventBus::default();
    let result = GameState::new_run(Catalog::builtin(), Arc::new(config), 1, &mut events);
    assert!(matches!(result, Err(RunError::MissingAnteRule(1))));
}

#[test]
fn end_of_round_abilities_fire_when_leaving_the_shop() {
    let (mut state, mut events) = new_run(13);
    let catalog = Catalog::builtin();
    for id in ["J_GOLDEN", "J_ETERNAL_MULT", "J_POPCORN"] {
        let template = catalog.joker(id).expect("known joker");
        state.inventory.jokers.push(template.instantiate(Variant::Basic, 4));
    }
    clear_blind(&mut state, &mut events);
    state.money = 0;
    state.leave_shop(&mut events).expect("leaves");
    assert_eq!(state.money, 4);
    assert_eq!(state.inventory.jokers[1].data, JokerData::Accumulated { mult: 1.0 });
    assert_eq!(
        state.inventory.jokers[2].data,
        JokerData::RoundsPlayed { rounds_played: 1 }
    );
}

#[test]
fn reorder_requires_a_permutation() {
    let (mut state, mut events) = new_run(14);
    let catalog = Catalog::builtin();
    for id in ["J_CHIPS", "J_MULT", "J_XMULT"] {
        let template = catalog.joker(id).expect("known joker");
        state.inventory.jokers.push(template.instantiate(Variant::Basic, 4));
    }
    assert_eq!(
        state.reorder_jokers(&[0, 1], &mut events),
        Err(RunError::InvalidOrder)
    );
    assert_eq!(
        state.reorder_jokers(&[0, 0, 1], &mut events),
        Err(RunError::InvalidOrder)
    );
    state.reorder_jokers(&[2, 0, 1], &mut events).expect("reorders");
    let ids: Vec<&str> = state.inventory.jokers.iter().map(|joker| joker.id.as_str()).collect();
    assert_eq!(ids, vec!["J_XMULT", "J_CHIPS", "J_MULT"]);
    state.phase = Phase::GameOver;
    assert_eq!(
        state.reorder_jokers(&[0, 1, 2], &mut events),
        Err(RunError::InvalidPhase(Phase::GameOver))
    );
}
