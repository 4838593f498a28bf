mod common;

use common::{active_game_events, opening_tiles};
use proptest::prelude::*;
use reversi_client::{
    Board, Color, GameResult, Mode, Player, Point, ServerMessage, SessionMachine, SessionState,
    Tile, Transition,
};

#[test]
fn ok_moves_connecting_to_waiting() {
    let mut machine = SessionMachine::new();
    assert_eq!(machine.state(), SessionState::Connecting);
    assert_eq!(machine.apply(ServerMessage::Ok), Transition::Changed);
    assert_eq!(machine.state(), SessionState::Waiting);
    // a repeated ack carries nothing new
    assert_eq!(machine.apply(ServerMessage::Ok), Transition::Unchanged);
}

#[test]
fn paired_game_scenario() {
    let mut machine = SessionMachine::new();
    for event in active_game_events(Mode::Player) {
        machine.apply(event);
    }
    let snapshot = machine.snapshot();
    assert_eq!(snapshot.state, SessionState::Active);
    assert_eq!(snapshot.mode, Mode::Player);

    let scene = snapshot.scene().expect("scene should be complete");
    assert_eq!(scene.turn, Color::Black);
    assert_eq!(scene.player(Color::Black).nickname, "A");
    assert_eq!(scene.me.nickname, "A");
    assert_eq!(scene.enemy.nickname, "B");
    assert_eq!(scene.board.count(Color::Black), 2);
    assert_eq!(scene.board.count(Color::White), 2);
    assert!(scene.accepts_input());
}

#[test]
fn turn_update_keeps_board() {
    let mut machine = SessionMachine::new();
    machine.apply(ServerMessage::Board(opening_tiles()));
    let board = machine.snapshot().board.clone();
    assert!(board.is_some());

    machine.apply(ServerMessage::Turn(Color::White));
    assert_eq!(machine.snapshot().board, board);
    assert_eq!(machine.snapshot().turn, Some(Color::White));
}

#[test]
fn put_does_not_change_turn() {
    let mut machine = SessionMachine::new();
    for event in active_game_events(Mode::Player) {
        machine.apply(event);
    }
    machine.apply(ServerMessage::Put(Point::new(4, 3)));
    assert_eq!(machine.snapshot().last_move, Some(Point::new(4, 3)));
    assert_eq!(machine.snapshot().turn, Some(Color::Black));
}

#[test]
fn state_never_moves_backwards() {
    let mut machine = SessionMachine::new();
    machine.apply(ServerMessage::State(SessionState::Active));
    assert!(matches!(
        machine.apply(ServerMessage::State(SessionState::Waiting)),
        Transition::Ignored(_)
    ));
    assert!(matches!(machine.apply(ServerMessage::Ok), Transition::Unchanged));
    assert_eq!(machine.state(), SessionState::Active);
}

#[test]
fn finish_freezes_board_and_turn() {
    let mut machine = SessionMachine::new();
    for event in active_game_events(Mode::Player) {
        machine.apply(event);
    }
    assert_eq!(
        machine.apply(ServerMessage::Finish(GameResult::Win(Color::Black))),
        Transition::Changed
    );
    assert_eq!(machine.state(), SessionState::Finished);

    let before = machine.snapshot().clone();
    let full = vec![Tile::Black; Board::new().tiles().len()];
    assert!(matches!(
        machine.apply(ServerMessage::Board(full)),
        Transition::Ignored(_)
    ));
    assert!(matches!(
        machine.apply(ServerMessage::Turn(Color::White)),
        Transition::Ignored(_)
    ));
    assert_eq!(machine.snapshot(), &before);
}

#[test]
fn finish_while_waiting_jumps_to_finished() {
    let mut machine = SessionMachine::new();
    machine.apply(ServerMessage::Ok);
    assert_eq!(machine.state(), SessionState::Waiting);

    assert_eq!(
        machine.apply(ServerMessage::Finish(GameResult::Draw)),
        Transition::Changed
    );
    assert_eq!(machine.state(), SessionState::Finished);
    assert_eq!(machine.snapshot().result, Some(GameResult::Draw));
}

#[test]
fn second_finish_replaces_the_result() {
    let mut machine = SessionMachine::new();
    for event in active_game_events(Mode::Player) {
        machine.apply(event);
    }
    machine.apply(ServerMessage::Finish(GameResult::Win(Color::Black)));
    assert_eq!(
        machine.apply(ServerMessage::Finish(GameResult::Draw)),
        Transition::Changed
    );
    assert_eq!(machine.snapshot().result, Some(GameResult::Draw));
    assert_eq!(machine.state(), SessionState::Finished);
    // the same result again carries nothing new
    assert_eq!(
        machine.apply(ServerMessage::Finish(GameResult::Draw)),
        Transition::Unchanged
    );
}

#[test]
fn finished_state_without_result_stops_input() {
    let mut machine = SessionMachine::new();
    for event in active_game_events(Mode::Player) {
        machine.apply(event);
    }
    machine.apply(ServerMessage::State(SessionState::Finished));

    let scene = machine.snapshot().scene().expect("scene should be complete");
    assert_eq!(scene.result, None);
    assert!(scene.is_over());
    assert!(!scene.accepts_input());
}

#[test]
fn interior_only_board_is_wrapped_in_walls() {
    let mut interior = vec![Tile::Empty; 64];
    interior[3 * 8 + 3] = Tile::White;
    interior[3 * 8 + 4] = Tile::Black;
    interior[4 * 8 + 3] = Tile::Black;
    interior[4 * 8 + 4] = Tile::White;

    let mut machine = SessionMachine::new();
    assert_eq!(machine.apply(ServerMessage::Board(interior)), Transition::Changed);
    let board = machine.snapshot().board.clone().expect("board should be stored");
    assert_eq!(board, Board::new());
    assert_eq!(board.count(Color::Black), 2);
    assert_eq!(board.count(Color::White), 2);
    assert_eq!(board.get(Point::new(0, 0)), Some(Tile::Wall));
}

#[test]
fn walled_board_is_accepted() {
    let mut machine = SessionMachine::new();
    assert_eq!(machine.apply(ServerMessage::Board(opening_tiles())), Transition::Changed);
    let board = machine.snapshot().board.clone().expect("board should be stored");
    assert_eq!(board.tiles().len(), 100);
    assert_eq!(board.count(Color::Black), 2);
    assert_eq!(board.count(Color::White), 2);
}

#[test]
fn malformed_board_is_ignored() {
    let mut machine = SessionMachine::new();
    machine.apply(ServerMessage::Board(opening_tiles()));
    let board = machine.snapshot().board.clone();
    assert!(matches!(
        machine.apply(ServerMessage::Board(vec![Tile::Empty; 50])),
        Transition::Ignored(_)
    ));
    assert_eq!(machine.snapshot().board, board);
}

#[test]
fn removed_is_terminal() {
    let mut machine = SessionMachine::new();
    machine.apply(ServerMessage::Ok);
    assert_eq!(machine.connection_lost(), Transition::Changed);
    assert_eq!(machine.state(), SessionState::Removed);

    let before = machine.snapshot().clone();
    for event in active_game_events(Mode::Player) {
        assert!(matches!(machine.apply(event), Transition::Ignored(_)));
    }
    assert_eq!(machine.snapshot(), &before);
    assert_eq!(machine.connection_lost(), Transition::Unchanged);
}

#[test]
fn server_can_remove_the_session() {
    let mut machine = SessionMachine::new();
    machine.apply(ServerMessage::State(SessionState::Removed));
    assert!(machine.state().is_terminal());
}

fn any_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Connecting),
        Just(SessionState::Waiting),
        Just(SessionState::Active),
        Just(SessionState::Finished),
        Just(SessionState::Removed),
    ]
}

fn any_color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Black), Just(Color::White)]
}

/// Any event except a board update.
fn non_board_event() -> impl Strategy<Value = ServerMessage> {
    prop_oneof![
        Just(ServerMessage::Ok),
        any_state().prop_map(ServerMessage::State),
        prop_oneof![Just(Mode::Player), Just(Mode::Watcher)].prop_map(ServerMessage::Mode),
        any_color().prop_map(|c| ServerMessage::Me(Player::new("A", c))),
        any_color().prop_map(|c| ServerMessage::Enemy(Player::new("B", c))),
        any_color().prop_map(ServerMessage::Turn),
        prop_oneof![
            Just(GameResult::Draw),
            any_color().prop_map(GameResult::Win)
        ]
        .prop_map(ServerMessage::Finish),
        (1i32..=8, 1i32..=8).prop_map(|(x, y)| ServerMessage::Put(Point::new(x, y))),
    ]
}

fn any_event() -> impl Strategy<Value = ServerMessage> {
    prop_oneof![
        4 => non_board_event(),
        1 => Just(ServerMessage::Board(opening_tiles())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn state_is_monotonic(events in prop::collection::vec(any_event(), 0..40)) {
        let mut machine = SessionMachine::new();
        let mut last = machine.state();
        for event in events {
            machine.apply(event);
            prop_assert!(machine.state() >= last);
            last = machine.state();
        }
    }

    #[test]
    fn unrelated_updates_never_clear_the_board(events in prop::collection::vec(non_board_event(), 0..40)) {
        let mut machine = SessionMachine::new();
        machine.apply(ServerMessage::Board(opening_tiles()));
        let board = machine.snapshot().board.clone();
        for event in events {
            machine.apply(event);
            prop_assert_eq!(&machine.snapshot().board, &board);
        }
    }
}
