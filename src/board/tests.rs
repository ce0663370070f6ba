use super::*;
use crate::error::Error;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::First.opponent(), Player::Second);
    assert_eq!(Player::Second.opponent(), Player::First);
}

#[test]
fn test_player_slots() {
    assert_eq!(Player::from_slot(0).unwrap(), Player::First);
    assert_eq!(Player::from_slot(1).unwrap(), Player::Second);
    assert!(matches!(Player::from_slot(2), Err(Error::InvalidPlayerSlot(2))));
}

#[test]
fn test_cell_layout() {
    assert_eq!(cell_index(1, Player::First), 0);
    assert_eq!(cell_index(1, Player::Second), 1);
    assert_eq!(cell_index(113, Player::First), 224);
    assert_eq!(field_of_cell(224), 113);
    assert_eq!(field_of_cell(225), 113);
    assert_eq!(Player::of_cell(225), Player::Second);
}

#[test]
fn test_new_state_is_empty() {
    let state = GameState::new(15);
    assert_eq!(state.cell_count(), 450);
    assert_eq!(state.field_count(), 225);
    assert!(state.is_empty());
    assert!(!state.is_full());
    assert_eq!(state.empty_fields().count(), 225);
}

#[test]
fn test_place_and_query() {
    let mut state = GameState::new(15);
    state.place(113, Player::First).unwrap();
    state.place(114, Player::Second).unwrap();

    assert_eq!(state.occupant(113), Some(Player::First));
    assert_eq!(state.occupant(114), Some(Player::Second));
    assert_eq!(state.occupant(1), None);
    assert!(state.cell(224));
    assert!(state.cell(227));
    assert_eq!(state.stone_count(), 2);
    assert_eq!(state.occupied_fields().collect::<Vec<_>>(), vec![113, 114]);
    assert_eq!(state.player_fields(Player::Second).collect::<Vec<_>>(), vec![114]);
}

#[test]
fn test_place_rejects_bad_moves() {
    let mut state = GameState::new(5);
    state.place(3, Player::First).unwrap();
    assert!(matches!(
        state.place(3, Player::Second),
        Err(Error::FieldOccupied { field: 3 })
    ));
    assert!(matches!(state.place(0, Player::First), Err(Error::InvalidField { .. })));
    assert!(matches!(state.place(26, Player::First), Err(Error::InvalidField { .. })));
}

#[test]
fn test_full_board() {
    let mut state = GameState::new(2);
    for (i, f) in (1..=4).enumerate() {
        let player = if i % 2 == 0 { Player::First } else { Player::Second };
        state.place(f, player).unwrap();
    }
    assert!(state.is_full());
    assert_eq!(state.empty_fields().count(), 0);
}

#[test]
fn test_from_cells_validation() {
    assert!(matches!(
        GameState::from_cells(5, &[0; 49]),
        Err(Error::InvalidStateLength { expected: 50, got: 49 })
    ));

    let mut cells = vec![0u8; 50];
    cells[7] = 2;
    assert!(matches!(
        GameState::from_cells(5, &cells),
        Err(Error::InvalidCellValue { cell: 7, value: 2 })
    ));

    let mut cells = vec![0u8; 50];
    cells[4] = 1;
    cells[5] = 1;
    assert!(matches!(
        GameState::from_cells(5, &cells),
        Err(Error::FieldDoublyOccupied { field: 3 })
    ));
}

#[test]
fn test_from_cells_rejects_board_size() {
    assert!(matches!(
        GameState::from_cells(0, &[]),
        Err(Error::InvalidConfig { .. })
    ));
    let size = MAX_BOARD_SIZE + 1;
    assert!(matches!(
        GameState::from_cells(size, &vec![0; 2 * size * size]),
        Err(Error::InvalidConfig { .. })
    ));
}

#[test]
fn test_trial_move_restores_state() {
    let mut state = GameState::new(5);
    state.place(7, Player::First).unwrap();
    let before = state.clone();
    {
        let trial = state.trial(8, Player::Second);
        assert_eq!(trial.occupant(8), Some(Player::Second));
        assert_eq!(trial.stone_count(), 2);
    }
    assert_eq!(state, before);
}

#[test]
fn test_trial_move_restores_on_early_return() {
    fn probe(state: &mut GameState) -> crate::error::Result<()> {
        let mut trial = state.trial(1, Player::First);
        let _nested = trial.trial(2, Player::Second);
        Err(Error::InvalidPlayerSlot(9))
    }

    let mut state = GameState::new(5);
    assert!(probe(&mut state).is_err());
    assert!(state.is_empty());
}

#[test]
fn test_with_move_leaves_original() {
    let state = GameState::new(5);
    let next = state.with_move(13, Player::First).unwrap();
    assert!(state.is_empty());
    assert_eq!(next.occupant(13), Some(Player::First));
}

#[test]
fn test_bitboard_iteration_crosses_words() {
    let mut bb = Bitboard::new(200);
    for cell in [0, 63, 64, 127, 199] {
        bb.set(cell);
    }
    assert_eq!(bb.iter_ones().collect::<Vec<_>>(), vec![0, 63, 64, 127, 199]);
    assert_eq!(bb.count(), 5);
    bb.clear(64);
    assert!(!bb.get(64));
    assert_eq!(bb.count(), 4);
}
