mod common;

use gridpath_lib::{
    CellState, EditOutcome, Error, GridConfig, Position, Session, SessionStatus,
};

use common::{run_until_done, session_from};

#[test]
fn advance_before_endpoints_is_invalid_state() {
    let mut session = Session::new(GridConfig::default().with_cooldown_ms(0)).unwrap();
    assert!(matches!(
        session.advance(1),
        Err(Error::InvalidState { .. })
    ));

    session.place(Position::new(0, 0), 2).unwrap();
    assert!(matches!(
        session.advance(3),
        Err(Error::InvalidState { .. })
    ));
    assert_eq!(session.status(), SessionStatus::Editing);
}

#[test]
fn cooldown_ignores_rapid_repeat_edits() {
    let mut session = Session::new(GridConfig::default().with_cooldown_ms(1000)).unwrap();
    let position = Position::new(3, 3);
    session.place(Position::new(0, 0), 10).unwrap();
    session.place(Position::new(7, 7), 20).unwrap();

    assert_eq!(
        session.place(position, 100).unwrap(),
        EditOutcome::Placed(CellState::Wall)
    );
    assert_eq!(session.clear(position, 600).unwrap(), EditOutcome::Debounced);
    assert_eq!(session.grid().cell(position).state(), CellState::Wall);

    assert_eq!(
        session.clear(position, 1100).unwrap(),
        EditOutcome::Debounced,
        "an edit exactly one cooldown later is still ignored"
    );
    assert_eq!(session.clear(position, 1101).unwrap(), EditOutcome::Cleared);
    assert_eq!(session.grid().cell(position).state(), CellState::Unvisited);
}

#[test]
fn placing_start_after_a_layout_finish_enables_stepping() {
    let mut session = session_from("..\n.F\n");
    assert_eq!(session.start(), None);
    assert!(session.search().is_none());

    assert_eq!(
        session.place(Position::new(0, 0), 1).unwrap(),
        EditOutcome::Placed(CellState::Start)
    );
    assert_eq!(session.current(), Some(Position::new(0, 0)));

    let (outcomes, err) = run_until_done(&mut session, 10);
    assert!(err.is_none(), "unexpected error: {err:?}");
    assert!(!outcomes.is_empty());
    assert_eq!(session.status(), SessionStatus::Found);
}

#[test]
fn clearing_an_endpoint_is_rejected() {
    let mut session = session_from("S.\n.F\n");
    assert!(matches!(
        session.clear(Position::new(0, 0), 5),
        Err(Error::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.clear(Position::new(1, 1), 5),
        Err(Error::InvalidTransition { .. })
    ));
}

#[test]
fn edits_outside_the_grid_fail() {
    let mut session = session_from("S.\n.F\n");
    assert!(matches!(
        session.place(Position::new(2, 0), 1),
        Err(Error::OutOfBounds { .. })
    ));
}

#[test]
fn reset_restores_an_editable_grid() {
    let mut session = session_from("S.#\n..#\n..F\n");
    let walls_before: Vec<_> = session.grid().positions_in(CellState::Wall).collect();

    let (outcomes, err) = run_until_done(&mut session, 10);
    assert!(err.is_none());
    assert!(!outcomes.is_empty());
    assert_eq!(session.status(), SessionStatus::Found);

    session.reset(100).unwrap();

    assert_eq!(session.status(), SessionStatus::Editing);
    assert_eq!(session.steps_taken(), 0);
    assert_eq!(session.visited_len(), 0);
    assert_eq!(session.frontier_len(), 0);
    assert_eq!(session.current(), session.start());
    assert!(session.grid().cells().all(|cell| cell.score().is_none()));
    assert_eq!(session.grid().positions_in(CellState::Visited).count(), 0);
    assert_eq!(session.grid().positions_in(CellState::Current).count(), 0);
    assert_eq!(
        session.grid().positions_in(CellState::Wall).collect::<Vec<_>>(),
        walls_before
    );

    session.place(Position::new(1, 1), 2000).unwrap();
    let (_, err) = run_until_done(&mut session, 10);
    assert!(err.is_none());
    assert_eq!(session.status(), SessionStatus::Found);
}

#[test]
fn finish_cell_keeps_its_state_when_reached() {
    let mut session = session_from("SF\n..\n");
    let outcome = session.advance(1).unwrap();

    assert!(outcome.reached_finish);
    assert_eq!(
        session.grid().cell(Position::new(0, 1)).state(),
        CellState::Finish
    );
    assert!(matches!(
        session.advance(2),
        Err(Error::InvalidState { .. })
    ));
}

#[test]
fn layout_visited_markers_load_as_unvisited() {
    let session = session_from("Sv\n@F\n");
    assert_eq!(
        session.grid().cell(Position::new(0, 1)).state(),
        CellState::Unvisited
    );
    assert_eq!(
        session.grid().cell(Position::new(1, 0)).state(),
        CellState::Unvisited
    );
    assert_eq!(session.grid().side_length(), 2);
    assert_eq!(session.config().side_length, 2);
}

#[test]
fn queued_cells_are_visible_to_renderers() {
    let mut session = session_from("S..\n...\n..F\n");
    session.advance(1).unwrap();

    assert!(session.is_queued(Position::new(0, 1)));
    assert!(!session.is_queued(Position::new(1, 0)));
    assert_eq!(
        session.grid().cell(Position::new(1, 0)).state(),
        CellState::Current
    );
}
