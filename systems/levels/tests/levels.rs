use colony_siege_board::query;
use colony_siege_core::{Cell, CellRect, Coord};
use colony_siege_system_levels::{builtin_levels, load, Level, LevelError};
use colony_siege_system_session::Zone;

fn rows(stencil: &[&str]) -> Vec<String> {
    stencil.iter().map(|row| (*row).to_string()).collect()
}

#[test]
fn loading_recentres_seeds_around_the_level_centre() {
    let level = Level::new(
        "recentre probe",
        rows(&["#..", "...", "..#"]),
        (1, 1),
        4,
        2,
        Vec::new(),
    );

    let session = load(&level).expect("level loads");
    let board = session.board();

    assert_eq!(board.get(Coord::new(-1, -1)), Cell::Obstacle);
    assert_eq!(board.get(Coord::new(1, 1)), Cell::Obstacle);
    assert_eq!(query::population(board), 2);
    assert_eq!(session.available_cells(), 4);
    assert_eq!(session.lives(), 2);
}

#[test]
fn loading_rejects_seeds_that_leave_the_board_domain() {
    let level = Level::new(
        "broken centre",
        rows(&["#"]),
        (i64::from(i32::MAX) + 2, 0),
        1,
        1,
        Vec::new(),
    );

    match load(&level) {
        Err(LevelError::Coordinate(error)) => {
            assert!(error.x < i64::from(i32::MIN));
        }
        other => panic!("expected a coordinate error, got {other:?}"),
    }
}

#[test]
fn builtin_levels_load_into_playable_sessions() {
    let catalogue = builtin_levels();
    assert!(!catalogue.is_empty());

    for level in &catalogue {
        let session = load(level).unwrap_or_else(|error| {
            panic!("built-in level '{}' failed to load: {error}", level.name())
        });
        assert!(
            query::population(session.board()) > 0,
            "built-in level '{}' seeds no terrain",
            level.name()
        );
        assert!(session.available_cells() > 0);
        assert!(session.lives() > 0);
        assert!(!session.zones().is_empty());
        assert!(!session.game_over());
    }
}

#[test]
fn zone_geometry_survives_the_load() {
    let zone = Zone::new(CellRect::spanning(Coord::new(2, 2), Coord::new(4, 4)), 2);
    let level = Level::new("zone probe", rows(&["#"]), (0, 0), 1, 1, vec![zone]);

    let session = load(&level).expect("level loads");
    assert_eq!(session.zones(), &[zone]);
}
