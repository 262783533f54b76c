use std::fs;

use grid_util::point::Point;
use treasure_hunt::{
    Direction, GameState, Grid, GridError, Node, TreasureHunt, DEFAULT_MAP,
};

const SMALL: [&str; 3] = ["B.++", ".+..", "...T"];

#[test]
fn move_south() {
    let mut grid = Grid::from_rows(&SMALL).unwrap();
    grid.move_boat(Direction::S);
    assert_eq!(grid.boat_pos(), Point::new(0, 1));
    assert_eq!(grid.text_rows(), vec!["..++", "B+..", "...T"]);
}

#[test]
fn plot_small_grid() {
    let mut grid = Grid::from_rows(&SMALL).unwrap();
    let (boat, treasure) = (grid.boat_pos(), grid.treasure_pos());
    grid.find_path(boat, treasure).unwrap();
    let plot = grid.plot_path(boat, treasure);
    assert_eq!(plot.lines().collect::<Vec<_>>(), vec!["B*++", ".+*.", "...T"]);
}

/// Sailing somewhere and back again returns to the starting cell.
#[test]
fn move_and_back() {
    let mut grid = Grid::from_rows(&DEFAULT_MAP).unwrap();
    let start = grid.boat_pos();
    for d in Direction::ALL {
        if grid.move_boat(d) {
            assert!(grid.move_boat(d.opposite()));
        }
        assert_eq!(grid.boat_pos(), start);
    }
    assert_eq!(grid.text_rows(), DEFAULT_MAP);
}

#[test]
fn check_valid_move_everywhere() {
    let grid = Grid::from_rows(&DEFAULT_MAP).unwrap();
    for x in -2..9 {
        for y in -2..7 {
            let inside = (0..7).contains(&x) && (0..5).contains(&y);
            let expected = inside && DEFAULT_MAP[y as usize].as_bytes()[x as usize] != b'+';
            assert_eq!(grid.check_valid_move(x, y), expected, "({x}, {y})");
        }
    }
}

#[test]
fn distance_symmetry() {
    let grid = Grid::from_rows(&DEFAULT_MAP).unwrap();
    let nodes: Vec<Node> = (0..7)
        .flat_map(|x| (0..5).map(move |y| Point::new(x, y)))
        .filter_map(|p| grid.node(p))
        .collect();
    for a in &nodes {
        for b in &nodes {
            assert_eq!(a.distance(b), b.distance(a));
        }
    }
}

#[test]
fn default_map_path() {
    let mut grid = Grid::from_rows(&DEFAULT_MAP).unwrap();
    let (boat, treasure) = (grid.boat_pos(), grid.treasure_pos());
    let cost = grid.find_path(boat, treasure).unwrap();
    // (3, 1) -> (2, 2) -> (2, 3) -> (1, 4)
    assert_eq!(cost, 14 + 10 + 14);
    let path = grid.retrace_path(boat, treasure);
    assert_eq!(path.len(), 4);
}

#[test]
fn empty_sonar_leaves_grid_alone() {
    let mut game = TreasureHunt::new(Grid::from_rows(&SMALL).unwrap(), 0, 50);
    assert_eq!(game.process_command("SONAR"), Ok(GameState::Over));
    assert_eq!(game.grid().text_rows(), SMALL);
    assert_eq!(game.sonars_remaining(), 0);
}

#[test]
fn full_game_from_file() {
    let path = std::env::temp_dir().join("treasure_hunt_full_game.txt");
    fs::write(&path, DEFAULT_MAP.join("\n")).unwrap();
    let mut game = TreasureHunt::open(&path, 2, 20).unwrap();
    fs::remove_file(&path).ok();

    let script = [
        ("SONAR", GameState::Started),
        ("GO SW", GameState::Started),
        ("GO S", GameState::Started),
        ("SONAR", GameState::Started),
        ("PLOT", GameState::Started),
        ("GO SW", GameState::Won),
    ];
    for (command, state) in script {
        assert_eq!(game.process_command(command), Ok(state), "{command}");
    }
    assert!(game.treasure_found());
    assert_eq!(game.sonars_remaining(), 0);
}

#[test]
fn missing_file_is_io_error() {
    let missing = std::env::temp_dir().join("treasure_hunt_no_such_map.txt");
    assert!(matches!(
        TreasureHunt::open(&missing, 1, 1),
        Err(GridError::Io(_))
    ));
}
