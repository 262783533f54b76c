use treasure_hunt::{Command, Direction, Grid, TreasureHunt};

// In this example a short game is played on the map
//  ____
// |B.++|
// |.+..|
// |...T|
//  ____
// where
// - + marks an island
// - B marks the boat
// - T marks the treasure
//
// The boat moves in 8 directions.

fn main() {
    let grid = Grid::from_rows(&["B.++", ".+..", "...T"]).unwrap();
    println!("{}\n", grid);
    let mut game = TreasureHunt::new(grid, 2, 40);
    for command in [
        Command::Sonar,
        Command::Plot,
        Command::Go(Direction::E),
        Command::Go(Direction::SE),
        Command::Go(Direction::SE),
    ] {
        let turn = game.apply(command);
        println!("{:?} -> {:?}", command, turn.event);
        if let treasure_hunt::Event::PathPlotted(plot) = &turn.event {
            println!("{}", plot);
        }
        println!("{}", turn.state);
    }
}
