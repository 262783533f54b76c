//! The game: a [Grid] plus a limited supply of sonars, driven by text commands.
use core::fmt;
use std::path::Path;
use std::str::FromStr;

use grid_util::point::Point;
use log::{debug, info};

use crate::direction::Direction;
use crate::error::{CommandError, GridError};
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Started,
    Won,
    Over,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Started
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            GameState::Started => "STARTED",
            GameState::Won => "WON",
            GameState::Over => "OVER",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Go(Direction),
    Sonar,
    Plot,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parses `GO <dir>`, `SONAR`, `PLOT` or `QUIT`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_uppercase();
        let command = match verb.as_str() {
            "GO" => Command::Go(words.next().ok_or(CommandError::MissingDirection)?.parse()?),
            "SONAR" => Command::Sonar,
            "PLOT" => Command::Plot,
            "QUIT" => Command::Quit,
            _ => return Err(CommandError::UnknownCommand(s.trim().to_owned())),
        };
        match words.next() {
            Some(_) => Err(CommandError::UnknownCommand(s.trim().to_owned())),
            None => Ok(command),
        }
    }
}

/// What a command did, for the caller to present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Moved(Point),
    Blocked,
    SonarMiss { remaining: u32 },
    TreasureDetected { remaining: u32, path_cost: Option<u32> },
    SonarsExhausted,
    PathPlotted(String),
    NoPathAvailable,
    Quit,
    /// The game had already ended; nothing happened.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub state: GameState,
    pub event: Event,
}

/// Shortest path last computed from `origin` to the treasure.
#[derive(Clone, Copy, Debug)]
struct ResolvedPath {
    origin: Point,
    cost: Option<u32>,
}

/// One game session. The treasure position stays hidden until a sonar ping detects it;
/// from then on the shortest path to it can be plotted and reaching it wins the game.
#[derive(Clone, Debug)]
pub struct TreasureHunt {
    grid: Grid,
    sonars_remaining: u32,
    sonar_range: u32,
    state: GameState,
    treasure_found: bool,
    path: Option<ResolvedPath>,
}

impl TreasureHunt {
    /// Starts a game with `sonars` pings, each detecting the treasure within `sonar_range`
    /// (octile distance, 10 per straight step). A range of 0 is allowed and only detects the
    /// treasure from its own cell.
    pub fn new(grid: Grid, sonars: u32, sonar_range: u32) -> TreasureHunt {
        TreasureHunt {
            grid,
            sonars_remaining: sonars,
            sonar_range,
            state: GameState::Started,
            treasure_found: false,
            path: None,
        }
    }

    /// Starts a game on the map stored at `path`.
    pub fn open<P: AsRef<Path>>(
        path: P,
        sonars: u32,
        sonar_range: u32,
    ) -> Result<TreasureHunt, GridError> {
        Ok(TreasureHunt::new(Grid::open(path)?, sonars, sonar_range))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn state(&self) -> GameState {
        self.state
    }
    pub fn sonars_remaining(&self) -> u32 {
        self.sonars_remaining
    }
    pub fn sonar_range(&self) -> u32 {
        self.sonar_range
    }
    pub fn treasure_found(&self) -> bool {
        self.treasure_found
    }
    /// Whether a shortest path to the treasure has been resolved, which `PLOT` requires.
    pub fn path_ready(&self) -> bool {
        self.path.is_some_and(|p| p.cost.is_some())
    }

    /// Parses and applies one command, returning the state of the game afterwards.
    /// A `GO` in an unknown direction is ignored like any other impossible move.
    pub fn process_command(&mut self, input: &str) -> Result<GameState, CommandError> {
        match input.parse::<Command>() {
            Ok(command) => Ok(self.apply(command).state),
            Err(CommandError::UnknownDirection(dir)) => {
                debug!("Ignoring move in unknown direction {:?}", dir);
                Ok(self.state)
            }
            Err(e) => Err(e),
        }
    }

    pub fn apply(&mut self, command: Command) -> Turn {
        if self.state.is_terminal() {
            return self.turn(Event::Ignored);
        }
        let event = match command {
            Command::Go(direction) => self.go(direction),
            Command::Sonar => self.sonar(),
            Command::Plot => self.plot(),
            Command::Quit => {
                self.state = GameState::Over;
                Event::Quit
            }
        };
        if self.treasure_found && self.grid.boat_pos() == self.grid.treasure_pos() {
            info!("Treasure reached at {}", self.grid.treasure_pos());
            self.state = GameState::Won;
        }
        self.turn(event)
    }

    fn turn(&self, event: Event) -> Turn {
        Turn {
            state: self.state,
            event,
        }
    }

    fn go(&mut self, direction: Direction) -> Event {
        if self.grid.move_boat(direction) {
            Event::Moved(self.grid.boat_pos())
        } else {
            Event::Blocked
        }
    }

    fn sonar(&mut self) -> Event {
        if self.sonars_remaining == 0 {
            info!("No sonars left");
            self.state = GameState::Over;
            return Event::SonarsExhausted;
        }
        self.sonars_remaining -= 1;
        let remaining = self.sonars_remaining;
        if self.grid.get_treasure(self.sonar_range).is_some() {
            self.treasure_found = true;
            let path_cost = self.resolve_path();
            Event::TreasureDetected {
                remaining,
                path_cost,
            }
        } else {
            if remaining == 0 && !self.treasure_found {
                info!("Last sonar spent without finding the treasure");
                self.state = GameState::Over;
            }
            Event::SonarMiss { remaining }
        }
    }

    fn plot(&mut self) -> Event {
        if !self.treasure_found {
            return Event::NoPathAvailable;
        }
        let boat = self.grid.boat_pos();
        if self.path.map(|p| p.origin) != Some(boat) {
            self.resolve_path();
        }
        if !self.path_ready() {
            return Event::NoPathAvailable;
        }
        Event::PathPlotted(self.grid.plot_path(boat, self.grid.treasure_pos()))
    }

    /// Runs the search from the boat's current position.
    fn resolve_path(&mut self) -> Option<u32> {
        let origin = self.grid.boat_pos();
        let cost = match self.grid.find_path(origin, self.grid.treasure_pos()) {
            Ok(cost) => Some(cost),
            Err(e) => {
                info!("{}", e);
                None
            }
        };
        self.path = Some(ResolvedPath { origin, cost });
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunt(rows: &[&str], sonars: u32, range: u32) -> TreasureHunt {
        TreasureHunt::new(Grid::from_rows(rows).unwrap(), sonars, range)
    }

    #[test]
    fn parses_commands() {
        assert_eq!("GO NE".parse::<Command>(), Ok(Command::Go(Direction::NE)));
        assert_eq!("  go  s ".parse::<Command>(), Ok(Command::Go(Direction::S)));
        assert_eq!("SONAR".parse::<Command>(), Ok(Command::Sonar));
        assert_eq!("plot".parse::<Command>(), Ok(Command::Plot));
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("GO".parse::<Command>(), Err(CommandError::MissingDirection));
        assert_eq!(
            "GO UP".parse::<Command>(),
            Err(CommandError::UnknownDirection("UP".to_owned()))
        );
        assert_eq!(
            "DIVE".parse::<Command>(),
            Err(CommandError::UnknownCommand("DIVE".to_owned()))
        );
        assert_eq!(
            "SONAR SONAR".parse::<Command>(),
            Err(CommandError::UnknownCommand("SONAR SONAR".to_owned()))
        );
    }

    #[test]
    fn state_labels() {
        assert_eq!(GameState::Started.to_string(), "STARTED");
        assert_eq!(GameState::Won.to_string(), "WON");
        assert_eq!(GameState::Over.to_string(), "OVER");
    }

    #[test]
    fn sonar_without_supply_ends_game_untouched() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 0, 100);
        let before = game.grid().to_string();
        assert_eq!(game.process_command("SONAR"), Ok(GameState::Over));
        assert_eq!(game.grid().to_string(), before);
        assert!(!game.treasure_found());
    }

    #[test]
    fn plot_before_detection_reports_no_path() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 2, 10);
        let turn = game.apply(Command::Plot);
        assert_eq!(turn.state, GameState::Started);
        assert_eq!(turn.event, Event::NoPathAvailable);
    }

    #[test]
    fn sonar_then_plot() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 2, 40);
        let turn = game.apply(Command::Sonar);
        assert_eq!(
            turn.event,
            Event::TreasureDetected {
                remaining: 1,
                path_cost: Some(38)
            }
        );
        assert!(game.path_ready());
        let turn = game.apply(Command::Plot);
        assert_eq!(turn.event, Event::PathPlotted("B*++\n.+*.\n...T".to_owned()));
        assert_eq!(turn.state, GameState::Started);
    }

    #[test]
    fn last_sonar_miss_ends_game() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 2, 10);
        assert_eq!(
            game.apply(Command::Sonar),
            Turn {
                state: GameState::Started,
                event: Event::SonarMiss { remaining: 1 }
            }
        );
        assert_eq!(game.process_command("SONAR"), Ok(GameState::Over));
        // Terminal: further commands change nothing.
        assert_eq!(game.apply(Command::Go(Direction::E)).event, Event::Ignored);
        assert_eq!(game.grid().boat_pos(), Point::new(0, 0));
    }

    #[test]
    fn reaching_found_treasure_wins() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 1, 40);
        assert_eq!(game.process_command("SONAR"), Ok(GameState::Started));
        for (cmd, state) in [
            ("GO E", GameState::Started),
            ("GO SE", GameState::Started),
            ("GO SE", GameState::Won),
        ] {
            assert_eq!(game.process_command(cmd), Ok(state));
        }
        assert_eq!(game.process_command("QUIT"), Ok(GameState::Won));
    }

    #[test]
    fn sailing_over_undetected_treasure_does_not_win() {
        let mut game = hunt(&["BT."], 1, 0);
        assert_eq!(game.process_command("GO E"), Ok(GameState::Started));
        assert_eq!(game.process_command("GO E"), Ok(GameState::Started));
        assert_eq!(game.process_command("GO W"), Ok(GameState::Started));
        // Sonar on top of the treasure detects it at distance zero.
        assert_eq!(game.process_command("SONAR"), Ok(GameState::Won));
    }

    #[test]
    fn zero_range_sonar_only_detects_underneath() {
        let mut game = hunt(&["BT"], 2, 0);
        assert_eq!(
            game.apply(Command::Sonar),
            Turn {
                state: GameState::Started,
                event: Event::SonarMiss { remaining: 1 }
            }
        );
        assert!(!game.treasure_found());
        assert_eq!(
            game.apply(Command::Go(Direction::E)).event,
            Event::Moved(Point::new(1, 0))
        );
        assert_eq!(
            game.apply(Command::Sonar),
            Turn {
                state: GameState::Won,
                event: Event::TreasureDetected {
                    remaining: 0,
                    path_cost: Some(0)
                }
            }
        );
    }

    #[test]
    fn plot_after_moving_starts_from_boat() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 1, 40);
        game.apply(Command::Sonar);
        game.apply(Command::Go(Direction::E));
        let turn = game.apply(Command::Plot);
        assert_eq!(turn.event, Event::PathPlotted(".B++\n.+*.\n...T".to_owned()));
    }

    #[test]
    fn unreachable_treasure_cannot_be_plotted() {
        let mut game = hunt(&["B+.", "++.", "..T"], 1, 100);
        let turn = game.apply(Command::Sonar);
        assert_eq!(
            turn.event,
            Event::TreasureDetected {
                remaining: 0,
                path_cost: None
            }
        );
        assert_eq!(turn.state, GameState::Started);
        assert_eq!(game.apply(Command::Plot).event, Event::NoPathAvailable);
    }

    #[test]
    fn unknown_direction_is_ignored_and_unknown_verb_is_error() {
        let mut game = hunt(&["B.++", ".+..", "...T"], 1, 10);
        assert_eq!(game.process_command("GO UP"), Ok(GameState::Started));
        assert_eq!(game.grid().boat_pos(), Point::new(0, 0));
        assert!(game.process_command("FLY").is_err());
        assert_eq!(game.process_command("QUIT"), Ok(GameState::Over));
    }
}
