//! Plays a treasure hunt from the command line.
//!
//! Usage:
//!   treasure_hunt --grid map.txt --sonars 3 --range 30 < commands.txt
//!   treasure_hunt                      # built-in map, commands typed on stdin
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use treasure_hunt::{Command, Event, Grid, TreasureHunt, DEFAULT_MAP};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid file with one row per line over `.`, `+`, `B` and `T`
    #[arg(short, long)]
    grid: Option<PathBuf>,

    /// Number of sonars the boat carries
    #[arg(short, long, default_value_t = 3)]
    sonars: u32,

    /// Sonar range in octile units (10 per straight step, 14 per diagonal step)
    #[arg(short, long, default_value_t = 30)]
    range: u32,

    /// File of commands to play instead of reading stdin
    #[arg(short, long)]
    commands: Option<PathBuf>,
}

fn describe(event: &Event) -> String {
    match event {
        Event::Moved(p) => format!("Boat sails to ({}, {})", p.x, p.y),
        Event::Blocked => "Cannot sail there".to_owned(),
        Event::SonarMiss { remaining } => {
            format!("Sonar finds nothing ({} left)", remaining)
        }
        Event::TreasureDetected {
            remaining,
            path_cost: Some(cost),
        } => format!(
            "Sonar detects the treasure, shortest route costs {} ({} sonars left)",
            cost, remaining
        ),
        Event::TreasureDetected {
            remaining,
            path_cost: None,
        } => format!(
            "Sonar detects the treasure but no route leads there ({} sonars left)",
            remaining
        ),
        Event::SonarsExhausted => "No sonars left".to_owned(),
        Event::PathPlotted(plot) => plot.clone(),
        Event::NoPathAvailable => "No path available".to_owned(),
        Event::Quit => "Giving up".to_owned(),
        Event::Ignored => "The game is over".to_owned(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let grid = match &args.grid {
        Some(path) => {
            Grid::open(path).with_context(|| format!("loading grid {}", path.display()))?
        }
        None => Grid::from_rows(&DEFAULT_MAP)?,
    };
    println!("{}\n", grid);
    let mut game = TreasureHunt::new(grid, args.sonars, args.range);

    let input: Box<dyn BufRead> = match &args.commands {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                let turn = game.apply(command);
                println!("{}\n{}", describe(&turn.event), turn.state);
            }
            Err(e) => {
                warn!("{}", e);
                println!("{}", game.state());
            }
        }
        if game.state().is_terminal() {
            break;
        }
    }
    Ok(())
}
