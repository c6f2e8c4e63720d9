#![warn(clippy::pedantic)]

mod config;
mod entry;

use std::{io, path::PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::owo_colors::OwoColorize;
use env_logger::TimestampPrecision;
use fastrand::Rng;
use itertools::Itertools;
use layercube::{
    CubeState, LayerSolver, Solution, Stage,
    notation::{self, Turn},
    scramble::{random_moves, scrambled},
};
use log::{LevelFilter, info};

use crate::config::Config;

/// Solves a 3x3x3 cube layer by layer
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file to use, in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube and print the moves stage by stage
    Solve {
        #[command(flatten)]
        source: Source,
        /// Print every turn as a sentence instead of compact notation
        #[arg(long)]
        spell_out: bool,
    },
    /// Print a random scramble
    Scramble {
        /// Seed for the random turns; random if omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Number of quarter turns to draw
        #[arg(long)]
        length: Option<usize>,
    },
}

/// Where the cube to solve comes from. Defaults to a random scramble.
#[derive(Args)]
#[group(multiple = false)]
struct Source {
    /// Scramble a solved cube with these moves, e.g. "W G' O2"
    #[arg(long, value_name = "MOVES")]
    scramble: Option<String>,
    /// Read the cube from a TOML state file
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,
    /// Describe the cube interactively, one sticker at a time
    #[arg(long)]
    manual: bool,
    /// Seed for a random scramble
    #[arg(long)]
    seed: Option<u64>,
}

impl Source {
    fn into_state(self, config: &Config) -> color_eyre::Result<CubeState> {
        if let Some(moves) = self.scramble {
            let mut state = CubeState::solved();
            state.apply_moves(notation::parse(&moves)?);
            return Ok(state);
        }
        if let Some(path) = self.state {
            return entry::read_state_file(&path);
        }
        if self.manual {
            return entry::prompt_state(&mut io::stdin().lock(), &mut io::stdout());
        }

        let seed = self.seed.unwrap_or_else(|| fastrand::u64(..));
        let (moves, state) = scrambled(seed, config.scramble_length);
        println!(
            "{} {}",
            format!("Scramble (seed {seed}):").bold(),
            notation::format_compact(&moves)
        );
        Ok(state)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    info!("Using {config:?}");

    match cli.command {
        Commands::Solve { source, spell_out } => {
            let mut state = source.into_state(&config)?;
            print_unsolved(&state);

            let solution = LayerSolver::new()
                .with_max_stage_iterations(config.max_stage_iterations)
                .solve(&mut state)?;
            print_solution(&solution, spell_out || config.spell_out);
        }
        Commands::Scramble { seed, length } => {
            let seed = seed.unwrap_or_else(|| fastrand::u64(..));
            info!("Scrambling with seed {seed}");
            let moves = random_moves(
                &mut Rng::with_seed(seed),
                length.unwrap_or(config.scramble_length),
            );
            println!("{}", notation::format_compact(&moves));
        }
    }

    Ok(())
}

fn print_unsolved(state: &CubeState) {
    let unsolved = state.unsolved().collect_vec();
    if unsolved.is_empty() {
        println!("{}", "The cube is already solved".green());
        return;
    }
    println!("{}", format!("{} pieces out of place:", unsolved.len()).bold());
    for (position, occupant) in unsolved {
        println!("  {position} holds {occupant}");
    }
}

fn print_solution(solution: &Solution, spell_out: bool) {
    for stage in Stage::ALL {
        let batches = solution
            .batches()
            .iter()
            .filter(|batch| batch.stage == stage)
            .collect_vec();
        let quarter_turns: usize = batches.iter().map(|batch| batch.moves.len()).sum();
        println!();
        println!(
            "{} {}",
            stage.bold(),
            format!("({quarter_turns} quarter turns)").dimmed()
        );
        if batches.is_empty() {
            println!("  Nothing to do");
        }

        for batch in batches {
            let turns = notation::compress(&batch.moves);
            let prefix = if batch.auxiliary { "  setup: " } else { "  " };
            if spell_out {
                for turn in &turns {
                    println!("{prefix}{}", Turn::describe(turn));
                }
            } else {
                println!("{prefix}{}", turns.iter().join(" "));
            }
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "Solved in {} quarter turns ({} turns in compact notation)",
            solution.len(),
            notation::compress(&solution.moves().collect_vec()).len()
        )
        .green()
    );
}
