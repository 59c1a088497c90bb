//! Kalah-MCTS command line driver.
//!
//! ## Usage
//!
//! - `kalah-mcts` - Play one random demo game
//! - `kalah-mcts demo` - Play one random demo game, printing every position
//! - `kalah-mcts playouts` - Run lock-step batched random playouts
//! - `kalah-mcts conform` - Replay random games through both rule implementations
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fastrand::Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kalah_mcts::actions::{action_index_to_name, legal_actions};
use kalah_mcts::batched;
use kalah_mcts::constants::{LEGAL_BUFFER_LEN, N_SLOTS};
use kalah_mcts::outcome::{Outcome, evaluate};
use kalah_mcts::playout::{BatchPlayout, play_random_move};
use kalah_mcts::rules::RuleSet;
use kalah_mcts::sowing::play_move;
use kalah_mcts::state::{PendingBonus, State};

/// Kalah-MCTS: Kalah rules engine for tree search and batched playouts
#[derive(Parser)]
#[command(name = "kalah-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rule variant
    #[arg(long, value_enum, default_value_t = RuleSet::BonusTurn, global = true)]
    rules: RuleSet,

    /// Random seed
    #[arg(long, default_value_t = 1, global = true)]
    seed: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single random game and print every position
    Demo,
    /// Run random playouts from the initial position in lock step
    Playouts {
        /// Number of independent playout slots
        #[arg(long, default_value_t = N_SLOTS)]
        slots: usize,
    },
    /// Replay random games through both rule implementations and compare them
    Conform {
        /// Number of games to replay
        #[arg(long, default_value_t = 1000)]
        games: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Playouts { slots }) => run_playouts(cli.rules, slots, cli.seed),
        Some(Commands::Conform { games }) => run_conform(cli.rules, games, cli.seed),
        Some(Commands::Demo) | None => {
            run_demo(cli.rules, cli.seed);
            Ok(())
        }
    }
}

fn run_demo(rules: RuleSet, seed: u64) {
    println!("Kalah-MCTS: {} ({rules} rules)\n", State::class_repr());

    let mut rng = Rng::with_seed(seed);
    let mut state = State::with_rules(rules);
    println!("{state}");

    loop {
        let outcome = evaluate(&mut state);
        if outcome.is_terminal() {
            println!("{state}");
            println!("Result: {outcome:?} (stores A {} / B {})", state.stores[0], state.stores[1]);
            return;
        }
        let mover = state.turn;
        let passing = state.pending == PendingBonus::Granted;
        match play_random_move(&mut state, &mut rng) {
            Some(_) if passing => println!("{mover} passes\n{state}"),
            Some(action) => {
                println!("{mover} plays {}", action_index_to_name(action));
                println!("{state}");
            }
            None => return,
        }
    }
}

fn run_playouts(rules: RuleSet, slots: usize, seed: u64) -> Result<()> {
    let root = State::with_rules(rules);
    let mut batch = BatchPlayout::new(&root, slots, seed);
    info!(slots, %rules, seed, "starting batched playouts");

    let start = Instant::now();
    let summary = batch.run();
    let elapsed = start.elapsed();

    println!("{summary}");
    println!(
        "{:.0} playouts/s",
        slots as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    Ok(())
}

/// Replay `games` seeded random games move by move through the owned state
/// and the flat buffers, comparing positions after every call.
fn run_conform(rules: RuleSet, games: u64, seed: u64) -> Result<()> {
    for game in 0..games {
        let mut rng = Rng::with_seed(seed.wrapping_add(game));
        let mut state = State::with_rules(rules);
        let mut board = state.board_buffer();
        let mut extra = state.extra_info();
        let mut legal = [0i16; LEGAL_BUFFER_LEN];
        let mut turn = state.turn.sign();
        let mut last_action = 0;

        loop {
            let outcome = evaluate(&mut state);
            let flat = batched::compute_outcome(&mut board, &mut extra, turn, last_action);
            if outcome != Outcome::from_value(flat) {
                bail!("game {game}: outcome {outcome:?} != flat {flat}");
            }
            if State::from_buffers(&board, &extra, turn, rules) != state {
                bail!("game {game}: positions diverged after action {last_action}\n{state}");
            }
            if outcome.is_terminal() {
                debug!(game, ?outcome, "game finished");
                break;
            }

            let actions = legal_actions(&state);
            batched::legal_actions_playout(&board, &extra, turn, &mut legal);
            let count = legal[LEGAL_BUFFER_LEN - 1] as usize;
            let flat_actions: Vec<usize> = legal[..count].iter().map(|&a| a as usize).collect();
            if actions != flat_actions {
                bail!("game {game}: legal sets differ: {actions:?} != {flat_actions:?}");
            }
            if count == 0 {
                bail!("game {game}: no legal action in an ongoing position\n{state}");
            }

            let ord = rng.usize(..count);
            let action = actions[ord];
            play_move(&mut state, action)
                .with_context(|| format!("game {game}: legal action {action} rejected"))?;
            let taken = batched::take_action_playout(
                &mut board,
                &mut extra,
                turn,
                action,
                ord,
                &mut legal,
                rules,
            );
            if !taken {
                bail!("game {game}: flat buffers rejected legal action {action}");
            }
            turn = -turn;
            last_action = action;
        }
    }

    println!("{games} games replayed, both implementations agree");
    Ok(())
}
