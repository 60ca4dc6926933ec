use anyhow::{Context, Result};
use chess_agents::{is_endgame, Agent, Evaluatable, MinimaxAgent, DEFAULT_DEPTH};
use chess_core::{perft, perft_detailed, perft_divide, Board, Color, GameStatus};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess rules engine and minimax player", long_about = None)]
struct Cli {
    /// Log search details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree from the starting position
    Perft {
        depth: u8,
        /// Show the node count under each root move
        #[arg(long)]
        divide: bool,
        /// Break leaf moves down by kind
        #[arg(long, conflicts_with = "divide")]
        detailed: bool,
    },
    /// Pick a move for the side to move after the given moves
    Best {
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        /// Seed for the tie-break between equal moves
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Moves in coordinate notation, e.g. e2e4 e7e5
        moves: Vec<String>,
    },
    /// Static evaluation of the position after the given moves
    Eval { moves: Vec<String> },
    /// Let the engine play both sides
    Selfplay {
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Replays coordinate moves from the starting position.
fn board_after(moves: &[String]) -> Result<Board> {
    let mut board = Board::starting_position();
    for (ply, text) in moves.iter().enumerate() {
        let mv = board
            .parse_move(text)
            .with_context(|| format!("move {} ({text})", ply + 1))?;
        board.make_move(mv)?;
    }
    Ok(board)
}

fn agent(side: Color, depth: u8, seed: Option<u64>) -> MinimaxAgent {
    match seed {
        Some(seed) => MinimaxAgent::seeded(side, depth, seed),
        None => MinimaxAgent::new(side, depth),
    }
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing { in_check: true } => "check".to_string(),
        GameStatus::Ongoing { in_check: false } => "ongoing".to_string(),
        GameStatus::Checkmate { winner } => format!("checkmate, {winner} wins"),
        GameStatus::Stalemate => "stalemate".to_string(),
        GameStatus::Draw => "draw by insufficient material".to_string(),
    }
}

fn run_perft(depth: u8, divide: bool, detailed: bool) {
    let board = Board::starting_position();
    let start = Instant::now();

    let nodes = if divide {
        let results = perft_divide(&board, depth);
        for (mv, count) in &results {
            println!("{mv}: {count}");
        }
        results.iter().map(|(_, count)| count).sum()
    } else if detailed {
        let results = perft_detailed(&board, depth);
        println!("Captures: {}", results.captures);
        println!("En passant: {}", results.en_passants);
        println!("Castles: {}", results.castles);
        println!("Promotions: {}", results.promotions);
        println!("Checks: {}", results.checks);
        println!("Checkmates: {}", results.checkmates);
        results.nodes
    } else {
        perft(&board, depth)
    };

    let elapsed = start.elapsed();
    println!("\nNodes: {nodes}");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64().max(1e-9));
}

fn run_best(depth: u8, seed: Option<u64>, as_json: bool, moves: &[String]) -> Result<()> {
    let board = board_after(moves)?;
    let side = board.current_turn();
    let mut engine = agent(side, depth, seed);

    let start = Instant::now();
    let result = engine.search(&board);
    let elapsed = start.elapsed();

    if as_json {
        let value = json!({
            "side": side.to_string(),
            "best_move": result.best_move.is_valid().then(|| result.best_move.to_string()),
            "move": result.best_move,
            "score": result.score,
            "depth": result.depth,
            "nodes": result.nodes,
            "candidates": result.candidates.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
            "status": board.status(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{board}\n");
    if !result.best_move.is_valid() {
        println!("No legal moves: {}", describe(board.status()));
        return Ok(());
    }
    println!("Best move: {}", result.best_move);
    println!("Score: {} cp", result.score);
    println!("Depth: {}", result.depth);
    println!("Nodes: {}", result.nodes);
    println!("Tied candidates: {}", result.candidates.len());
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_eval(moves: &[String]) -> Result<()> {
    let board = board_after(moves)?;
    println!("{board}\n");
    println!("{} to move ({})", board.current_turn(), describe(board.status()));
    println!(
        "Phase: {}",
        if is_endgame(&board) { "endgame" } else { "middlegame" }
    );
    println!(
        "Evaluation: {} cp (+ = White, - = Black)",
        board.evaluate(Color::White)
    );
    Ok(())
}

fn run_selfplay(depth: u8, seed: Option<u64>, max_plies: usize) -> Result<()> {
    let mut board = Board::starting_position();
    let mut white = agent(Color::White, depth, seed);
    let mut black = agent(Color::Black, depth, seed.map(|s| s.wrapping_add(1)));
    info!(white = white.name(), black = black.name(), max_plies, "self-play");

    let mut played = Vec::new();
    while played.len() < max_plies && !board.status().is_over() {
        let engine = match board.current_turn() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(mv) = engine.best_move(&board) else {
            break;
        };
        board.make_move(mv)?;
        info!(ply = played.len() + 1, %mv, "played");
        played.push(mv.to_string());
    }

    for (i, pair) in played.chunks(2).enumerate() {
        println!("{}. {}", i + 1, pair.join(" "));
    }
    println!("\n{board}\n");
    println!("Result: {}", describe(board.status()));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Perft {
            depth,
            divide,
            detailed,
        } => run_perft(depth, divide, detailed),
        Command::Best {
            depth,
            seed,
            json,
            moves,
        } => run_best(depth, seed, json, &moves)?,
        Command::Eval { moves } => run_eval(&moves)?,
        Command::Selfplay {
            depth,
            seed,
            max_plies,
        } => run_selfplay(depth, seed, max_plies)?,
    }

    Ok(())
}
