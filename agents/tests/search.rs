use chess_agents::search::CHECKMATE_SCORE;
use chess_agents::{search, Agent, MinimaxAgent, DEFAULT_DEPTH};
use chess_core::{Board, Color, Move, MoveKind, PieceKind, Square};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(moves: &[&str]) -> Board {
    let mut board = Board::starting_position();
    for text in moves {
        let mv = board.parse_move(text).unwrap();
        board.make_move(mv).unwrap();
    }
    board
}

#[test]
fn only_legal_move_is_chosen_at_every_depth() {
    // Black king in check from the rook, with a single flight square.
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::Black, sq("h8"));
    board.place(PieceKind::Pawn, Color::Black, sq("h7"));
    board.place(PieceKind::King, Color::White, sq("e1"));
    board.place(PieceKind::Rook, Color::White, sq("a8"));
    board.set_turn(Color::Black);

    let legal = board.legal_moves(Color::Black);
    assert_eq!(legal, vec![Move::new(sq("h8"), sq("g7"), MoveKind::Normal)]);

    for depth in 1..=4 {
        let mut agent = MinimaxAgent::seeded(Color::Black, depth, u64::from(depth));
        assert_eq!(agent.get_best_move(&board), legal[0], "depth {depth}");
    }
}

#[test]
fn finds_scholars_mate() {
    let board = play(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"]);
    let mut agent = MinimaxAgent::seeded(Color::White, 2, 0);

    let result = agent.search(&board);
    assert_eq!(result.best_move, board.parse_move("h5f7").unwrap());
    assert_eq!(result.score, CHECKMATE_SCORE - 1);
}

#[test]
fn defends_against_mate_in_one() {
    // Black to move after 1.e4 e5 2.Bc4 Nc6 3.Qh5: Qxf7# is threatened.
    let board = play(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5"]);
    let mut agent = MinimaxAgent::seeded(Color::Black, 2, 5);

    let mv = agent.get_best_move(&board);
    let mut after = board.clone();
    after.make_move(mv).unwrap();
    let threat = after.parse_move("h5f7").ok();
    let mated = threat.is_some_and(|t| {
        let mut next = after.clone();
        next.make_move(t).unwrap();
        next.is_checkmate(Color::Black)
    });
    assert!(!mated, "{mv} allows Qxf7#");
}

#[test]
fn checkmated_side_gets_invalid_move() {
    let board = play(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    let mut agent = MinimaxAgent::seeded(Color::White, DEFAULT_DEPTH, 1);

    assert_eq!(agent.get_best_move(&board), Move::INVALID);
    assert_eq!(agent.best_move(&board), None);
}

#[test]
fn tie_break_uses_injected_rng() {
    let board = Board::starting_position();
    let mut a = StdRng::seed_from_u64(11);
    let mut b = StdRng::seed_from_u64(11);

    let first = search(&board, Color::White, 1, &mut a);
    let second = search(&board, Color::White, 1, &mut b);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.candidates, second.candidates);
    assert!(first.candidates.contains(&first.best_move));
}

#[test]
fn tied_moves_are_all_reachable() {
    // Bare kings: every king move scores zero.
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, sq("e1"));
    board.place(PieceKind::King, Color::Black, sq("e8"));

    let mut seen = Vec::new();
    for seed in 0..64 {
        let mut agent = MinimaxAgent::seeded(Color::White, 2, seed);
        let mv = agent.get_best_move(&board);
        if !seen.contains(&mv) {
            seen.push(mv);
        }
    }
    assert_eq!(seen.len(), board.legal_moves(Color::White).len());
}

#[test]
fn promotes_to_win() {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, sq("a1"));
    board.place(PieceKind::King, Color::Black, sq("h1"));
    board.place(PieceKind::Pawn, Color::White, sq("c7"));

    let mut agent = MinimaxAgent::seeded(Color::White, 2, 9);
    let mv = agent.get_best_move(&board);
    assert!(mv.is_promotion(), "{mv}");
    assert_eq!(mv.promotion, PieceKind::Queen);
}
