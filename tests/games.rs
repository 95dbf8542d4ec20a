use tempi::{Chess, Color, Outcome, Play, Role, Square, TwoStep};

fn run(game: &mut Chess, script: &[(Square, Square)]) {
    for &(from, to) in script {
        match game.play(from, to, None) {
            Ok(Play::Completed(_)) => (),
            other => panic!("unexpected result for {from} -> {to}: {other:?}"),
        }
    }
}

fn run_two_step(game: &mut TwoStep, script: &[(Square, Square)]) {
    for &(from, to) in script {
        match game.play(from, to, None) {
            Ok(Play::Completed(_)) => (),
            other => panic!("unexpected result for {from} -> {to}: {other:?}"),
        }
    }
}

#[test]
fn scholars_mate() {
    let mut game = Chess::new();
    run(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::F1, Square::C4),
            (Square::B8, Square::C6),
            (Square::D1, Square::H5),
            (Square::G8, Square::F6),
            (Square::H5, Square::F7),
        ],
    );

    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
    assert_eq!(game.outcome().unwrap().winner(), Some(Color::White));
    assert!(game.in_check(Color::Black));
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.captured(Color::White), &[Role::Pawn]);
}

#[test]
fn both_sides_castle() {
    let mut game = Chess::new();
    run(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
            (Square::G8, Square::F6),
            (Square::F1, Square::C4),
            (Square::F8, Square::C5),
            (Square::E1, Square::G1),
            (Square::E8, Square::G8),
        ],
    );

    assert_eq!(game.board().piece_at(Square::G1), Some(Color::White.king()));
    assert_eq!(game.board().piece_at(Square::F1), Some(Color::White.rook()));
    assert_eq!(game.board().piece_at(Square::G8), Some(Color::Black.king()));
    assert_eq!(game.board().piece_at(Square::F8), Some(Color::Black.rook()));
    assert!(game.board().ever_moved(Square::F1));
    assert!(game.board().ever_moved(Square::F8));

    assert!(!game.in_check(Color::White));
    assert!(!game.in_check(Color::Black));
    assert_eq!(game.ep_square(), None);
    assert_eq!(game.outcome(), None);
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn en_passant_through_the_surface() {
    let mut game = Chess::new();
    run(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
        ],
    );

    // Black double push arms the target for exactly one reply.
    run(&mut game, &[(Square::F7, Square::F5)]);
    assert_eq!(game.ep_square(), Some(Square::F6));
    assert!(game.legal_destinations(Square::E5).contains(Square::F6));

    match game.play(Square::E5, Square::F6, None).unwrap() {
        Play::Completed(m) => {
            assert!(m.is_en_passant());
            assert_eq!(m.capture(), Some(Role::Pawn));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(game.board().piece_at(Square::F5), None);
    assert_eq!(game.board().piece_at(Square::F6), Some(Color::White.pawn()));
}

#[test]
fn two_step_mate_evaluated_at_the_boundary() {
    let mut game = TwoStep::new();
    run_two_step(
        &mut game,
        &[
            // White develops twice per turn.
            (Square::E2, Square::E4),
            (Square::F1, Square::C4),
            (Square::A7, Square::A6),
            (Square::B7, Square::B6),
            (Square::D1, Square::H5),
            (Square::B1, Square::C3),
            (Square::A6, Square::A5),
            (Square::B6, Square::B5),
            // Mate lands on the first half-move; the result is only
            // classified after the turn completes.
            (Square::H5, Square::F7),
        ],
    );
    assert_eq!(game.outcome(), None);

    run_two_step(&mut game, &[(Square::G1, Square::F3)]);
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
    assert!(game.in_check(Color::Black));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn promotion_pauses_and_resumes_the_game() {
    let mut game = Chess::new();
    run(
        &mut game,
        &[
            (Square::H2, Square::H4),
            (Square::G7, Square::G5),
            (Square::H4, Square::G5),
            (Square::G8, Square::F6),
            (Square::G5, Square::G6),
            (Square::F6, Square::E4),
            (Square::G6, Square::G7),
            (Square::E4, Square::C5),
        ],
    );

    assert_eq!(
        game.play(Square::G7, Square::H8, None),
        Ok(Play::PromotionRequired { at: Square::H8 })
    );
    assert_eq!(game.promotion_pending(), Some(Square::H8));
    assert!(game.legal_moves().is_empty());

    let m = game.resolve_promotion(Role::Queen).unwrap();
    assert_eq!(m.capture(), Some(Role::Rook));
    assert_eq!(m.promotion(), Some(Role::Queen));
    assert_eq!(game.board().piece_at(Square::H8), Some(Color::White.queen()));
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.captured(Color::White), &[Role::Pawn, Role::Rook]);
}
