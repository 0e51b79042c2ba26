use sweeper_core::*;

fn seeded(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Board {
    Board::with_seed(&GameConfig::new(width, height, mines).unwrap(), seed).unwrap()
}

fn layout_board(width: Coord, height: Coord, mines: &[Coord2]) -> Board {
    Board::from_layout(&MineLayout::from_mine_coords(Bounds::new(width, height), mines).unwrap())
}

#[test]
fn square_and_rectangular_dimensions() {
    let square = Board::square(10).unwrap();
    assert_eq!((square.width(), square.height()), (10, 10));
    assert_eq!(square.mine_count(), 10);

    let rect = Board::with_default_mines(20, 10).unwrap();
    assert_eq!((rect.width(), rect.height()), (20, 10));
    assert_eq!(rect.mine_count(), 20);

    let custom = Board::new(20, 10, 2).unwrap();
    assert_eq!(custom.mine_count(), 2);
}

#[test]
fn invalid_dimensions_are_rejected() {
    assert_eq!(
        Board::new(0, 4, 1).unwrap_err(),
        BoardError::InvalidDimensions {
            width: 0,
            height: 4
        }
    );
    assert!(Board::new(4, -1, 1).is_err());
    assert!(Board::square(0).is_err());
}

#[test]
fn fresh_board_answers_empty() {
    let mut board = seeded(5, 4, 3, 1);

    for y in -1..=4 {
        for x in -1..=5 {
            assert!(!board.is_mine(x, y).unwrap());
            assert!(!board.is_uncovered(x, y).unwrap());
            assert!(!board.is_flagged(x, y).unwrap());
        }
    }

    let before = board.clone();
    board.toggle_flag(2, 2).unwrap();
    board.toggle_flag(9, 9).unwrap();
    assert_eq!(board, before);
    assert!(!board.is_initialized());
}

#[test]
fn first_reveal_is_always_safe() {
    for seed in 0..100 {
        // dense enough that an unprotected first move would regularly hit a mine
        let mut board = seeded(4, 4, 12, seed);
        let x = (seed % 4) as Coord;
        let y = (seed / 4 % 4) as Coord;

        board.reveal(x, y).unwrap();

        assert!(board.is_initialized());
        assert!(board.is_uncovered(x, y).unwrap(), "seed {seed}");
        assert!(!board.is_mine(x, y).unwrap(), "seed {seed}");
    }
}

#[test]
fn mine_count_matches_request() {
    for seed in 0..32 {
        let config = GameConfig::new(20, 10, 2)
            .unwrap()
            .with_placement(Placement::Exact);
        let mut board = Board::with_seed(&config, seed).unwrap();
        board.reveal(0, 0).unwrap();

        let mines = board
            .bounds()
            .iter_coords()
            .filter(|&(x, y)| board.is_mine(x, y).unwrap())
            .count();
        assert_eq!(mines, 2);
    }
}

#[test]
fn rejection_placement_never_exceeds_request() {
    let counts: Vec<_> = (0..32)
        .map(|seed| {
            let mut board = seeded(20, 10, 2, seed);
            board.reveal(0, 0).unwrap();
            board.placed_mines()
        })
        .collect();

    assert!(counts.iter().all(|&count| (1..=2).contains(&count)));
    assert!(counts.contains(&2));
}

#[test]
fn adjacent_counts_match_neighboring_mines() {
    let mut board = seeded(12, 9, 25, 77);
    board.reveal(6, 4).unwrap();

    for (x, y) in board.bounds().iter_coords() {
        let cell = board.cell_state(x, y).unwrap();
        if cell.mine {
            assert_eq!(cell.adjacent, 0);
            continue;
        }

        let mut expected = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) == (0, 0) {
                    continue;
                }
                if let Ok(true) = board.is_mine(x + dx, y + dy) {
                    expected += 1;
                }
            }
        }
        assert_eq!(cell.adjacent, expected, "cell ({x}, {y})");
    }
}

#[test]
fn reveal_is_idempotent() {
    let mut board = seeded(8, 8, 10, 5);
    board.reveal(3, 3).unwrap();

    let before = board.clone();
    board.reveal(3, 3).unwrap();

    assert_eq!(board, before);
}

#[test]
fn flag_toggles_back_and_forth() {
    let mut board = layout_board(5, 5, &[(4, 4)]);
    board.reveal(3, 3).unwrap();

    board.toggle_flag(1, 4).unwrap();
    assert!(board.is_flagged(1, 4).unwrap());
    board.toggle_flag(1, 4).unwrap();
    assert!(!board.is_flagged(1, 4).unwrap());

    // not prevented by the board itself
    board.toggle_flag(3, 3).unwrap();
    assert!(board.is_flagged(3, 3).unwrap());
    board.reveal(3, 3).unwrap();
    assert!(board.is_uncovered(3, 3).unwrap());
}

#[test]
fn reveal_all_mines_only_touches_mines() {
    let mines = [(0, 0), (3, 1), (2, 3)];
    let mut board = layout_board(4, 4, &mines);
    board.reveal(3, 3).unwrap();
    let before = board.clone();

    board.reveal_all_mines();

    for (coords, cell) in board.iter_cells() {
        if cell.mine {
            assert!(cell.uncovered, "mine {coords:?}");
        } else {
            let (x, y) = coords;
            assert_eq!(cell.uncovered, before.is_uncovered(x, y).unwrap());
        }
    }
}

#[test]
fn win_condition_needs_every_safe_cell() {
    let mut board = layout_board(5, 5, &[(0, 0), (4, 4)]);

    board.reveal(1, 1).unwrap();
    assert!(!board.all_safe_cells_uncovered());

    for (x, y) in board.bounds().iter_coords() {
        if !board.is_mine(x, y).unwrap() {
            board.reveal(x, y).unwrap();
        }
    }

    assert!(board.all_safe_cells_uncovered());
    assert!(!board.is_uncovered(0, 0).unwrap());
    assert!(!board.is_uncovered(4, 4).unwrap());
}

#[test]
fn empty_board_uncovers_in_one_reveal() {
    for (x, y) in Bounds::new(5, 5).iter_coords() {
        let mut board = seeded(5, 5, 0, 0);

        board.reveal(x, y).unwrap();

        assert_eq!(board.uncovered_count(), 25);
        assert!(board.all_safe_cells_uncovered());
    }
}

#[test]
fn large_empty_board_does_not_overflow_the_stack() {
    let mut board = seeded(400, 400, 0, 0);

    board.reveal(200, 200).unwrap();

    assert_eq!(board.uncovered_count(), 160_000);
}

#[test]
fn coordinates_outside_the_board_are_rejected() {
    let mut board = seeded(5, 5, 2, 3);
    board.reveal(0, 0).unwrap();
    let before = board.clone();

    for (x, y) in [(-1, 0), (5, 0), (0, -1), (0, 5), (6, 0), (0, 6)] {
        let expected = Err(BoardError::OutOfBounds { x, y });
        assert_eq!(board.reveal(x, y), expected);
        assert_eq!(board.toggle_flag(x, y), expected);
        assert_eq!(board.is_mine(x, y), Err(BoardError::OutOfBounds { x, y }));
        assert_eq!(board.is_uncovered(x, y), Err(BoardError::OutOfBounds { x, y }));
        assert_eq!(board.is_flagged(x, y), Err(BoardError::OutOfBounds { x, y }));
        assert_eq!(board.cell_state(x, y), Err(BoardError::OutOfBounds { x, y }));
    }

    assert_eq!(board, before);
}

#[test]
fn cell_views_follow_board_state() {
    let mut board = layout_board(3, 1, &[(2, 0)]);
    assert_eq!(board.cell_view(0, 0).unwrap(), CellView::Covered);

    board.reveal(1, 0).unwrap();
    board.toggle_flag(2, 0).unwrap();

    assert_eq!(board.cell_view(1, 0).unwrap(), CellView::Number(1));
    assert_eq!(board.cell_view(0, 0).unwrap(), CellView::Covered);
    assert_eq!(board.cell_view(2, 0).unwrap(), CellView::Flagged);
    assert_eq!(board.mines_left(), 0);
}

#[test]
fn same_seed_and_first_move_replay_the_same_game() {
    let config = GameConfig::expert();
    let mut first = Board::with_seed(&config, 1234).unwrap();
    let mut second = Board::with_seed(&config, 1234).unwrap();

    first.reveal(10, 7).unwrap();
    second.reveal(10, 7).unwrap();

    assert_eq!(first, second);
}

#[test]
fn seed_replays_a_randomly_seeded_board() {
    let config = GameConfig::intermediate();
    let mut original = Board::with_config(&config).unwrap();
    let mut replay = Board::with_seed(&config, original.seed()).unwrap();

    original.reveal(8, 8).unwrap();
    replay.reveal(8, 8).unwrap();

    assert_eq!(replay, original);
}
