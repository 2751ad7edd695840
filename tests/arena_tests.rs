//! Board generation tests
//!
//! These tests verify the placement guarantees: exact counts (or fewer if
//! positions run out), nothing on a reserved corner, no overlaps, and
//! identical boards from identical seeds.

use std::collections::HashSet;

use gridduel::arena::{Board, Position};
use gridduel::engine::GameRng;

#[test]
fn test_generated_board_has_exact_counts() {
    for seed in [1_u64, 7, 42, 1234] {
        let mut rng = GameRng::from_seed(seed);
        let board = Board::generate(7, 0.10, 0.05, &mut rng);

        // floor(49 × 0.10) = 4 obstacles, floor(49 × 0.05) = 2 bonuses
        assert_eq!(board.obstacles().len(), 4, "seed {}", seed);
        assert_eq!(board.bonuses().len(), 2, "seed {}", seed);
    }
}

#[test]
fn test_placements_avoid_corners_and_each_other() {
    for seed in 0..20_u64 {
        let mut rng = GameRng::from_seed(seed);
        let board = Board::generate(7, 0.10, 0.05, &mut rng);

        let mut seen: HashSet<Position> = HashSet::new();
        for pos in board.obstacles() {
            assert!(board.in_bounds(*pos));
            assert!(!board.is_corner(*pos), "obstacle on corner (seed {})", seed);
            assert!(seen.insert(*pos), "overlapping placement (seed {})", seed);
        }
        for bonus in board.bonuses() {
            assert!(board.in_bounds(bonus.pos));
            assert!(!board.is_corner(bonus.pos), "bonus on corner (seed {})", seed);
            assert!(seen.insert(bonus.pos), "overlapping placement (seed {})", seed);
        }
    }
}

#[test]
fn test_generation_runs_short_when_cells_run_out() {
    // A 3x3 board has five non-corner cells; full obstacle density asks
    // for nine and must settle for five, leaving no room for bonuses
    let mut rng = GameRng::from_seed(3);
    let board = Board::generate(3, 1.0, 1.0, &mut rng);

    assert_eq!(board.obstacles().len(), 5);
    assert_eq!(board.bonuses().len(), 0);
}

#[test]
fn test_same_seed_same_board() {
    let board_a = Board::generate(7, 0.10, 0.05, &mut GameRng::from_seed(99));
    let board_b = Board::generate(7, 0.10, 0.05, &mut GameRng::from_seed(99));

    assert_eq!(board_a, board_b);
}

#[test]
fn test_corner_spawns_are_the_four_corners() {
    let board = Board::empty(7);
    let corners = board.corner_spawns();

    assert_eq!(corners[0], Position::new(0, 0));
    assert_eq!(corners[1], Position::new(0, 6));
    assert_eq!(corners[2], Position::new(6, 0));
    assert_eq!(corners[3], Position::new(6, 6));
    for corner in corners {
        assert!(board.is_corner(corner));
    }
}

#[test]
fn test_zero_density_board_is_empty() {
    let mut rng = GameRng::from_seed(5);
    let board = Board::generate(7, 0.0, 0.0, &mut rng);

    assert!(board.obstacles().is_empty());
    assert!(board.bonuses().is_empty());
}
