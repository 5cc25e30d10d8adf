//! Pinned behavior of the engine on small hand-written grids.
use anchor_2048::codec::{decode, decode_frame, encode};
use anchor_2048::engine::{shift_code, Cell, Direction, Grid};
use anchor_2048::greedy::{self, best_move};

fn wire(g: &Grid) -> String { encode(g).expect("encodable") }

#[test]
fn four_twos_merge_pairwise() {
    let g = decode(&format!("2222{}", " ".repeat(12))).unwrap();
    let out = g.shift(Direction::Left);
    assert_eq!(out.reward, 8);
    assert_eq!(&out.grid.cells()[..4], &[Cell::Tile(4), Cell::Tile(4), Cell::Empty, Cell::Empty]);
    assert_eq!(&wire(&out.grid)[..4], "44  ");
}

#[test]
fn obstacle_blocks_merge_across_it() {
    let g = decode(concat!("2x2", " 22", "   ")).unwrap();
    let out = g.shift(Direction::Left);
    assert_eq!(out.reward, 4);
    assert_eq!(wire(&out.grid), concat!("2x2", "4  ", "   "));
}

#[test]
fn tie_between_left_and_right_goes_left() {
    let g = decode("22  ").unwrap();
    assert_eq!(g.shift(Direction::Left).reward, 4);
    assert_eq!(g.shift(Direction::Right).reward, 4);
    let d = best_move(&g);
    assert_eq!(d.direction, Direction::Left);
    assert_eq!(d.reward, 4);
}

#[test]
fn empty_grid_is_a_fixed_point() {
    for n in 1..=5 {
        let g = Grid::empty(n);
        for dir in Direction::ALL {
            let out = g.shift(dir);
            assert_eq!(out.reward, 0);
            assert_eq!(out.grid, g);
        }
        assert_eq!(best_move(&g).direction, Direction::Left);
    }
}

#[test]
fn single_cell_grids() {
    for raw in [" ", "x", "2", "S"] {
        let g = decode(raw).unwrap();
        for dir in Direction::ALL {
            assert_eq!(g.shift(dir).grid, g);
        }
    }
}

#[test]
fn tiles_settle_against_obstacles_in_every_direction() {
    let g = decode(concat!("  2  ", " x   ", "2   2", "   x ", "  2  ")).unwrap();
    assert_eq!(wire(&g.shift(Direction::Left).grid), concat!("2    ", " x   ", "4    ", "   x ", "2    "));
    assert_eq!(wire(&g.shift(Direction::Right).grid), concat!("    2", " x   ", "    4", "   x ", "    2"));
    assert_eq!(wire(&g.shift(Direction::Up).grid), concat!("2 4 2", " x   ", "     ", "   x ", "     "));
    assert_eq!(wire(&g.shift(Direction::Down).grid), concat!("     ", " x   ", "     ", "   x ", "2 4 2"));
    assert_eq!(g.shift(Direction::Left).reward, 4);
    assert_eq!(g.shift(Direction::Up).reward, 4);
}

#[test]
fn chained_merges_do_not_cascade() {
    let g = decode(concat!("2248", "    ", "    ", "    ")).unwrap();
    let out = g.shift(Direction::Left);
    assert_eq!(&wire(&out.grid)[..4], "448 ");
    assert_eq!(out.reward, 4);
}

#[test]
fn transport_codes() {
    let g = decode_frame("board=2 2 ").unwrap();
    assert_eq!(shift_code(&g, 1).reward, 4);
    assert_eq!(shift_code(&g, 7), g.shift(Direction::Left));
    assert_eq!(Direction::from_code(Direction::Down.code()), Direction::Down);
}

#[test]
fn decisions_serialize_for_the_policy_side() {
    let g = decode("2 2 ").unwrap();
    let d = greedy::best_move(&g);
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["direction"], "UP");
    assert_eq!(json["reward"], 4);
    assert_eq!(json["grid"], "4   ");
}
