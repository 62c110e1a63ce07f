//! Unit tests for dtn-grid.

use dtn_core::{HostId, Position};

use crate::grid::{recommended_cell_size, UniformGrid};

#[test]
fn recommended_cell_size_scales_with_mult() {
    assert_eq!(recommended_cell_size(10.0, 2.0), 20.0);
}

#[test]
fn finds_neighbor_in_same_cell() {
    let mut grid = UniformGrid::new(50.0);
    grid.insert(HostId(0), Position::new(1.0, 1.0));
    grid.insert(HostId(1), Position::new(2.0, 2.0));

    let candidates = grid.candidates_near(Position::new(1.0, 1.0), HostId(0));
    assert_eq!(candidates, vec![HostId(1)]);
}

#[test]
fn finds_neighbor_in_adjacent_cell() {
    let mut grid = UniformGrid::new(10.0);
    // Cell (0,0) vs cell (1,0) — adjacent.
    grid.insert(HostId(0), Position::new(9.0, 5.0));
    grid.insert(HostId(1), Position::new(11.0, 5.0));

    let candidates = grid.candidates_near(Position::new(9.0, 5.0), HostId(0));
    assert_eq!(candidates, vec![HostId(1)]);
}

#[test]
fn does_not_find_distant_cell() {
    let mut grid = UniformGrid::new(10.0);
    grid.insert(HostId(0), Position::new(0.0, 0.0));
    grid.insert(HostId(1), Position::new(1000.0, 1000.0));

    let candidates = grid.candidates_near(Position::new(0.0, 0.0), HostId(0));
    assert!(candidates.is_empty());
}

#[test]
fn excludes_self() {
    let mut grid = UniformGrid::new(50.0);
    grid.insert(HostId(0), Position::new(1.0, 1.0));

    let candidates = grid.candidates_near(Position::new(1.0, 1.0), HostId(0));
    assert!(candidates.is_empty());
}

#[test]
fn rebuild_clears_previous_contents() {
    let mut grid = UniformGrid::new(10.0);
    grid.rebuild(vec![(HostId(0), Position::new(1.0, 1.0)), (HostId(1), Position::new(2.0, 2.0))]);
    assert_eq!(grid.candidates_near(Position::new(1.0, 1.0), HostId(0)), vec![HostId(1)]);

    // Second rebuild with only one host: host 1 should no longer appear.
    grid.rebuild(vec![(HostId(0), Position::new(1.0, 1.0))]);
    assert!(grid.candidates_near(Position::new(1.0, 1.0), HostId(0)).is_empty());
}

#[test]
fn occupied_cell_count_reflects_distinct_cells() {
    let mut grid = UniformGrid::new(10.0);
    grid.insert(HostId(0), Position::new(1.0, 1.0));
    grid.insert(HostId(1), Position::new(2.0, 2.0)); // same cell
    grid.insert(HostId(2), Position::new(100.0, 100.0)); // different cell
    assert_eq!(grid.occupied_cell_count(), 2);
}

#[test]
#[should_panic]
fn zero_cell_size_panics() {
    let _ = UniformGrid::new(0.0);
}
