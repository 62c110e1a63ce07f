//! Uniform-grid spatial index.
//!
//! Hosts are bucketed into square cells sized `cellSizeMult * maxTransmitRange`
//! so that two hosts within range of each other are guaranteed to fall in the
//! same cell or an adjacent one. Contact detection then only has to check
//! pairs sharing a 3x3 cell neighborhood instead of all O(N^2) pairs.

use rustc_hash::FxHashMap;

use dtn_core::{HostId, Position};

type CellCoord = (i32, i32);

/// A rebuild-per-tick uniform grid over host positions.
pub struct UniformGrid {
    cell_size_m: f32,
    cells: FxHashMap<CellCoord, Vec<HostId>>,
}

impl UniformGrid {
    /// `cell_size_m` should be `cellSizeMult * maxTransmitRange` across all
    /// interfaces in the scenario, per the optimization contract.
    pub fn new(cell_size_m: f32) -> Self {
        assert!(cell_size_m > 0.0, "cell size must be positive");
        Self {
            cell_size_m,
            cells: FxHashMap::default(),
        }
    }

    pub fn cell_size_m(&self) -> f32 {
        self.cell_size_m
    }

    fn cell_of(&self, pos: Position) -> CellCoord {
        (
            (pos.x / self.cell_size_m).floor() as i32,
            (pos.y / self.cell_size_m).floor() as i32,
        )
    }

    /// Discard all bucketed hosts. Call once per tick before `insert`-ing
    /// every host's current position.
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    pub fn insert(&mut self, host: HostId, pos: Position) {
        self.cells.entry(self.cell_of(pos)).or_default().push(host);
    }

    /// Rebuild the grid from scratch for the given `(host, position)` pairs.
    /// Equivalent to `clear()` followed by one `insert()` per pair, but reuses
    /// already-allocated bucket vectors.
    pub fn rebuild<I: IntoIterator<Item = (HostId, Position)>>(&mut self, hosts: I) {
        self.clear();
        for (host, pos) in hosts {
            self.insert(host, pos);
        }
    }

    /// All hosts in `pos`'s cell and its 8 neighbors, excluding `exclude`.
    ///
    /// Returned candidates are a superset of hosts actually within any given
    /// range ≤ `cell_size_m`; callers must still apply the real distance
    /// check (see `dtn-sim`'s contact-detection step, which filters by
    /// `min(rangeA, rangeB)`).
    pub fn candidates_near(&self, pos: Position, exclude: HostId) -> Vec<HostId> {
        let (cx, cy) = self.cell_of(pos);
        let mut out = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    out.extend(bucket.iter().copied().filter(|&h| h != exclude));
                }
            }
        }
        out
    }

    /// Number of occupied cells (diagnostic/logging use).
    pub fn occupied_cell_count(&self) -> usize {
        self.cells.values().filter(|b| !b.is_empty()).count()
    }
}

/// Recommended cell size given a scenario's maximum transmit range across all
/// interfaces, per the optimization contract's `cellSizeMult` multiplier.
pub fn recommended_cell_size(max_transmit_range_m: f32, cell_size_mult: f32) -> f32 {
    (max_transmit_range_m * cell_size_mult).max(f32::MIN_POSITIVE)
}
