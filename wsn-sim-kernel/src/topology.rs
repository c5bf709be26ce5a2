// Per-node neighbor-by-distance index.
//
// Grounded on `wsnlab/source/wsnlab.py`'s `Simulator.update_neighbor_list`: on every
// node insertion or move, the affected node's own list is rebuilt from scratch and the
// node is repositioned (via sorted insert) within every other node's list.

use serde::{Deserialize, Serialize};

/// One entry of a node's neighbor-by-distance table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub distance: f64,
    pub gui: usize,
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Flat, `gui`-indexed store of node positions and their sorted neighbor lists.
#[derive(Debug, Default)]
pub struct TopologyIndex {
    positions: Vec<(f64, f64)>,
    neighbors: Vec<Vec<NeighborEntry>>,
}

impl TopologyIndex {
    pub fn new() -> Self {
        TopologyIndex {
            positions: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// Registers a new node at `pos` and returns its assigned `gui` (insertion order).
    pub fn add_node(&mut self, pos: (f64, f64)) -> usize {
        let gui = self.positions.len();
        self.positions.push(pos);
        self.neighbors.push(Vec::new());
        self.recompute(gui);
        gui
    }

    pub fn position(&self, gui: usize) -> (f64, f64) {
        self.positions[gui]
    }

    /// Moves `gui` to a new position and refreshes every affected neighbor list.
    pub fn move_node(&mut self, gui: usize, pos: (f64, f64)) {
        self.positions[gui] = pos;
        self.recompute(gui);
    }

    /// Rebuilds `gui`'s own neighbor list from scratch, and repositions `gui` within
    /// every other node's list (removing any stale entry first, matching `bisect.insort`
    /// after an unconditional removal in the reference).
    fn recompute(&mut self, gui: usize) {
        let me = self.positions[gui];
        let n = self.positions.len();
        for other in 0..n {
            if other == gui {
                continue;
            }
            let list = &mut self.neighbors[other];
            list.retain(|e| e.gui != gui);
            let distance = euclidean(self.positions[other], me);
            let entry = NeighborEntry { distance, gui };
            let pos = list
                .binary_search_by(|e| e.distance.partial_cmp(&distance).unwrap())
                .unwrap_or_else(|i| i);
            list.insert(pos, entry);
        }
        let mut rebuilt: Vec<NeighborEntry> = (0..n)
            .filter(|&other| other != gui)
            .map(|other| NeighborEntry {
                distance: euclidean(self.positions[other], me),
                gui: other,
            })
            .collect();
        rebuilt.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap());
        self.neighbors[gui] = rebuilt;
    }

    /// Neighbors of `gui` within `tx_range`, sorted ascending by distance. Iteration
    /// must stop at the first entry past `tx_range` rather than filtering the whole
    /// list, to preserve the reference's O(neighbors-in-range) dispatch.
    pub fn in_range(&self, gui: usize, tx_range: f64) -> impl Iterator<Item = &NeighborEntry> {
        self.neighbors[gui]
            .iter()
            .take_while(move |e| e.distance <= tx_range)
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Euclidean distance between two registered nodes, independent of either one's
    /// transmission range.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        euclidean(self.positions[a], self.positions[b])
    }
}

#[cfg(test)]
#[path = "unit_tests/topology_tests.rs"]
mod topology_tests;
