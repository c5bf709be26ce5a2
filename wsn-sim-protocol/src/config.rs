// Configuration bundle, grounded on `wsnlab/source/config.py`. Field names follow the
// SCREAMING_SNAKE_CASE keys enumerated in the specification's external-interfaces
// section so a loaded JSON bundle reads the same as the Python source of truth.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RepairingMethod {
    AllOrphan,
    FindAnotherParent,
}

impl Default for RepairingMethod {
    fn default() -> Self {
        RepairingMethod::FindAnotherParent
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node_tx_ranges: HashMap<String, f64>,
    pub node_default_tx_power: String,
    pub node_loss_chance: f64,
    pub total_bits: u32,
    pub num_of_children: u32,

    pub sim_node_count: usize,
    pub node_arrival_max: f64,
    pub seed: u64,

    pub heart_beat_time_interval: f64,
    pub join_request_time_interval: f64,
    pub sleep_mode_probe_time_interval: f64,
    pub data_interval: f64,
    pub mesh_hop_n: u32,
    pub table_share_interval: f64,
    pub repairing_method: RepairingMethod,
    pub export_ch_csv_interval: f64,
    pub export_neighbor_csv_interval: f64,

    /// Optional wall-clock pacing factor; `None`/`0.0` runs as fast as possible.
    pub sim_time_scale: Option<f64>,
}

impl Config {
    /// `NUM_OF_CLUSTERS = (1 << (TOTAL_BITS - ceil(log2(NUM_OF_CHILDREN)))) - 1`.
    pub fn num_of_clusters(&self) -> u32 {
        let bits_child = (self.num_of_children as f64).log2().ceil() as u32;
        let bits_cluster = self.total_bits - bits_child;
        (1u32 << bits_cluster) - 1
    }

    pub fn tx_range_for(&self, tx_power: &str) -> f64 {
        self.node_tx_ranges
            .get(tx_power)
            .copied()
            .unwrap_or_else(|| {
                self.node_tx_ranges
                    .get(&self.node_default_tx_power)
                    .copied()
                    .unwrap_or(100.0)
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut node_tx_ranges = HashMap::new();
        node_tx_ranges.insert("-25 dBm".to_string(), 5.0);
        node_tx_ranges.insert("-15 dBm".to_string(), 25.0);
        node_tx_ranges.insert("-10 dBm".to_string(), 50.0);
        node_tx_ranges.insert("-5 dBm".to_string(), 75.0);
        node_tx_ranges.insert("0 dBm".to_string(), 100.0);
        Config {
            node_tx_ranges,
            node_default_tx_power: "0 dBm".to_string(),
            node_loss_chance: 0.05,
            total_bits: 16,
            num_of_children: 253,

            sim_node_count: 100,
            node_arrival_max: 200.0,
            seed: 1,

            heart_beat_time_interval: 1.0,
            join_request_time_interval: 10.0,
            sleep_mode_probe_time_interval: 30.0,
            data_interval: 100.0,
            mesh_hop_n: 5,
            table_share_interval: 30.0,
            repairing_method: RepairingMethod::FindAnotherParent,
            export_ch_csv_interval: 10.0,
            export_neighbor_csv_interval: 10.0,

            sim_time_scale: None,
        }
    }
}

#[cfg(test)]
#[path = "unit_tests/config_tests.rs"]
mod config_tests;
