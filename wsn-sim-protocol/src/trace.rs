// Concrete CSV row schemas for the trace files enumerated in §6, each wrapping a
// `wsn_sim_kernel::CsvAppendWriter`. Grounded on the `write_*_csv` functions in
// `data_collection_tree.py` / `repairing_network.py` for the exact column sets.

use crate::address::Address;
use crate::role::Role;
use serde::Serialize;
use std::path::Path;
use wsn_sim_kernel::base_types::Result;
use wsn_sim_kernel::trace::CsvAppendWriter;

fn addr_or_dash(addr: Option<Address>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
}

#[derive(Serialize)]
pub struct PacketRouteRow {
    pub time: f64,
    pub packet_type: &'static str,
    pub source: String,
    pub current_node: String,
    pub next_hop: String,
    pub dest: String,
    pub hop_count: u32,
    pub path_type: &'static str,
}

#[derive(Serialize)]
pub struct RegistrationLogRow {
    pub node_id: usize,
    pub start_time: f64,
    pub registered_time: f64,
    pub delta_time: f64,
}

#[derive(Serialize)]
pub struct ClusterheadDistanceRow {
    pub net_addr_a: u8,
    pub net_addr_b: u8,
    pub distance: f64,
}

#[derive(Serialize)]
pub struct NeighborDistanceRow {
    pub gui_a: usize,
    pub gui_b: usize,
    pub distance: f64,
}

#[derive(Serialize)]
pub struct NodeDistanceRow {
    pub gui_a: usize,
    pub gui_b: usize,
    pub distance: f64,
}

#[derive(Serialize)]
pub struct TopologyRow {
    pub gui: usize,
    pub x: f64,
    pub y: f64,
    pub tx_range: f64,
    pub role: &'static str,
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::Undiscovered => "UNDISCOVERED",
        Role::Unregistered => "UNREGISTERED",
        Role::Registered => "REGISTERED",
        Role::ClusterHead => "CLUSTER_HEAD",
        Role::Root => "ROOT",
    }
}

/// Bundle of every append-only exporter the orchestrator writes to, one
/// `CsvAppendWriter` per file named in §6.
pub struct TraceWriters {
    pub packet_routes: CsvAppendWriter,
    pub registration_log: CsvAppendWriter,
    pub clusterhead_distances: CsvAppendWriter,
    pub neighbor_distances: CsvAppendWriter,
    pub node_distances: CsvAppendWriter,
    pub node_distance_matrix: CsvAppendWriter,
    pub topology: CsvAppendWriter,
}

impl TraceWriters {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        let dir = out_dir.as_ref();
        TraceWriters {
            packet_routes: CsvAppendWriter::new(dir.join("packet_routes.csv")),
            registration_log: CsvAppendWriter::new(dir.join("registration_log.csv")),
            clusterhead_distances: CsvAppendWriter::new(dir.join("clusterhead_distances.csv")),
            neighbor_distances: CsvAppendWriter::new(dir.join("neighbor_distances.csv")),
            node_distances: CsvAppendWriter::new(dir.join("node_distances.csv")),
            node_distance_matrix: CsvAppendWriter::new(dir.join("node_distance_matrix.csv")),
            topology: CsvAppendWriter::new(dir.join("topology.csv")),
        }
    }

    pub fn write_packet_route(
        &mut self,
        time: f64,
        packet_type: &'static str,
        source: Option<Address>,
        current_node: Option<Address>,
        next_hop: Option<Address>,
        dest: Address,
        hop_count: u32,
        path_type: &'static str,
    ) -> Result<()> {
        self.packet_routes.write_row(&PacketRouteRow {
            time,
            packet_type,
            source: addr_or_dash(source),
            current_node: addr_or_dash(current_node),
            next_hop: addr_or_dash(next_hop),
            dest: dest.to_string(),
            hop_count,
            path_type,
        })
    }

    pub fn write_registration(&mut self, row: RegistrationLogRow) -> Result<()> {
        self.registration_log.write_row(&row)
    }

    /// Writes the header only when fewer than two cluster heads are live, matching
    /// `write_clusterhead_distances_csv`'s "still refresh the file" branch.
    pub fn write_clusterhead_distances(&mut self, rows: &[ClusterheadDistanceRow]) -> Result<()> {
        if rows.len() < 2 {
            self.clusterhead_distances
                .write_header_only(&["net_addr_a", "net_addr_b", "distance"])
        } else {
            for row in rows {
                self.clusterhead_distances.write_row(row)?;
            }
            Ok(())
        }
    }

    pub fn write_neighbor_distances(&mut self, rows: &[NeighborDistanceRow]) -> Result<()> {
        for row in rows {
            self.neighbor_distances.write_row(row)?;
        }
        Ok(())
    }

    pub fn write_node_distances(&mut self, rows: &[NodeDistanceRow]) -> Result<()> {
        for row in rows {
            self.node_distances.write_row(row)?;
        }
        Ok(())
    }

    /// One row per node: `gui` followed by its distance to every other node in `gui`
    /// order, matching `write_node_distance_matrix_csv`'s triangular dump.
    pub fn write_node_distance_matrix(&mut self, matrix: &[Vec<f64>]) -> Result<()> {
        for (gui, distances) in matrix.iter().enumerate() {
            let mut row: Vec<String> = vec![gui.to_string()];
            row.extend(distances.iter().map(|d| d.to_string()));
            self.node_distance_matrix.write_row(&row)?;
        }
        Ok(())
    }

    pub fn write_topology(&mut self, gui: usize, x: f64, y: f64, tx_range: f64, role: Role) -> Result<()> {
        self.topology.write_row(&TopologyRow {
            gui,
            x,
            y,
            tx_range,
            role: role_str(role),
        })
    }
}
