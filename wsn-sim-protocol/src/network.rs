// Orchestrator: owns every node, the topology index and the event scheduler, and wires
// the protocol handlers to the kernel. Grounded on the former `bft-lib::simulator`'s
// `Simulator::loop_until` for the pop/dispatch/clamp shape, generalized to the two
// event kinds this protocol needs (timer firings and packet deliveries) instead of a
// BFT-specific `Event` enum.

use crate::address::Address;
use crate::config::Config;
use crate::error::ProtocolError;
use crate::handlers::{self, NodeIo};
use crate::node::NodeState;
use crate::packet::{Packet, PathType};
use crate::scene::{NullScene, Scene};
use crate::trace::{ClusterheadDistanceRow, NeighborDistanceRow, RegistrationLogRow, TraceWriters};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::HashSet;
use std::path::Path;
use wsn_sim_kernel::base_types::{Duration, Result, VirtualTime};
use wsn_sim_kernel::{RealtimePacer, Scheduler, TopologyIndex};

#[derive(Debug, Clone)]
enum KernelEvent {
    Timer { gui: usize, name: &'static str },
    Deliver { target_gui: usize, packet: Packet },
}

pub struct NodePlacement {
    pub position: (f64, f64),
    pub tx_power: String,
    pub is_root_eligible: bool,
}

pub struct Network {
    nodes: Vec<NodeState>,
    topology: TopologyIndex,
    scheduler: Scheduler<KernelEvent>,
    config: Config,
    rng: Xoshiro256PlusPlus,
    trace: TraceWriters,
    scene: Box<dyn Scene>,
}

/// Borrows the fields a handler needs, for exactly the duration of one dispatch.
/// Constructed fresh per event so it never outlives the `&mut self.nodes[gui]` borrow
/// dispatched alongside it.
struct NetworkIo<'a> {
    config: &'a Config,
    scheduler: &'a mut Scheduler<KernelEvent>,
    topology: &'a TopologyIndex,
    rng: &'a mut Xoshiro256PlusPlus,
    trace: &'a mut TraceWriters,
    tx_range: f64,
}

impl<'a> NodeIo for NetworkIo<'a> {
    fn now(&self) -> VirtualTime {
        self.scheduler.now()
    }

    fn config(&self) -> &Config {
        self.config
    }

    fn send(&mut self, from_gui: usize, packet: Packet) {
        for entry in self.topology.in_range(from_gui, self.tx_range) {
            if self.rng.gen::<f64>() < self.config.node_loss_chance {
                continue;
            }
            let prop_time = (entry.distance / 1_000_000.0).max(0.00001);
            self.scheduler.schedule_after(
                Duration::from_secs_f64(prop_time),
                KernelEvent::Deliver {
                    target_gui: entry.gui,
                    packet: packet.clone(),
                },
            );
        }
    }

    fn schedule_timer(&mut self, gui: usize, name: &'static str, delay: Duration) {
        self.scheduler.schedule_after(delay, KernelEvent::Timer { gui, name });
    }

    fn peer_distance(&self, from_gui: usize, to_gui: usize) -> f64 {
        self.topology.distance(from_gui, to_gui)
    }

    fn trace_route(
        &mut self,
        packet_type: &'static str,
        source: Option<Address>,
        current_node: Option<Address>,
        next_hop: Option<Address>,
        dest: Address,
        hop_count: u32,
        path_type: PathType,
    ) {
        let _ = self.trace.write_packet_route(
            self.scheduler.now().as_secs_f64(),
            packet_type,
            source,
            current_node,
            next_hop,
            dest,
            hop_count,
            path_type.as_str(),
        );
    }

    fn trace_registration(&mut self, gui: usize, start: VirtualTime, registered: VirtualTime) {
        let delta = (registered - start).as_secs_f64();
        let _ = self.trace.write_registration(RegistrationLogRow {
            node_id: gui,
            start_time: start.as_secs_f64(),
            registered_time: registered.as_secs_f64(),
            delta_time: delta,
        });
    }
}

impl Network {
    pub fn new(config: Config, placements: Vec<NodePlacement>, out_dir: impl AsRef<Path>) -> Self {
        let mut topology = TopologyIndex::new();
        let mut nodes = Vec::with_capacity(placements.len());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);

        for placement in &placements {
            let gui = topology.add_node(placement.position);
            let tx_range = config.tx_range_for(&placement.tx_power);
            nodes.push(NodeState::new(
                gui,
                placement.tx_power.clone(),
                tx_range,
                placement.is_root_eligible,
            ));
        }

        let mut scheduler: Scheduler<KernelEvent> = Scheduler::new();
        for (gui, placement) in placements.iter().enumerate() {
            let delay = if placement.is_root_eligible {
                Duration::from_secs_f64(0.1)
            } else {
                Duration::from_secs_f64(rng.gen_range(0.0..config.node_arrival_max.max(0.001)))
            };
            nodes[gui].timers.arm("ARRIVAL");
            scheduler.schedule_after(delay, KernelEvent::Timer { gui, name: "ARRIVAL" });
        }

        Network {
            nodes,
            topology,
            scheduler,
            config,
            rng,
            trace: TraceWriters::new(out_dir),
            scene: Box::new(NullScene),
        }
    }

    pub fn set_scene(&mut self, scene: Box<dyn Scene>) {
        self.scene = scene;
    }

    pub fn node(&self, gui: usize) -> &NodeState {
        &self.nodes[gui]
    }

    pub fn nodes(&self) -> &[NodeState] {
        &self.nodes
    }

    pub fn now(&self) -> VirtualTime {
        self.scheduler.now()
    }

    /// Advances the simulation until `now >= until` or the event queue drains.
    /// `pacer`, if given, sleeps the host thread between events for cosmetic real-time
    /// playback; it never perturbs `VirtualTime` ordering.
    pub fn run(&mut self, until: VirtualTime, mut pacer: Option<RealtimePacer>) -> Result<()> {
        loop {
            let deadline = match self.scheduler.peek_deadline() {
                Some(d) => d,
                None => break,
            };
            if deadline > until {
                break;
            }
            let (now, event) = self.scheduler.pop_next().expect("peeked a deadline above");
            if let Some(p) = pacer.as_mut() {
                p.pace(now);
            }
            self.scene.set_time(now.as_secs_f64());
            match event {
                KernelEvent::Timer { gui, name } => self.dispatch_timer(gui, name)?,
                KernelEvent::Deliver { target_gui, packet } => {
                    self.dispatch_deliver(target_gui, packet)?
                }
            }
        }
        Ok(())
    }

    fn dispatch_timer(&mut self, gui: usize, name: &'static str) -> Result<()> {
        if name == "EXPORT_CH_CSV" || name == "EXPORT_NEIGHBOR_CSV" {
            return self.dispatch_export_timer(gui, name);
        }
        let tx_range = self.nodes[gui].tx_range;
        let Network {
            nodes,
            topology,
            scheduler,
            config,
            rng,
            trace,
            ..
        } = self;
        let mut io = NetworkIo {
            config,
            scheduler,
            topology,
            rng,
            trace,
            tx_range,
        };
        handlers::on_timer_fired(&mut nodes[gui], &mut io, gui, name).map_err(protocol_error_to_anyhow)
    }

    fn dispatch_deliver(&mut self, gui: usize, packet: Packet) -> Result<()> {
        let tx_range = self.nodes[gui].tx_range;
        let Network {
            nodes,
            topology,
            scheduler,
            config,
            rng,
            trace,
            ..
        } = self;
        let mut io = NetworkIo {
            config,
            scheduler,
            topology,
            rng,
            trace,
            tx_range,
        };
        handlers::on_receive(&mut nodes[gui], &mut io, gui, packet).map_err(protocol_error_to_anyhow)
    }

    fn dispatch_export_timer(&mut self, gui: usize, name: &'static str) -> Result<()> {
        if !self.nodes[gui].timers.try_fire(name) {
            return Ok(());
        }
        match name {
            "EXPORT_CH_CSV" => self.export_clusterhead_distances()?,
            "EXPORT_NEIGHBOR_CSV" => self.export_neighbor_distances()?,
            _ => unreachable!("guarded by caller"),
        }
        let interval = if name == "EXPORT_CH_CSV" {
            self.config.export_ch_csv_interval
        } else {
            self.config.export_neighbor_csv_interval
        };
        self.nodes[gui].timers.arm(name);
        self.scheduler
            .schedule_after(Duration::from_secs_f64(interval), KernelEvent::Timer { gui, name });
        Ok(())
    }

    fn export_clusterhead_distances(&mut self) -> Result<()> {
        let Network { nodes, topology, trace, .. } = self;
        let chs: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.role.is_ch_or_root())
            .map(|(gui, _)| gui)
            .collect();
        let mut rows = Vec::new();
        for i in 0..chs.len() {
            for j in (i + 1)..chs.len() {
                let (a, b) = (chs[i], chs[j]);
                rows.push(ClusterheadDistanceRow {
                    net_addr_a: nodes[a].ch_addr.expect("filtered to CH/root").net_addr,
                    net_addr_b: nodes[b].ch_addr.expect("filtered to CH/root").net_addr,
                    distance: topology.distance(a, b),
                });
            }
        }
        trace.write_clusterhead_distances(&rows)
    }

    fn export_neighbor_distances(&mut self) -> Result<()> {
        let Network { nodes, trace, .. } = self;
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for (gui, node) in nodes.iter().enumerate() {
            for rec in node.neighbors.values() {
                let pair = if gui < rec.gui { (gui, rec.gui) } else { (rec.gui, gui) };
                if seen.insert(pair) {
                    if let Some(distance) = rec.distance {
                        rows.push(NeighborDistanceRow {
                            gui_a: pair.0,
                            gui_b: pair.1,
                            distance,
                        });
                    }
                }
            }
        }
        trace.write_neighbor_distances(&rows)
    }
}

fn protocol_error_to_anyhow(err: ProtocolError) -> anyhow::Error {
    anyhow::anyhow!(err)
}

#[cfg(test)]
#[path = "unit_tests/network_tests.rs"]
mod network_tests;
