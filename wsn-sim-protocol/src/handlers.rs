// Protocol State Machine: timer/message dispatch, tree+mesh routing, repair.
//
// Grounded on `data_collection_tree.py`'s `SensorNode.on_receive`/`on_timer_fired` for
// discovery, registration and cluster-head formation, and on `repairing_network.py`'s
// `check_neighbors`/`repair`/`repair_all_orphan`/`repair_find_another_parent` for the
// repair variant. Every function here touches only the acting node's own state; the
// ability to broadcast, arm a timer, or append a trace row is reached entirely through
// the `NodeIo` port below, so this module stays testable without a kernel (the same
// split the teacher draws between its protocol traits and `SimulatedContext`).

use crate::address::{Address, CLUSTER_HEAD_NODE_ADDR};
use crate::allocator::AddressPool;
use crate::config::{Config, RepairingMethod};
use crate::error::ProtocolError;
use crate::neighbor::NeighborRecord;
use crate::node::{NodeState, HOP_COUNT_UNKNOWN};
use crate::packet::{MeshShareEntry, Packet, PacketBody, PathType};
use crate::role::Role;
use wsn_sim_kernel::base_types::{Duration, VirtualTime};

/// Everything a handler needs besides the acting node's own state.
pub trait NodeIo {
    fn now(&self) -> VirtualTime;
    fn config(&self) -> &Config;
    fn send(&mut self, from_gui: usize, packet: Packet);
    fn schedule_timer(&mut self, gui: usize, name: &'static str, delay: Duration);
    fn peer_distance(&self, from_gui: usize, to_gui: usize) -> f64;
    fn trace_route(
        &mut self,
        packet_type: &'static str,
        source: Option<Address>,
        current_node: Option<Address>,
        next_hop: Option<Address>,
        dest: Address,
        hop_count: u32,
        path_type: PathType,
    );
    fn trace_registration(&mut self, gui: usize, start: VirtualTime, registered: VirtualTime);
}

type HandlerResult = Result<(), ProtocolError>;

fn arm(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, name: &'static str, delay: Duration) {
    node.timers.arm(name);
    io.schedule_timer(gui, name, delay);
}

fn envelope(node: &NodeState, gui: usize, dest: Address, body: PacketBody) -> Packet {
    let mut pck = Packet::new(dest, body);
    pck.source = node.addr;
    pck.hop_count = Some(node.hop_count);
    pck.gui = Some(gui);
    pck
}

fn send_probe(node: &NodeState, io: &mut dyn NodeIo, gui: usize) {
    io.send(gui, envelope(node, gui, Address::BROADCAST, PacketBody::Probe));
}

fn send_heart_beat(node: &NodeState, io: &mut dyn NodeIo, gui: usize) {
    let body = PacketBody::HeartBeat {
        role: node.role,
        addr: node.addr,
        ch_addr: node.ch_addr,
    };
    io.send(gui, envelope(node, gui, Address::BROADCAST, body));
}

// --- Timer dispatch (§4.5.1) -----------------------------------------------------

/// Entry point invoked by the network orchestrator when a scheduled timer fires.
/// `EXPORT_CH_CSV`/`EXPORT_NEIGHBOR_CSV` need a whole-topology view and are handled
/// directly by the orchestrator instead of here.
pub fn on_timer_fired(
    node: &mut NodeState,
    io: &mut dyn NodeIo,
    gui: usize,
    name: &'static str,
) -> HandlerResult {
    if !node.timers.try_fire(name) {
        return Ok(());
    }
    match name {
        "ARRIVAL" => on_arrival(node, io, gui),
        "PROBE" => on_probe(node, io, gui),
        "JOIN_REQUEST" => on_join_request(node, io, gui),
        "HEART_BEAT" => on_heart_beat_timer(node, io, gui),
        "TABLE_SHARE" => on_table_share_timer(node, io, gui),
        "SENSOR" => on_sensor_timer(node, io, gui),
        "DEAD" => on_dead(node),
        "WAKEUP" => on_arrival(node, io, gui),
        _ => {}
    }
    Ok(())
}

fn on_arrival(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    node.wake_up();
    node.wake_up_time = Some(io.now());
    node.probe_counter = 0;
    node.probe_threshold = 10;
    arm(node, io, gui, "PROBE", Duration::from_secs_f64(0.0));
}

fn on_probe(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    node.probe_counter += 1;
    send_probe(node, io, gui);
    if node.probe_counter < node.probe_threshold {
        arm(node, io, gui, "PROBE", Duration::from_secs_f64(1.0));
    } else if node.is_root_eligible {
        become_root(node, io, gui);
    } else {
        let retry = io.config().sleep_mode_probe_time_interval;
        arm(node, io, gui, "PROBE", Duration::from_secs_f64(retry));
    }
}

fn on_join_request(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    check_neighbors(node, io, gui);
    if node.role != Role::Unregistered {
        return;
    }
    if node.candidate_parents.is_empty() {
        become_unregistered(node, io, gui);
    } else {
        select_and_join(node, io, gui);
        let interval = io.config().join_request_time_interval;
        arm(node, io, gui, "JOIN_REQUEST", Duration::from_secs_f64(interval));
    }
}

fn on_heart_beat_timer(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    check_neighbors(node, io, gui);
    if node.role.is_ch_or_root() || node.role == Role::Registered {
        send_heart_beat(node, io, gui);
        let interval = io.config().heart_beat_time_interval;
        arm(node, io, gui, "HEART_BEAT", Duration::from_secs_f64(interval));
    }
}

fn on_table_share_timer(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    if node.role.is_ch_or_root() || node.role == Role::Registered {
        let mesh_hop_n = io.config().mesh_hop_n;
        let entries: Vec<MeshShareEntry> = node
            .neighbors
            .values()
            .filter(|rec| rec.neighbor_hop_count == mesh_hop_n)
            .filter_map(|rec| {
                rec.addr.map(|addr| MeshShareEntry {
                    gui: rec.gui,
                    addr,
                    neighbor_hop_count: rec.neighbor_hop_count,
                })
            })
            .collect();
        if !entries.is_empty() {
            let one_hop_dests: Vec<Address> = node
                .neighbors
                .values()
                .filter(|rec| rec.neighbor_hop_count == 1)
                .map(|rec| rec.source)
                .collect();
            for dest in one_hop_dests {
                let pck = envelope(
                    node,
                    gui,
                    dest,
                    PacketBody::TableShare {
                        entries: entries.clone(),
                    },
                );
                io.send(gui, pck);
            }
        }
    }
    let interval = io.config().table_share_interval;
    arm(node, io, gui, "TABLE_SHARE", Duration::from_secs_f64(interval));
}

fn on_sensor_timer(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    if node.role.is_ch_or_root() && node.role != Role::Root {
        if let Some(root_addr) = node.root_addr {
            let pck = envelope(node, gui, root_addr, PacketBody::SensorData { sensor_value: 0.0 });
            route_and_forward(node, io, gui, pck);
        }
    }
    let interval = io.config().data_interval;
    arm(node, io, gui, "SENSOR", Duration::from_secs_f64(interval));
}

fn on_dead(node: &mut NodeState) {
    node.sleep();
    node.parent_gui = None;
    node.timers.cancel_all();
}

// --- Message receipt --------------------------------------------------------------

pub fn on_receive(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, pck: Packet) -> HandlerResult {
    if node.is_sleep || !node.can_receive(pck.next_hop.unwrap_or(pck.dest)) {
        return Ok(());
    }
    if is_tree_routed(&pck.body) && !node.can_receive(pck.dest) {
        route_and_forward(node, io, gui, pck);
        return Ok(());
    }
    match node.role {
        Role::Root | Role::ClusterHead => on_receive_as_ch_or_root(node, io, gui, pck),
        Role::Registered => on_receive_as_registered(node, io, gui, pck),
        Role::Unregistered => on_receive_as_unregistered(node, io, gui, pck),
        Role::Undiscovered => on_receive_as_undiscovered(node, io, gui, pck),
    }
}

fn is_tree_routed(body: &PacketBody) -> bool {
    matches!(
        body,
        PacketBody::NetworkRequest | PacketBody::NetworkReply { .. } | PacketBody::SensorData { .. }
    )
}

fn update_neighbor(node: &mut NodeState, io: &dyn NodeIo, gui: usize, pck: &Packet, role: Role, addr: Option<Address>, ch_addr: Option<Address>) {
    let (sender_gui, source) = match (pck.gui, pck.source) {
        (Some(g), Some(s)) => (g, s),
        _ => return,
    };
    let rec = NeighborRecord {
        gui: sender_gui,
        source,
        role,
        addr,
        ch_addr,
        hop_count: pck.hop_count.unwrap_or(HOP_COUNT_UNKNOWN),
        arrival_time: io.now(),
        distance: Some(io.peer_distance(gui, sender_gui)),
        neighbor_hop_count: 1,
        next_hop: None,
    };
    node.neighbors.insert(sender_gui, rec);
    if node.role == Role::Unregistered {
        let already_known = node.child_networks.contains(sender_gui)
            || addr.map_or(false, |a| node.members.contains(&a));
        if !already_known && !node.candidate_parents.contains(&sender_gui) {
            node.candidate_parents.push(sender_gui);
        }
    }
}

fn on_receive_as_ch_or_root(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, pck: Packet) -> HandlerResult {
    match &pck.body {
        PacketBody::Probe => send_heart_beat(node, io, gui),
        PacketBody::HeartBeat { role, addr, ch_addr } => {
            update_neighbor(node, io, gui, &pck, *role, *addr, *ch_addr);
        }
        PacketBody::JoinRequest => {
            if let Some(requester_gui) = pck.gui {
                let ch_addr = node.ch_addr.expect("CH/root always has ch_addr");
                let root_addr = node.root_addr.expect("CH/root always has root_addr");
                let assigned_node_addr = node
                    .node_id_pool
                    .as_mut()
                    .expect("CH/root always owns a node-id pool")
                    .request(requester_gui);
                if let Some(node_addr) = assigned_node_addr {
                    let assigned = Address::new(ch_addr.net_addr, node_addr);
                    let mut reply = envelope(
                        node,
                        gui,
                        Address::BROADCAST,
                        PacketBody::JoinReply {
                            dest_gui: requester_gui,
                            addr: assigned,
                            root_addr,
                        },
                    );
                    reply.hop_count = Some(node.hop_count + 1);
                    io.send(gui, reply);
                }
            }
        }
        PacketBody::NetworkRequest => {
            if node.role == Role::Root {
                if let Some(source) = pck.source {
                    let net_addr = node
                        .net_id_pool
                        .as_mut()
                        .expect("root always owns a net-id pool")
                        .request(source);
                    if let Some(net_addr) = net_addr {
                        let reply = envelope(
                            node,
                            gui,
                            source,
                            PacketBody::NetworkReply {
                                addr: Address::new(net_addr, CLUSTER_HEAD_NODE_ADDR),
                            },
                        );
                        route_and_forward(node, io, gui, reply);
                    }
                }
            } else {
                route_and_forward(node, io, gui, pck);
            }
        }
        PacketBody::NetworkReply { addr } => {
            // Only reached here as the final recipient when this CH re-requests a
            // net-id after a repair; ordinary first-time allocation is handled in
            // `on_receive_as_registered`.
            become_cluster_head(node, io, gui, *addr);
        }
        PacketBody::JoinAck => {
            if let Some(source) = pck.source {
                if !node.members.contains(&source) {
                    node.members.push(source);
                }
            }
        }
        PacketBody::NetworkUpdate { child_networks } => {
            if let Some(sender_gui) = pck.gui {
                node.child_networks.insert(sender_gui, child_networks.clone());
                if node.role != Role::Root {
                    send_network_update(node, io, gui);
                }
            }
        }
        PacketBody::TableShare { entries } => {
            merge_table_share(node, io, &pck, entries)?;
        }
        PacketBody::IAmOrphan => on_i_am_orphan(node, io, gui, &pck),
        PacketBody::SensorData { .. } => {
            // Reached the root (or, transiently, a CH addressed directly): this is the
            // application-data sink, nothing further to forward.
        }
        PacketBody::JoinReply { .. } => {}
    }
    Ok(())
}

fn on_receive_as_registered(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, pck: Packet) -> HandlerResult {
    match &pck.body {
        PacketBody::HeartBeat { role, addr, ch_addr } => {
            update_neighbor(node, io, gui, &pck, *role, *addr, *ch_addr);
        }
        PacketBody::JoinRequest => {
            if let Some(requester_gui) = pck.gui {
                if !node.received_jr_guis.contains(&requester_gui) {
                    node.received_jr_guis.push(requester_gui);
                }
                let root_addr = node.root_addr.expect("registered node always has root_addr");
                let request = envelope(node, gui, root_addr, PacketBody::NetworkRequest);
                route_and_forward(node, io, gui, request);
            }
        }
        PacketBody::NetworkReply { addr } => {
            become_cluster_head(node, io, gui, *addr);
        }
        PacketBody::TableShare { entries } => {
            merge_table_share(node, io, &pck, entries)?;
        }
        PacketBody::IAmOrphan => on_i_am_orphan(node, io, gui, &pck),
        _ => {}
    }
    Ok(())
}

fn on_receive_as_unregistered(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, pck: Packet) -> HandlerResult {
    match &pck.body {
        PacketBody::HeartBeat { role, addr, ch_addr } => {
            update_neighbor(node, io, gui, &pck, *role, *addr, *ch_addr);
        }
        PacketBody::JoinReply { dest_gui, addr, root_addr } => {
            if *dest_gui == gui {
                node.addr = Some(*addr);
                node.parent_gui = pck.gui;
                node.root_addr = Some(*root_addr);
                node.hop_count = pck.hop_count.unwrap_or(HOP_COUNT_UNKNOWN);
                node.timers.cancel("JOIN_REQUEST");
                node.registered_time = Some(io.now());
                if let Some(wake) = node.wake_up_time {
                    io.trace_registration(gui, wake, io.now());
                }
                node.role = if node.ch_addr.is_some() {
                    Role::ClusterHead
                } else {
                    Role::Registered
                };
                send_heart_beat(node, io, gui);
                let hb_interval = io.config().heart_beat_time_interval;
                arm(node, io, gui, "HEART_BEAT", Duration::from_secs_f64(hb_interval));
                let ts_interval = io.config().table_share_interval;
                arm(node, io, gui, "TABLE_SHARE", Duration::from_secs_f64(ts_interval));
                if let Some(source) = pck.source {
                    let ack = envelope(node, gui, source, PacketBody::JoinAck);
                    io.send(gui, ack);
                }
            }
        }
        PacketBody::IAmOrphan => on_i_am_orphan(node, io, gui, &pck),
        _ => {}
    }
    Ok(())
}

fn on_receive_as_undiscovered(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, pck: Packet) -> HandlerResult {
    if let PacketBody::HeartBeat { .. } = &pck.body {
        node.timers.cancel("PROBE");
        become_unregistered(node, io, gui);
    }
    Ok(())
}

fn on_i_am_orphan(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, pck: &Packet) {
    let parent_addr = node
        .parent_gui
        .and_then(|g| node.neighbors.get(&g))
        .map(|rec| rec.source);
    if parent_addr.is_some() && parent_addr == pck.source {
        repair(node, io, gui);
    }
}

fn merge_table_share(
    node: &mut NodeState,
    io: &dyn NodeIo,
    pck: &Packet,
    entries: &[MeshShareEntry],
) -> HandlerResult {
    let mesh_hop_n = io.config().mesh_hop_n;
    let via = pck.source;
    for e in entries {
        if node.neighbors.contains_key(&e.gui) {
            continue;
        }
        let new_hop_count = e.neighbor_hop_count + 1;
        if new_hop_count > mesh_hop_n + 1 {
            return Err(ProtocolError::MeshHopOverflow {
                gui: e.gui,
                hop_count: new_hop_count,
                max: mesh_hop_n + 1,
            });
        }
        node.neighbors.insert(
            e.gui,
            NeighborRecord {
                gui: e.gui,
                source: e.addr,
                role: Role::Unregistered,
                addr: Some(e.addr),
                ch_addr: None,
                hop_count: HOP_COUNT_UNKNOWN,
                arrival_time: io.now(),
                distance: None,
                neighbor_hop_count: new_hop_count,
                next_hop: via,
            },
        );
    }
    Ok(())
}

// --- Registration and cluster-head formation (§4.5.3, §4.5.4) --------------------

fn become_unregistered(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    node.reset_to_unregistered();
    send_probe(node, io, gui);
    let interval = io.config().join_request_time_interval;
    arm(node, io, gui, "JOIN_REQUEST", Duration::from_secs_f64(interval));
}

fn select_and_join(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    let best = node
        .candidate_parents
        .iter()
        .copied()
        .filter(|g| node.neighbors.contains_key(g))
        .min_by_key(|&g| (node.neighbors[&g].hop_count, g));
    if let Some(parent_gui) = best {
        let parent_addr = node.neighbors[&parent_gui].source;
        let pck = envelope(node, gui, parent_addr, PacketBody::JoinRequest);
        io.send(gui, pck);
    }
}

fn become_root(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    let root_addr = Address::new(0, CLUSTER_HEAD_NODE_ADDR);
    node.addr = Some(root_addr);
    node.ch_addr = Some(root_addr);
    node.root_addr = Some(root_addr);
    node.hop_count = 0;
    node.role = Role::Root;
    // §4.4 bounds net-id slots to `1..NUM_OF_CLUSTERS-1`: NUM_OF_CLUSTERS itself would
    // collide with `BROADCAST_NET_ADDR` (255) once NUM_OF_CLUSTERS is 255, as it is by
    // default.
    node.net_id_pool = Some(AddressPool::new(node_id_pool_max(
        io.config().num_of_clusters().saturating_sub(1),
    )));
    node.node_id_pool = Some(AddressPool::new(node_id_pool_max(io.config().num_of_children)));
    let hb_interval = io.config().heart_beat_time_interval;
    arm(node, io, gui, "HEART_BEAT", Duration::from_secs_f64(hb_interval));
    send_heart_beat(node, io, gui);
    let ts_interval = io.config().table_share_interval;
    arm(node, io, gui, "TABLE_SHARE", Duration::from_secs_f64(ts_interval));
    let ch_interval = io.config().export_ch_csv_interval;
    arm(node, io, gui, "EXPORT_CH_CSV", Duration::from_secs_f64(ch_interval));
    let nb_interval = io.config().export_neighbor_csv_interval;
    arm(node, io, gui, "EXPORT_NEIGHBOR_CSV", Duration::from_secs_f64(nb_interval));
}

fn node_id_pool_max(count: u32) -> u8 {
    count.min(u8::MAX as u32) as u8
}

fn become_cluster_head(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, assigned: Address) {
    node.ch_addr = Some(assigned);
    node.role = Role::ClusterHead;
    node.node_id_pool = Some(AddressPool::new(node_id_pool_max(io.config().num_of_children)));
    send_heart_beat(node, io, gui);
    send_network_update(node, io, gui);
    let deferred = std::mem::take(&mut node.received_jr_guis);
    for requester_gui in deferred {
        let assigned_node_addr = node
            .node_id_pool
            .as_mut()
            .expect("just allocated above")
            .request(requester_gui);
        if let Some(node_addr) = assigned_node_addr {
            let mut reply = envelope(
                node,
                gui,
                Address::BROADCAST,
                PacketBody::JoinReply {
                    dest_gui: requester_gui,
                    addr: Address::new(assigned.net_addr, node_addr),
                    root_addr: node.root_addr.expect("new CH always has root_addr"),
                },
            );
            reply.hop_count = Some(node.hop_count + 1);
            io.send(gui, reply);
        }
    }
}

fn send_network_update(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    if node.role == Role::Root {
        return;
    }
    let ch_addr = match node.ch_addr {
        Some(a) => a,
        None => return,
    };
    let mut nets = vec![ch_addr.net_addr];
    nets.extend(node.child_networks.values_flat());
    let parent_addr = node
        .parent_gui
        .and_then(|g| node.neighbors.get(&g))
        .map(|rec| rec.source);
    if let Some(parent_addr) = parent_addr {
        let pck = envelope(node, gui, parent_addr, PacketBody::NetworkUpdate { child_networks: nets });
        io.send(gui, pck);
    }
}

// --- Tree + mesh routing (§4.5.5) -------------------------------------------------

fn resolve_next_hop(node: &NodeState, dest: Address) -> (Option<Address>, PathType) {
    let mut next_hop = None;
    let mut path_type = PathType::Tree;

    if node.role != Role::Root {
        if let Some(rec) = node.parent_gui.and_then(|g| node.neighbors.get(&g)) {
            next_hop = Some(rec.source);
        }
    }

    if let Some(ch_addr) = node.ch_addr {
        if dest.net_addr == ch_addr.net_addr {
            next_hop = Some(dest);
        }
    }

    for (child_gui, nets) in node.child_networks.iter() {
        if nets.contains(&dest.net_addr) {
            if let Some(rec) = node.neighbors.get(&child_gui) {
                next_hop = Some(rec.source);
            }
            break;
        }
    }

    for rec in node.neighbors.values() {
        if rec.addr == Some(dest) || rec.ch_addr == Some(dest) {
            if rec.neighbor_hop_count == 1 {
                next_hop = Some(dest);
                path_type = PathType::Direct;
            } else {
                next_hop = rec.next_hop;
                path_type = PathType::Mesh;
            }
            break;
        }
    }
    if node.members.contains(&dest) {
        next_hop = Some(dest);
        path_type = PathType::Direct;
    }

    (next_hop, path_type)
}

fn route_and_forward(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize, mut pck: Packet) {
    let (next_hop, path_type) = resolve_next_hop(node, pck.dest);
    let hop_count = pck.hop_count.unwrap_or(0) + 1;
    pck.hop_count = Some(hop_count);
    pck.next_hop = next_hop;
    io.trace_route(
        pck.type_name(),
        pck.source,
        node.addr.or(node.ch_addr),
        next_hop,
        pck.dest,
        hop_count,
        path_type,
    );
    // Missing route (e.g. parent dropped mid-repair): producing no packet is correct,
    // per the specification's error-handling policy for a missing neighbor on forward.
    if next_hop.is_some() {
        io.send(gui, pck);
    }
}

// --- Repair (§4.5.8) ---------------------------------------------------------------

fn check_neighbors(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    if node.role == Role::Root {
        return;
    }
    let expiry = Duration::from_secs_f64(3.0 * io.config().heart_beat_time_interval);
    let now = io.now();
    let expired: Vec<usize> = node
        .neighbors
        .iter()
        .filter(|(_, rec)| now - rec.arrival_time > expiry)
        .map(|(&g, _)| g)
        .collect();
    for expired_gui in &expired {
        node.neighbors.remove(expired_gui);
        node.candidate_parents.retain(|g| g != expired_gui);
    }
    let parent_lost = node.parent_gui.map_or(false, |p| expired.contains(&p));
    if parent_lost {
        repair(node, io, gui);
    }
}

fn repair(node: &mut NodeState, io: &mut dyn NodeIo, gui: usize) {
    if node.role == Role::Registered {
        match io.config().repairing_method {
            RepairingMethod::AllOrphan => {
                send_i_am_orphan(node, io, gui);
                become_unregistered(node, io, gui);
            }
            RepairingMethod::FindAnotherParent => {
                if let Some(old_parent) = node.parent_gui.take() {
                    node.candidate_parents.retain(|g| *g != old_parent);
                    node.neighbors.remove(&old_parent);
                }
                if !node.candidate_parents.is_empty() {
                    node.timers.cancel_all();
                    node.role = Role::Unregistered;
                    select_and_join(node, io, gui);
                } else {
                    send_i_am_orphan(node, io, gui);
                    become_unregistered(node, io, gui);
                }
            }
        }
    } else {
        // A CH/root losing its own parent orphans its whole subtree; the children
        // learn of it from this node's own I_AM_ORPHAN broadcast and repair in turn.
        send_i_am_orphan(node, io, gui);
        become_unregistered(node, io, gui);
    }
}

fn send_i_am_orphan(node: &NodeState, io: &mut dyn NodeIo, gui: usize) {
    let pck = envelope(node, gui, Address::BROADCAST, PacketBody::IAmOrphan);
    io.send(gui, pck);
}

#[cfg(test)]
#[path = "unit_tests/handlers_tests.rs"]
mod handlers_tests;
