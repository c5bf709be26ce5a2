// Node Base: sleep flag, named-timer registry, tables and send/receive plumbing.
//
// Grounded on `wsnlab/source/wsnlab.py`'s `Node` (the `active_timer_list`
// membership-counted cancellation, `can_receive`) and on `data_collection_tree.py` /
// `repairing_network.py`'s `SensorNode.init`/`become_unregistered` for the table set
// that gets reset on every transition back to `UNREGISTERED`.

use crate::address::Address;
use crate::allocator::AddressPool;
use crate::neighbor::NeighborRecord;
use crate::role::Role;
use std::collections::HashMap;
use wsn_sim_kernel::base_types::VirtualTime;

/// Placeholder hop count for "no route to root yet", matching the reference's literal
/// `99999` sentinel.
pub const HOP_COUNT_UNKNOWN: u32 = 99_999;

/// Counts outstanding arm/cancel pairs per timer name. `set_timer` increments;
/// `kill_timer`/a natural firing both consume one count. A timer only "fires" into the
/// handler while its count is above zero at dispatch time, matching the reference's
/// `name in active_timer_list` membership check (implemented there as a list append/
/// remove-one-occurrence pair, here as a saturating counter for O(1) bookkeeping).
#[derive(Debug, Default)]
pub struct TimerRegistry {
    counts: HashMap<&'static str, u32>,
}

impl TimerRegistry {
    pub fn arm(&mut self, name: &'static str) {
        *self.counts.entry(name).or_insert(0) += 1;
    }

    pub fn cancel(&mut self, name: &'static str) {
        if let Some(count) = self.counts.get_mut(name) {
            if *count <= 1 {
                self.counts.remove(name);
            } else {
                *count -= 1;
            }
        }
    }

    pub fn cancel_all(&mut self) {
        self.counts.clear();
    }

    /// Consumes one count for `name` and reports whether the firing should proceed.
    pub fn try_fire(&mut self, name: &'static str) -> bool {
        match self.counts.get_mut(name) {
            Some(count) if *count > 0 => {
                if *count == 1 {
                    self.counts.remove(name);
                } else {
                    *count -= 1;
                }
                true
            }
            _ => false,
        }
    }
}

/// Insertion-ordered map from child-CH `gui` to the set of net-addrs reachable through
/// it. §4.5.5 requires iterating child networks in insertion order to match the
/// reference's dict-iteration behavior, which a `HashMap` cannot guarantee.
#[derive(Debug, Default, Clone)]
pub struct ChildNetworksTable {
    entries: Vec<(usize, Vec<u8>)>,
}

impl ChildNetworksTable {
    pub fn insert(&mut self, gui: usize, networks: Vec<u8>) {
        if let Some(entry) = self.entries.iter_mut().find(|(g, _)| *g == gui) {
            entry.1 = networks;
        } else {
            self.entries.push((gui, networks));
        }
    }

    pub fn remove(&mut self, gui: usize) {
        self.entries.retain(|(g, _)| *g != gui);
    }

    pub fn contains(&self, gui: usize) -> bool {
        self.entries.iter().any(|(g, _)| *g == gui)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.entries.iter().map(|(g, nets)| (*g, nets.as_slice()))
    }

    pub fn values_flat(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().flat_map(|(_, nets)| nets.iter().copied())
    }
}

#[derive(Debug)]
pub struct NodeState {
    pub gui: usize,
    pub tx_power: String,
    pub tx_range: f64,

    pub role: Role,
    pub is_sleep: bool,
    pub is_root_eligible: bool,

    pub addr: Option<Address>,
    pub ch_addr: Option<Address>,
    pub parent_gui: Option<usize>,
    pub root_addr: Option<Address>,
    pub hop_count: u32,

    pub probe_counter: u32,
    pub probe_threshold: u32,

    pub neighbors: HashMap<usize, NeighborRecord>,
    pub candidate_parents: Vec<usize>,
    pub members: Vec<Address>,
    pub child_networks: ChildNetworksTable,
    pub received_jr_guis: Vec<usize>,

    pub timers: TimerRegistry,

    /// Net-id pool; `Some` only while this node is `ROOT`.
    pub net_id_pool: Option<AddressPool<Address>>,
    /// Node-id pool; `Some` while this node is `CLUSTER_HEAD` or `ROOT`.
    pub node_id_pool: Option<AddressPool<usize>>,

    pub wake_up_time: Option<VirtualTime>,
    pub registered_time: Option<VirtualTime>,
}

impl NodeState {
    pub fn new(gui: usize, tx_power: String, tx_range: f64, is_root_eligible: bool) -> Self {
        NodeState {
            gui,
            tx_power,
            tx_range,
            role: Role::Undiscovered,
            is_sleep: true,
            is_root_eligible,
            addr: None,
            ch_addr: None,
            parent_gui: None,
            root_addr: None,
            hop_count: HOP_COUNT_UNKNOWN,
            probe_counter: 0,
            probe_threshold: 10,
            neighbors: HashMap::new(),
            candidate_parents: Vec::new(),
            members: Vec::new(),
            child_networks: ChildNetworksTable::default(),
            received_jr_guis: Vec::new(),
            timers: TimerRegistry::default(),
            net_id_pool: None,
            node_id_pool: None,
            wake_up_time: None,
            registered_time: None,
        }
    }

    pub fn sleep(&mut self) {
        self.is_sleep = true;
    }

    pub fn wake_up(&mut self) {
        self.is_sleep = false;
    }

    /// Admits `dest` per §4.3: global broadcast, this node's own address, its cluster
    /// head's address, or a local-net broadcast on either net_addr.
    pub fn can_receive(&self, dest: Address) -> bool {
        if dest.is_broadcast() {
            return true;
        }
        if let Some(addr) = self.addr {
            if dest == addr || dest.is_local_net_broadcast_for(addr.net_addr) {
                return true;
            }
        }
        if let Some(ch_addr) = self.ch_addr {
            if dest == ch_addr || dest.is_local_net_broadcast_for(ch_addr.net_addr) {
                return true;
            }
        }
        false
    }

    /// Resets discovery/registration state to `UNREGISTERED`, as `become_unregistered`
    /// does in the reference (minus sending PROBE / arming JOIN_REQUEST, which are the
    /// caller's responsibility since they require scheduling access).
    pub fn reset_to_unregistered(&mut self) {
        self.addr = None;
        self.ch_addr = None;
        self.parent_gui = None;
        self.root_addr = None;
        self.role = Role::Unregistered;
        self.probe_counter = 0;
        self.probe_threshold = 10;
        self.hop_count = HOP_COUNT_UNKNOWN;
        self.neighbors.clear();
        self.candidate_parents.clear();
        self.child_networks = ChildNetworksTable::default();
        self.members.clear();
        self.received_jr_guis.clear();
    }
}

#[cfg(test)]
#[path = "unit_tests/node_tests.rs"]
mod node_tests;
