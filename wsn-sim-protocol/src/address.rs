// Two-octet network address, grounded on `wsnlab/source/wsnlab.py`'s `Addr` class.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const BROADCAST_NET_ADDR: u8 = 255;
pub const BROADCAST_NODE_ADDR: u8 = 255;
/// `node_addr` reserved for a cluster's own head.
pub const CLUSTER_HEAD_NODE_ADDR: u8 = 254;

#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct Address {
    pub net_addr: u8,
    pub node_addr: u8,
}

impl Address {
    pub const fn new(net_addr: u8, node_addr: u8) -> Self {
        Address { net_addr, node_addr }
    }

    pub const BROADCAST: Address = Address::new(BROADCAST_NET_ADDR, BROADCAST_NODE_ADDR);

    /// Address of the cluster head owning `net_addr`.
    pub const fn cluster_head(net_addr: u8) -> Self {
        Address::new(net_addr, CLUSTER_HEAD_NODE_ADDR)
    }

    pub fn is_broadcast(self) -> bool {
        self == Address::BROADCAST
    }

    /// `node_addr=255` with a concrete `net_addr` addresses every node in that cluster.
    pub fn is_local_net_broadcast_for(self, net_addr: u8) -> bool {
        self.node_addr == BROADCAST_NODE_ADDR && self.net_addr == net_addr
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.net_addr, self.node_addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
#[path = "unit_tests/address_tests.rs"]
mod address_tests;
