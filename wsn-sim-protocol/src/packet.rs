// Tagged-variant packet type replacing the reference's untyped message dictionaries
// (see SPEC_FULL.md §9 "Dynamic dispatch"). All field names are drawn from §4.5.2.

use crate::address::Address;
use crate::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PathType {
    Tree,
    Direct,
    Mesh,
}

impl PathType {
    pub fn as_str(self) -> &'static str {
        match self {
            PathType::Tree => "TREE",
            PathType::Direct => "DIRECT",
            PathType::Mesh => "MESH",
        }
    }
}

/// One shared neighbor-table entry as broadcast by `TABLE_SHARE`.
#[derive(Debug, Clone, Copy)]
pub struct MeshShareEntry {
    pub gui: usize,
    pub addr: Address,
    pub neighbor_hop_count: u32,
}

#[derive(Debug, Clone)]
pub enum PacketBody {
    Probe,
    HeartBeat {
        role: Role,
        addr: Option<Address>,
        ch_addr: Option<Address>,
    },
    JoinRequest,
    // §4.5.2 also lists a `tx_power` field on JOIN_REPLY; the reference never carries
    // one either (a joining node keeps whatever tx_power it was configured with, it
    // never adopts its parent's), so it is omitted here too rather than threaded through
    // unused.
    JoinReply {
        dest_gui: usize,
        addr: Address,
        root_addr: Address,
    },
    JoinAck,
    NetworkRequest,
    NetworkReply {
        addr: Address,
    },
    NetworkUpdate {
        child_networks: Vec<u8>,
    },
    TableShare {
        entries: Vec<MeshShareEntry>,
    },
    IAmOrphan,
    SensorData {
        sensor_value: f64,
    },
}

impl PacketBody {
    pub fn type_name(&self) -> &'static str {
        match self {
            PacketBody::Probe => "PROBE",
            PacketBody::HeartBeat { .. } => "HEART_BEAT",
            PacketBody::JoinRequest => "JOIN_REQUEST",
            PacketBody::JoinReply { .. } => "JOIN_REPLY",
            PacketBody::JoinAck => "JOIN_ACK",
            PacketBody::NetworkRequest => "NETWORK_REQUEST",
            PacketBody::NetworkReply { .. } => "NETWORK_REPLY",
            PacketBody::NetworkUpdate { .. } => "NETWORK_UPDATE",
            PacketBody::TableShare { .. } => "TABLE_SHARE",
            PacketBody::IAmOrphan => "I_AM_ORPHAN",
            PacketBody::SensorData { .. } => "SENSOR_DATA",
        }
    }
}

/// Common envelope shared by every message type, plus its tagged `body`.
#[derive(Debug, Clone)]
pub struct Packet {
    pub dest: Address,
    pub next_hop: Option<Address>,
    pub source: Option<Address>,
    pub hop_count: Option<u32>,
    pub gui: Option<usize>,
    pub body: PacketBody,
}

impl Packet {
    pub fn new(dest: Address, body: PacketBody) -> Self {
        Packet {
            dest,
            next_hop: None,
            source: None,
            hop_count: None,
            gui: None,
            body,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.body.type_name()
    }
}
