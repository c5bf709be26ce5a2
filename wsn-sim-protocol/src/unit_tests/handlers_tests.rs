use super::*;
use crate::config::Config;
use std::cell::RefCell;

#[derive(Default)]
struct FakeIo {
    config: Config,
    now: i64,
    sent: RefCell<Vec<(usize, Packet)>>,
    timers: RefCell<Vec<(usize, &'static str, Duration)>>,
}

impl FakeIo {
    fn new() -> Self {
        FakeIo {
            config: Config::default(),
            now: 0,
            sent: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
        }
    }
}

impl NodeIo for FakeIo {
    fn now(&self) -> VirtualTime {
        VirtualTime(self.now)
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn send(&mut self, from_gui: usize, packet: Packet) {
        self.sent.borrow_mut().push((from_gui, packet));
    }

    fn schedule_timer(&mut self, gui: usize, name: &'static str, delay: Duration) {
        self.timers.borrow_mut().push((gui, name, delay));
    }

    fn peer_distance(&self, _from_gui: usize, _to_gui: usize) -> f64 {
        1.0
    }

    fn trace_route(
        &mut self,
        _packet_type: &'static str,
        _source: Option<Address>,
        _current_node: Option<Address>,
        _next_hop: Option<Address>,
        _dest: Address,
        _hop_count: u32,
        _path_type: PathType,
    ) {
    }

    fn trace_registration(&mut self, _gui: usize, _start: VirtualTime, _registered: VirtualTime) {}
}

fn node(gui: usize, eligible: bool) -> NodeState {
    NodeState::new(gui, "0 dBm".to_string(), 100.0, eligible)
}

#[test]
fn isolated_root_eligible_node_becomes_root_after_probe_threshold() {
    let mut n = node(0, true);
    let mut io = FakeIo::new();
    on_timer_fired(&mut n, &mut io, 0, "ARRIVAL").unwrap();
    // Drain the PROBE timer the reference default 10 times; the 10th should elect root.
    for _ in 0..10 {
        n.timers.arm("PROBE");
        on_timer_fired(&mut n, &mut io, 0, "PROBE").unwrap();
    }
    assert_eq!(n.role, Role::Root);
    assert_eq!(n.addr, Some(Address::new(0, CLUSTER_HEAD_NODE_ADDR)));
    assert_eq!(n.hop_count, 0);
}

#[test]
fn heartbeat_moves_undiscovered_node_to_unregistered_and_arms_join_request() {
    let mut n = node(1, false);
    n.role = Role::Undiscovered;
    let mut io = FakeIo::new();
    let hb = Packet {
        gui: Some(0),
        source: Some(Address::new(0, CLUSTER_HEAD_NODE_ADDR)),
        hop_count: Some(0),
        ..Packet::new(
            Address::BROADCAST,
            PacketBody::HeartBeat {
                role: Role::Root,
                addr: Some(Address::new(0, CLUSTER_HEAD_NODE_ADDR)),
                ch_addr: Some(Address::new(0, CLUSTER_HEAD_NODE_ADDR)),
            },
        )
    };
    on_receive(&mut n, &mut io, 1, hb).unwrap();
    assert_eq!(n.role, Role::Unregistered);
    assert!(io.timers.borrow().iter().any(|(_, name, _)| *name == "JOIN_REQUEST"));
}

#[test]
fn join_reply_for_other_gui_is_ignored() {
    let mut n = node(1, false);
    n.role = Role::Unregistered;
    let mut io = FakeIo::new();
    let reply = Packet {
        gui: Some(0),
        source: Some(Address::new(0, CLUSTER_HEAD_NODE_ADDR)),
        hop_count: Some(1),
        ..Packet::new(
            Address::new(0, BROADCAST_NODE_ADDR),
            PacketBody::JoinReply {
                dest_gui: 99,
                addr: Address::new(0, 1),
                root_addr: Address::new(0, CLUSTER_HEAD_NODE_ADDR),
            },
        )
    };
    on_receive(&mut n, &mut io, 1, reply).unwrap();
    assert!(n.addr.is_none());
}

#[test]
fn table_share_entry_exceeding_limit_is_rejected() {
    let mut n = node(1, false);
    n.role = Role::Registered;
    n.ch_addr = Some(Address::new(0, CLUSTER_HEAD_NODE_ADDR));
    let mut io = FakeIo::new();
    io.config.mesh_hop_n = 2;
    let share = Packet {
        gui: Some(9),
        source: Some(Address::new(0, 9)),
        ..Packet::new(
            Address::new(0, 1),
            PacketBody::TableShare {
                entries: vec![MeshShareEntry {
                    gui: 42,
                    addr: Address::new(0, 42),
                    neighbor_hop_count: 2,
                }],
            },
        )
    };
    let err = on_receive(&mut n, &mut io, 1, share).unwrap_err();
    assert!(matches!(err, ProtocolError::MeshHopOverflow { .. }));
}
