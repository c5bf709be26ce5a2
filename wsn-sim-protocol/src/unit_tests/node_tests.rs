use super::*;
use crate::address::Address;

#[test]
fn timer_registry_fires_once_per_arm() {
    let mut timers = TimerRegistry::default();
    timers.arm("PROBE");
    assert!(timers.try_fire("PROBE"));
    assert!(!timers.try_fire("PROBE"));
}

#[test]
fn timer_registry_cancel_consumes_one_arm() {
    let mut timers = TimerRegistry::default();
    timers.arm("PROBE");
    timers.arm("PROBE");
    timers.cancel("PROBE");
    assert!(timers.try_fire("PROBE"));
    assert!(!timers.try_fire("PROBE"));
}

#[test]
fn timer_registry_cancel_all_clears_every_name() {
    let mut timers = TimerRegistry::default();
    timers.arm("PROBE");
    timers.arm("HEART_BEAT");
    timers.cancel_all();
    assert!(!timers.try_fire("PROBE"));
    assert!(!timers.try_fire("HEART_BEAT"));
}

#[test]
fn child_networks_table_preserves_insertion_order() {
    let mut table = ChildNetworksTable::default();
    table.insert(5, vec![1]);
    table.insert(2, vec![2]);
    table.insert(5, vec![1, 9]);
    let order: Vec<usize> = table.iter().map(|(gui, _)| gui).collect();
    assert_eq!(order, vec![5, 2]);
}

#[test]
fn can_receive_admits_own_address_and_cluster_head() {
    let mut node = NodeState::new(0, "0 dBm".to_string(), 100.0, true);
    node.addr = Some(Address::new(1, 2));
    node.ch_addr = Some(Address::new(1, 254));
    assert!(node.can_receive(Address::new(1, 2)));
    assert!(node.can_receive(Address::new(1, 254)));
    assert!(node.can_receive(Address::BROADCAST));
    assert!(!node.can_receive(Address::new(2, 2)));
}

#[test]
fn reset_to_unregistered_clears_addressing_and_tables() {
    let mut node = NodeState::new(0, "0 dBm".to_string(), 100.0, false);
    node.addr = Some(Address::new(1, 2));
    node.candidate_parents.push(7);
    node.reset_to_unregistered();
    assert!(node.addr.is_none());
    assert!(node.candidate_parents.is_empty());
    assert_eq!(node.role, Role::Unregistered);
}
