use super::*;

#[test]
fn broadcast_sentinel() {
    let b = Address::new(255, 255);
    assert!(b.is_broadcast());
    assert_eq!(b, Address::BROADCAST);
}

#[test]
fn local_net_broadcast_matches_only_its_net() {
    let pck = Address::new(3, BROADCAST_NODE_ADDR);
    assert!(pck.is_local_net_broadcast_for(3));
    assert!(!pck.is_local_net_broadcast_for(4));
    assert!(!Address::new(3, 1).is_local_net_broadcast_for(3));
}

#[test]
fn cluster_head_address_uses_reserved_node_id() {
    let ch = Address::cluster_head(7);
    assert_eq!(ch, Address::new(7, CLUSTER_HEAD_NODE_ADDR));
}

#[test]
fn debug_format_matches_bracket_pair() {
    assert_eq!(format!("{:?}", Address::new(1, 2)), "[1,2]");
}
