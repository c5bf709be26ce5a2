use super::*;

#[test]
fn test_neighbors_sorted_ascending_by_distance() {
    let mut topo = TopologyIndex::new();
    let a = topo.add_node((0.0, 0.0));
    let _b = topo.add_node((30.0, 0.0));
    let _c = topo.add_node((10.0, 0.0));
    let list: Vec<usize> = topo.in_range(a, 1000.0).map(|e| e.gui).collect();
    assert_eq!(list, vec![2, 1]);
}

#[test]
fn test_in_range_stops_at_first_out_of_range_entry() {
    let mut topo = TopologyIndex::new();
    let a = topo.add_node((0.0, 0.0));
    topo.add_node((10.0, 0.0));
    topo.add_node((1000.0, 0.0));
    let list: Vec<usize> = topo.in_range(a, 100.0).map(|e| e.gui).collect();
    assert_eq!(list, vec![1]);
}

#[test]
fn test_no_node_lists_itself() {
    let mut topo = TopologyIndex::new();
    let a = topo.add_node((0.0, 0.0));
    topo.add_node((5.0, 0.0));
    for entry in topo.in_range(a, 1000.0) {
        assert_ne!(entry.gui, a);
    }
}

#[test]
fn test_move_repositions_across_all_lists() {
    let mut topo = TopologyIndex::new();
    let a = topo.add_node((0.0, 0.0));
    let b = topo.add_node((10.0, 0.0));
    let c = topo.add_node((20.0, 0.0));
    // Initially b is closer to a than c is.
    assert_eq!(
        topo.in_range(a, 1000.0).next().map(|e| e.gui),
        Some(b)
    );
    topo.move_node(b, (1000.0, 0.0));
    assert_eq!(
        topo.in_range(a, 1000.0).next().map(|e| e.gui),
        Some(c)
    );
}
