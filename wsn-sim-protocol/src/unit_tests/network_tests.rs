use super::*;
use crate::config::Config;
use crate::role::Role;

#[test]
fn two_node_scenario_converges_to_root_and_registered_child() {
    let dir = TempDir::new("wsn_sim_network_two_node_test");
    let config = Config::default();
    let mut network = Network::new(
        config,
        vec![
            NodePlacement {
                position: (0.0, 0.0),
                tx_power: "0 dBm".to_string(),
                is_root_eligible: true,
            },
            NodePlacement {
                position: (30.0, 0.0),
                tx_power: "0 dBm".to_string(),
                is_root_eligible: false,
            },
        ],
        dir.as_path(),
    );

    network.run(VirtualTime(60 * 1_000_000), None).unwrap();

    assert_eq!(network.node(0).role, Role::Root);
    assert_eq!(network.node(1).role, Role::Registered);
    assert_eq!(network.node(1).ch_addr, Some(Address::new(0, 254)));
    assert_eq!(network.node(1).hop_count, 1);
}

#[test]
fn isolated_non_eligible_node_never_becomes_root() {
    let dir = TempDir::new("wsn_sim_network_isolated_test");
    let config = Config::default();
    let mut network = Network::new(
        config,
        vec![NodePlacement {
            position: (0.0, 0.0),
            tx_power: "0 dBm".to_string(),
            is_root_eligible: false,
        }],
        dir.as_path(),
    );

    network.run(VirtualTime(15 * 1_000_000), None).unwrap();

    assert_ne!(network.node(0).role, Role::Root);
}

struct TempDir(std::path::PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        path.push(format!("{}-{}", std::process::id(), name));
        std::fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }

    fn as_path(&self) -> &std::path::Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
