use super::*;

#[test]
fn num_of_clusters_matches_reference_bit_math() {
    let config = Config::default();
    // bits_child = ceil(log2(253)) = 8, bits_cluster = 16 - 8 = 8, clusters = 255.
    assert_eq!(config.num_of_clusters(), 255);
}

#[test]
fn tx_range_for_known_power_level() {
    let config = Config::default();
    assert_eq!(config.tx_range_for("-10 dBm"), 50.0);
}

#[test]
fn tx_range_for_unknown_power_falls_back_to_default() {
    let config = Config::default();
    assert_eq!(config.tx_range_for("nonsense"), config.tx_range_for("0 dBm"));
}

#[test]
fn default_repairing_method_is_find_another_parent() {
    assert_eq!(Config::default().repairing_method, RepairingMethod::FindAnotherParent);
}
