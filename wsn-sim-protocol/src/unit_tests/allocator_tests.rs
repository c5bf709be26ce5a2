use super::*;

#[test]
fn first_request_leases_slot_one() {
    let mut pool: AddressPool<usize> = AddressPool::new(5);
    assert_eq!(pool.request(10), Some(1));
    assert_eq!(pool.holder_of(1), Some(&10));
}

#[test]
fn duplicate_request_from_same_holder_is_idempotent() {
    let mut pool: AddressPool<usize> = AddressPool::new(5);
    assert_eq!(pool.request(10), Some(1));
    assert_eq!(pool.request(10), Some(1));
}

#[test]
fn distinct_holders_get_distinct_slots() {
    let mut pool: AddressPool<usize> = AddressPool::new(5);
    assert_eq!(pool.request(10), Some(1));
    assert_eq!(pool.request(20), Some(2));
}

#[test]
fn exhausted_pool_returns_none() {
    let mut pool: AddressPool<usize> = AddressPool::new(2);
    assert_eq!(pool.request(1), Some(1));
    assert_eq!(pool.request(2), Some(2));
    assert_eq!(pool.request(3), None);
}
