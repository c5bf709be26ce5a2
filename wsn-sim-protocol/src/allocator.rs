// Address allocator: per-root net-id pool and per-CH node-id pool.
//
// Grounded on §4.4 of the specification; the reference source never implements an
// explicit pool (`data_collection_tree.py`'s root just mints `Addr(pck['source'].node_addr, 254)`
// unconditionally), so this module is built directly from the spec's "first free slot,
// or the slot already held by this requester" rule rather than a literal Python translation.

/// A pool of `1..=max_slot` integer slots, each free or leased to exactly one holder.
/// Duplicate requests from the same holder return the same slot (idempotent), matching
/// P6/P7.
#[derive(Debug, Clone)]
pub struct AddressPool<K> {
    leases: Vec<Option<K>>,
}

impl<K: PartialEq + Clone> AddressPool<K> {
    pub fn new(max_slot: u8) -> Self {
        AddressPool {
            leases: vec![None; max_slot as usize + 1],
        }
    }

    /// Returns the first slot whose leaseholder is absent or equal to `holder`, leasing
    /// it to `holder` if it was free. Returns `None` on exhaustion (every slot held by
    /// someone else) — callers treat this as resource exhaustion, logged and retried by
    /// the requester's next timer firing, never as a fatal error.
    pub fn request(&mut self, holder: K) -> Option<u8> {
        for slot in 1..self.leases.len() {
            match &self.leases[slot] {
                None => {
                    self.leases[slot] = Some(holder);
                    return Some(slot as u8);
                }
                Some(existing) if *existing == holder => return Some(slot as u8),
                Some(_) => continue,
            }
        }
        None
    }

    pub fn holder_of(&self, slot: u8) -> Option<&K> {
        self.leases.get(slot as usize).and_then(|o| o.as_ref())
    }
}

#[cfg(test)]
#[path = "unit_tests/allocator_tests.rs"]
mod allocator_tests;
