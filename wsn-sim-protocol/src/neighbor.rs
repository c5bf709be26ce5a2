// Fixed neighbor-table record type, replacing the reference's heterogeneous dictionary
// (SPEC_FULL.md §9 "Duck-typed tables"). Populated from HEART_BEAT fields plus bookkeeping
// the kernel/topology layers add on arrival (`arrival_time`, `distance`).

use crate::address::Address;
use crate::role::Role;
use wsn_sim_kernel::base_types::VirtualTime;

#[derive(Debug, Clone)]
pub struct NeighborRecord {
    pub gui: usize,
    /// Sender's own address at the time this entry was recorded, copied verbatim from
    /// the inbound packet's `source` field (a CH/root's `addr` and `ch_addr` coincide, so
    /// this is always the right address to reply to regardless of the sender's role).
    pub source: Address,
    pub role: Role,
    pub addr: Option<Address>,
    pub ch_addr: Option<Address>,
    pub hop_count: u32,
    pub arrival_time: VirtualTime,
    pub distance: Option<f64>,
    /// 1 for a directly-heard neighbor, up to `MESH_HOP_N + 1` for a mesh-shared entry.
    pub neighbor_hop_count: u32,
    /// Set only for mesh-shared entries (`neighbor_hop_count > 1`): the immediate
    /// neighbor through which this entry was learned.
    pub next_hop: Option<Address>,
}
