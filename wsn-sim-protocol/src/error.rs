// Fatal protocol-invariant violations. Per the specification's error-handling design,
// these abort the simulation; resource exhaustion and transient loss are represented as
// `Option`/`Result` returns consumed by retry timers instead (see `allocator.rs`).

use crate::address::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("mesh table entry for gui {gui} would exceed MESH_HOP_N+1 ({max}): got {hop_count}")]
    MeshHopOverflow {
        gui: usize,
        hop_count: u32,
        max: u32,
    },

    #[error("address {addr:?} leased to a different holder than the requester")]
    DuplicateAddressLease { addr: Address },

    #[error("scene load error: {0}")]
    SceneLoad(String),
}
