// Role enum, grounded on `data_collection_tree.py`'s
// `Enum('Roles', 'UNDISCOVERED UNREGISTERED ROOT REGISTERED CLUSTER_HEAD')`.

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Copy, Clone, Hash, Debug, Serialize, Deserialize)]
pub enum Role {
    Undiscovered,
    Unregistered,
    Registered,
    ClusterHead,
    Root,
}

impl Role {
    pub fn is_ch_or_root(self) -> bool {
        matches!(self, Role::ClusterHead | Role::Root)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Undiscovered
    }
}
