//! Cluster-side collaborators referenced by statements.
use derive_more::Constructor;
use std::net::SocketAddr;
use uuid::Uuid;

/// A node a statement may be pinned to. Load balancers honor the affinity by
/// contacting this node first.
#[derive(Debug, Clone, Constructor, PartialEq, Eq, Hash)]
pub struct Host {
    pub host_id: Uuid,
    pub address: SocketAddr,
}
