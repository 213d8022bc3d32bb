//! The statement contract and its transparent decorator.
//!
//! [`Statement`] is the full configurable representation of one request,
//! independent of wire encoding. The execution pipeline and the pluggable
//! policies (retry, load balancing, speculative execution) only ever see this
//! trait. [`StatementWrapper`] wraps a statement without changing its
//! observable behavior, so client code can mark statements for special
//! handling in a policy and still let everything else read them as usual.
pub mod simple_statement;
pub mod statement_wrapper;

pub use simple_statement::SimpleStatement;
pub use statement_wrapper::{unwrap_statement, StatementWrapper, MAX_WRAP_DEPTH};

use derive_more::Constructor;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cluster::Host;
use crate::codec::CodecRegistry;
use crate::consistency::Consistency;
use crate::error::Result;
use crate::frame::Version;
use crate::retry::RetryPolicy;
use crate::types::{CBytes, CInt, CLong};

/// Cluster-level defaults consulted when a statement leaves a setting unset.
#[derive(Debug, Clone, Copy, Default, Constructor, PartialEq, Eq)]
pub struct QueryOptions {
    /// Idempotence assumed for statements that do not set the flag explicitly.
    pub default_idempotence: bool,
}

/// Paging state returned with a previous result page. The state is opaque and
/// optionally scoped to the keyspace it was produced in; the typed setter on
/// [`Statement`] rejects a state from a different keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState {
    state: CBytes,
    keyspace: Option<String>,
}

impl PagingState {
    pub fn new(state: CBytes) -> Self {
        PagingState {
            state,
            keyspace: None,
        }
    }

    pub fn with_keyspace(state: CBytes, keyspace: String) -> Self {
        PagingState {
            state,
            keyspace: Some(keyspace),
        }
    }

    #[inline]
    pub fn state(&self) -> &CBytes {
        &self.state
    }

    #[inline]
    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }
}

/// A fully configured request.
///
/// Mutators apply the change and hand back `&mut dyn Statement`, so
/// configuration can be chained through trait objects; for a wrapper the
/// returned reference is the wrapper itself, which keeps downstream capability
/// checks intact. Unset values (`None`) mean "use the execution profile
/// default".
pub trait Statement: Send + Sync {
    /// Consistency level of the statement.
    fn consistency(&self) -> Consistency;

    /// Sets the consistency level.
    fn set_consistency(&mut self, consistency: Consistency) -> &mut dyn Statement;

    /// Serial consistency level used for the paxos phase of lightweight
    /// transactions.
    fn serial_consistency(&self) -> Option<Consistency>;

    /// Sets the serial consistency level.
    fn set_serial_consistency(&mut self, serial_consistency: Consistency) -> &mut dyn Statement;

    /// Whether tracing was requested for the statement.
    fn is_tracing(&self) -> bool;

    /// Requests tracing for the statement.
    fn enable_tracing(&mut self) -> &mut dyn Statement;

    /// Disables tracing for the statement.
    fn disable_tracing(&mut self) -> &mut dyn Statement;

    /// The key used for token-aware routing, encoded for the given protocol
    /// version, or `None` when the statement carries no routing information.
    fn routing_key(
        &self,
        version: Version,
        codecs: &dyn CodecRegistry,
    ) -> Result<Option<CBytes>>;

    /// Keyspace the statement operates in, if set explicitly.
    fn keyspace(&self) -> Option<&str>;

    /// Statement-level retry policy overriding the cluster-wide one.
    fn retry_policy(&self) -> Option<Arc<dyn RetryPolicy + Send + Sync>>;

    /// Sets the statement-level retry policy.
    fn set_retry_policy(
        &mut self,
        retry_policy: Arc<dyn RetryPolicy + Send + Sync>,
    ) -> &mut dyn Statement;

    /// Result page size, or `None` to use the profile default.
    fn fetch_size(&self) -> Option<CInt>;

    /// Sets the result page size.
    fn set_fetch_size(&mut self, fetch_size: CInt) -> &mut dyn Statement;

    /// Default timestamp in microseconds, or `None` when unset.
    fn default_timestamp(&self) -> Option<CLong>;

    /// Sets the default timestamp in microseconds.
    fn set_default_timestamp(&mut self, default_timestamp: CLong) -> &mut dyn Statement;

    /// Per-statement read timeout, or `None` to use the profile default.
    fn read_timeout(&self) -> Option<Duration>;

    /// Sets the per-statement read timeout.
    fn set_read_timeout(&mut self, read_timeout: Duration) -> &mut dyn Statement;

    /// Raw paging state to resume from, if any.
    fn paging_state(&self) -> Option<&CBytes>;

    /// Sets the paging state, validating that it is not scoped to a different
    /// keyspace than the statement's.
    fn set_paging_state(&mut self, paging_state: &PagingState) -> Result<&mut dyn Statement>;

    /// Sets the raw paging state without any validation.
    fn set_paging_state_unsafe(&mut self, paging_state: CBytes) -> &mut dyn Statement;

    /// Explicit idempotence flag, or `None` when the statement inherits the
    /// cluster default.
    fn is_idempotent(&self) -> Option<bool>;

    /// Marks the statement as idempotent or not.
    fn set_idempotent(&mut self, idempotent: bool) -> &mut dyn Statement;

    /// Idempotence of the statement, falling back to the cluster default when
    /// the flag is unset.
    fn is_idempotent_with_default(&self, query_options: &QueryOptions) -> bool {
        self.is_idempotent()
            .unwrap_or(query_options.default_idempotence)
    }

    /// Custom payload sent alongside the request, if any.
    fn outgoing_payload(&self) -> Option<&HashMap<String, CBytes>>;

    /// Sets (or clears) the custom payload sent alongside the request.
    fn set_outgoing_payload(
        &mut self,
        payload: Option<HashMap<String, CBytes>>,
    ) -> &mut dyn Statement;

    /// Approximate size of the statement body on the wire.
    fn request_size(&self, version: Version, codecs: &dyn CodecRegistry) -> Result<usize>;

    /// Node the statement is pinned to, if any.
    fn host(&self) -> Option<Arc<Host>>;

    /// Pins the statement to a node.
    fn set_host(&mut self, host: Arc<Host>) -> &mut dyn Statement;

    /// The wrapped statement, when this statement is a decorator. Policies use
    /// this to look through markers; see [`unwrap_statement`].
    fn wrapped(&self) -> Option<&dyn Statement> {
        None
    }
}
