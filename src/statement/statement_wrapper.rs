use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cluster::Host;
use crate::codec::CodecRegistry;
use crate::consistency::Consistency;
use crate::error::{Error, Result};
use crate::frame::Version;
use crate::retry::RetryPolicy;
use crate::statement::{PagingState, QueryOptions, Statement};
use crate::types::{CBytes, CInt, CLong};

/// Maximum supported wrapper nesting depth. The wrapped chain is acyclic by
/// construction, so hitting this limit means caller code is wrapping in a loop.
pub const MAX_WRAP_DEPTH: usize = 32;

/// A [`Statement`] that wraps another statement.
///
/// Wrapping is meant for use with custom retry, load-balancing or
/// speculative-execution policies: client code embeds or newtypes the wrapper
/// to "mark" a statement, and the policy recognizes the mark while every other
/// part of the pipeline keeps reading the statement as if it were not wrapped.
///
/// Every accessor reads straight through to the wrapped statement; every
/// mutator applies to the wrapped statement and returns the wrapper itself, so
/// chained configuration never loses the mark. Errors raised by the wrapped
/// statement propagate unchanged.
pub struct StatementWrapper {
    wrapped: Box<dyn Statement>,
}

impl StatementWrapper {
    pub fn new(wrapped: Box<dyn Statement>) -> Self {
        StatementWrapper { wrapped }
    }

    /// Like [`StatementWrapper::new`], for callers holding a statement from an
    /// optional source. Fails with [`Error::InvalidArgument`] when there is no
    /// statement to wrap.
    pub fn try_new(wrapped: Option<Box<dyn Statement>>) -> Result<Self> {
        wrapped
            .map(StatementWrapper::new)
            .ok_or_else(|| Error::InvalidArgument("wrapped statement must be present".into()))
    }

    /// The innermost non-wrapper statement; see [`unwrap_statement`].
    pub fn unwrap_statement(&self) -> &dyn Statement {
        unwrap_statement(self)
    }
}

/// Resolves a possibly wrapped statement to the innermost statement that is
/// not itself a wrapper.
///
/// Resolution looks through any statement whose [`Statement::wrapped`] reports
/// an inner statement, not just [`StatementWrapper`]. Nesting deeper than
/// [`MAX_WRAP_DEPTH`] panics, since the only way to get there is a wrapping
/// loop in caller code.
pub fn unwrap_statement(statement: &dyn Statement) -> &dyn Statement {
    let mut current = statement;
    for _ in 0..=MAX_WRAP_DEPTH {
        match current.wrapped() {
            Some(inner) => current = inner,
            None => return current,
        }
    }

    panic!("statement wrapped more than {} levels deep", MAX_WRAP_DEPTH);
}

impl Statement for StatementWrapper {
    fn consistency(&self) -> Consistency {
        self.wrapped.consistency()
    }

    fn set_consistency(&mut self, consistency: Consistency) -> &mut dyn Statement {
        self.wrapped.set_consistency(consistency);
        self
    }

    fn serial_consistency(&self) -> Option<Consistency> {
        self.wrapped.serial_consistency()
    }

    fn set_serial_consistency(&mut self, serial_consistency: Consistency) -> &mut dyn Statement {
        self.wrapped.set_serial_consistency(serial_consistency);
        self
    }

    fn is_tracing(&self) -> bool {
        self.wrapped.is_tracing()
    }

    fn enable_tracing(&mut self) -> &mut dyn Statement {
        self.wrapped.enable_tracing();
        self
    }

    fn disable_tracing(&mut self) -> &mut dyn Statement {
        self.wrapped.disable_tracing();
        self
    }

    fn routing_key(
        &self,
        version: Version,
        codecs: &dyn CodecRegistry,
    ) -> Result<Option<CBytes>> {
        self.wrapped.routing_key(version, codecs)
    }

    fn keyspace(&self) -> Option<&str> {
        self.wrapped.keyspace()
    }

    fn retry_policy(&self) -> Option<Arc<dyn RetryPolicy + Send + Sync>> {
        self.wrapped.retry_policy()
    }

    fn set_retry_policy(
        &mut self,
        retry_policy: Arc<dyn RetryPolicy + Send + Sync>,
    ) -> &mut dyn Statement {
        self.wrapped.set_retry_policy(retry_policy);
        self
    }

    fn fetch_size(&self) -> Option<CInt> {
        self.wrapped.fetch_size()
    }

    fn set_fetch_size(&mut self, fetch_size: CInt) -> &mut dyn Statement {
        self.wrapped.set_fetch_size(fetch_size);
        self
    }

    fn default_timestamp(&self) -> Option<CLong> {
        self.wrapped.default_timestamp()
    }

    fn set_default_timestamp(&mut self, default_timestamp: CLong) -> &mut dyn Statement {
        self.wrapped.set_default_timestamp(default_timestamp);
        self
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.wrapped.read_timeout()
    }

    fn set_read_timeout(&mut self, read_timeout: Duration) -> &mut dyn Statement {
        self.wrapped.set_read_timeout(read_timeout);
        self
    }

    fn paging_state(&self) -> Option<&CBytes> {
        self.wrapped.paging_state()
    }

    fn set_paging_state(&mut self, paging_state: &PagingState) -> Result<&mut dyn Statement> {
        self.wrapped.set_paging_state(paging_state)?;
        Ok(self)
    }

    fn set_paging_state_unsafe(&mut self, paging_state: CBytes) -> &mut dyn Statement {
        self.wrapped.set_paging_state_unsafe(paging_state);
        self
    }

    fn is_idempotent(&self) -> Option<bool> {
        self.wrapped.is_idempotent()
    }

    fn set_idempotent(&mut self, idempotent: bool) -> &mut dyn Statement {
        self.wrapped.set_idempotent(idempotent);
        self
    }

    fn is_idempotent_with_default(&self, query_options: &QueryOptions) -> bool {
        self.wrapped.is_idempotent_with_default(query_options)
    }

    fn outgoing_payload(&self) -> Option<&HashMap<String, CBytes>> {
        self.wrapped.outgoing_payload()
    }

    fn set_outgoing_payload(
        &mut self,
        payload: Option<HashMap<String, CBytes>>,
    ) -> &mut dyn Statement {
        self.wrapped.set_outgoing_payload(payload);
        self
    }

    fn request_size(&self, version: Version, codecs: &dyn CodecRegistry) -> Result<usize> {
        self.wrapped.request_size(version, codecs)
    }

    fn host(&self) -> Option<Arc<Host>> {
        self.wrapped.host()
    }

    fn set_host(&mut self, host: Arc<Host>) -> &mut dyn Statement {
        self.wrapped.set_host(host);
        self
    }

    fn wrapped(&self) -> Option<&dyn Statement> {
        Some(self.wrapped.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DefaultCodecRegistry;
    use crate::retry::FallthroughRetryPolicy;
    use crate::statement::SimpleStatement;
    use crate::types::Value;
    use std::net::SocketAddr;
    use uuid::Uuid;

    fn wrap(statement: SimpleStatement) -> StatementWrapper {
        StatementWrapper::new(Box::new(statement))
    }

    #[test]
    fn try_new_requires_a_statement() {
        let result = StatementWrapper::try_new(None);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let statement: Box<dyn Statement> = Box::new(SimpleStatement::new("SELECT"));
        assert!(StatementWrapper::try_new(Some(statement)).is_ok());
    }

    #[test]
    fn accessors_read_through() {
        let mut statement = SimpleStatement::new("SELECT * FROM test_ks.a")
            .with_keyspace("test_ks")
            .with_routing_key(vec![Value::new(vec![9])]);
        statement.set_consistency(Consistency::EachQuorum);
        statement.set_serial_consistency(Consistency::Serial);
        statement.set_fetch_size(100);
        statement.set_default_timestamp(77);
        statement.set_read_timeout(Duration::from_millis(250));
        statement.set_idempotent(true);
        statement.enable_tracing();

        let expected_size = statement
            .request_size(Version::V4, &DefaultCodecRegistry)
            .unwrap();
        let wrapper = wrap(statement);

        assert_eq!(wrapper.consistency(), Consistency::EachQuorum);
        assert_eq!(wrapper.serial_consistency(), Some(Consistency::Serial));
        assert_eq!(wrapper.keyspace(), Some("test_ks"));
        assert_eq!(wrapper.fetch_size(), Some(100));
        assert_eq!(wrapper.default_timestamp(), Some(77));
        assert_eq!(wrapper.read_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(wrapper.is_idempotent(), Some(true));
        assert!(wrapper.is_tracing());
        assert_eq!(
            wrapper
                .routing_key(Version::V4, &DefaultCodecRegistry)
                .unwrap()
                .unwrap()
                .as_slice(),
            Some(&[9u8][..])
        );
        assert_eq!(
            wrapper
                .request_size(Version::V4, &DefaultCodecRegistry)
                .unwrap(),
            expected_size
        );
    }

    #[test]
    fn mutators_apply_to_wrapped_and_return_wrapper() {
        let mut wrapper = wrap(SimpleStatement::new("SELECT"));
        let host = Arc::new(Host::new(
            Uuid::new_v4(),
            "127.0.0.1:9042".parse::<SocketAddr>().unwrap(),
        ));

        let chained = wrapper
            .set_consistency(Consistency::Two)
            .set_fetch_size(42)
            .set_retry_policy(Arc::new(FallthroughRetryPolicy))
            .set_host(host.clone())
            .set_idempotent(false)
            .enable_tracing();

        // the chain kept acting through the wrapper: the returned statement
        // still reports a wrapped statement
        assert!(chained.wrapped().is_some());

        let inner = wrapper.unwrap_statement();
        assert!(inner.wrapped().is_none());
        assert_eq!(inner.consistency(), Consistency::Two);
        assert_eq!(inner.fetch_size(), Some(42));
        assert_eq!(inner.host(), Some(host));
        assert_eq!(inner.is_idempotent(), Some(false));
        assert!(inner.is_tracing());
        assert!(inner.retry_policy().is_some());
    }

    #[test]
    fn payload_and_paging_state_forward() {
        let mut wrapper = wrap(SimpleStatement::new("SELECT").with_keyspace("test_ks"));

        let mut payload = HashMap::new();
        payload.insert("k".to_string(), CBytes::new(vec![1]));
        wrapper.set_outgoing_payload(Some(payload.clone()));
        assert_eq!(wrapper.outgoing_payload(), Some(&payload));

        wrapper.set_paging_state_unsafe(CBytes::new(vec![5]));
        assert_eq!(wrapper.paging_state(), Some(&CBytes::new(vec![5])));

        let foreign = PagingState::with_keyspace(CBytes::new(vec![6]), "other_ks".into());
        assert!(matches!(
            wrapper.set_paging_state(&foreign),
            Err(Error::InvalidArgument(_))
        ));
        // failed typed set left the previous state alone
        assert_eq!(wrapper.paging_state(), Some(&CBytes::new(vec![5])));

        wrapper
            .set_paging_state(&PagingState::new(CBytes::new(vec![7])))
            .unwrap();
        assert_eq!(wrapper.paging_state(), Some(&CBytes::new(vec![7])));

        wrapper.set_outgoing_payload(None);
        assert!(wrapper.outgoing_payload().is_none());
    }

    #[test]
    fn idempotence_default_forwards() {
        let wrapper = wrap(SimpleStatement::new("SELECT"));
        assert!(wrapper.is_idempotent_with_default(&QueryOptions::new(true)));
        assert!(!wrapper.is_idempotent_with_default(&QueryOptions::default()));
    }

    #[test]
    fn unwrap_resolves_through_nesting() {
        let inner = SimpleStatement::new("SELECT").with_keyspace("innermost");
        let level1 = wrap(inner);
        let level2 = StatementWrapper::new(Box::new(level1));
        let level3 = StatementWrapper::new(Box::new(level2));

        let unwrapped = level3.unwrap_statement();
        assert!(unwrapped.wrapped().is_none());
        assert_eq!(unwrapped.keyspace(), Some("innermost"));
    }

    #[test]
    fn unwrap_of_unwrapped_statement_is_identity() {
        let statement = SimpleStatement::new("SELECT").with_keyspace("plain");
        let resolved = unwrap_statement(&statement);
        assert_eq!(resolved.keyspace(), Some("plain"));
    }

    #[test]
    #[should_panic(expected = "levels deep")]
    fn unwrap_fails_loudly_beyond_max_depth() {
        let mut statement: Box<dyn Statement> = Box::new(SimpleStatement::new("SELECT"));
        for _ in 0..(MAX_WRAP_DEPTH + 1) {
            statement = Box::new(StatementWrapper::new(statement));
        }

        unwrap_statement(statement.as_ref());
    }
}
