use derivative::Derivative;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cluster::Host;
use crate::codec::CodecRegistry;
use crate::consistency::Consistency;
use crate::error::{Error, Result};
use crate::frame::Version;
use crate::retry::RetryPolicy;
use crate::statement::{PagingState, Statement};
use crate::types::{CBytes, CInt, CIntShort, CLong, INT_LEN, SHORT_LEN};
use crate::types::Value;

/// A textual query with pre-bound values and per-statement execution settings.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct SimpleStatement {
    query: String,
    values: Vec<Value>,
    /// The partition key components to use for token-aware routing. A load
    /// balancer may use this information to determine which nodes to contact.
    routing_key: Option<Vec<Value>>,
    keyspace: Option<String>,
    consistency: Consistency,
    serial_consistency: Option<Consistency>,
    tracing: bool,
    #[derivative(Debug = "ignore")]
    retry_policy: Option<Arc<dyn RetryPolicy + Send + Sync>>,
    fetch_size: Option<CInt>,
    default_timestamp: Option<CLong>,
    read_timeout: Option<Duration>,
    paging_state: Option<CBytes>,
    idempotent: Option<bool>,
    outgoing_payload: Option<HashMap<String, CBytes>>,
    host: Option<Arc<Host>>,
}

impl SimpleStatement {
    pub fn new<Q: Into<String>>(query: Q) -> Self {
        SimpleStatement {
            query: query.into(),
            ..Default::default()
        }
    }

    /// The query string.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Bound values, in positional order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Sets new statement values.
    #[must_use]
    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = values;
        self
    }

    /// Sets an explicit routing key.
    #[must_use]
    pub fn with_routing_key(mut self, routing_key: Vec<Value>) -> Self {
        self.routing_key = Some(routing_key);
        self
    }

    /// Sets new keyspace.
    #[must_use]
    pub fn with_keyspace<K: Into<String>>(mut self, keyspace: K) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }
}

impl Statement for SimpleStatement {
    fn consistency(&self) -> Consistency {
        self.consistency
    }

    fn set_consistency(&mut self, consistency: Consistency) -> &mut dyn Statement {
        self.consistency = consistency;
        self
    }

    fn serial_consistency(&self) -> Option<Consistency> {
        self.serial_consistency
    }

    fn set_serial_consistency(&mut self, serial_consistency: Consistency) -> &mut dyn Statement {
        self.serial_consistency = Some(serial_consistency);
        self
    }

    fn is_tracing(&self) -> bool {
        self.tracing
    }

    fn enable_tracing(&mut self) -> &mut dyn Statement {
        self.tracing = true;
        self
    }

    fn disable_tracing(&mut self) -> &mut dyn Statement {
        self.tracing = false;
        self
    }

    fn routing_key(
        &self,
        version: Version,
        codecs: &dyn CodecRegistry,
    ) -> Result<Option<CBytes>> {
        let components = match &self.routing_key {
            None => return Ok(None),
            Some(components) if components.is_empty() => return Ok(None),
            Some(components) => components,
        };

        if components.len() == 1 {
            return codecs.encode(&components[0], version).map(Some);
        }

        // composite routing key: 2-byte length, component bytes, trailing zero
        let mut buffer = vec![];
        for component in components {
            let bytes = codecs
                .encode(component, version)?
                .into_bytes()
                .ok_or_else(|| {
                    Error::InvalidArgument("routing key component cannot be null".into())
                })?;
            buffer.extend_from_slice(&(bytes.len() as CIntShort).to_be_bytes());
            buffer.extend_from_slice(&bytes);
            buffer.push(0);
        }

        Ok(Some(CBytes::new(buffer)))
    }

    fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }

    fn retry_policy(&self) -> Option<Arc<dyn RetryPolicy + Send + Sync>> {
        self.retry_policy.clone()
    }

    fn set_retry_policy(
        &mut self,
        retry_policy: Arc<dyn RetryPolicy + Send + Sync>,
    ) -> &mut dyn Statement {
        self.retry_policy = Some(retry_policy);
        self
    }

    fn fetch_size(&self) -> Option<CInt> {
        self.fetch_size
    }

    fn set_fetch_size(&mut self, fetch_size: CInt) -> &mut dyn Statement {
        self.fetch_size = Some(fetch_size);
        self
    }

    fn default_timestamp(&self) -> Option<CLong> {
        self.default_timestamp
    }

    fn set_default_timestamp(&mut self, default_timestamp: CLong) -> &mut dyn Statement {
        self.default_timestamp = Some(default_timestamp);
        self
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    fn set_read_timeout(&mut self, read_timeout: Duration) -> &mut dyn Statement {
        self.read_timeout = Some(read_timeout);
        self
    }

    fn paging_state(&self) -> Option<&CBytes> {
        self.paging_state.as_ref()
    }

    fn set_paging_state(&mut self, paging_state: &PagingState) -> Result<&mut dyn Statement> {
        match (paging_state.keyspace(), self.keyspace.as_deref()) {
            (Some(state_keyspace), Some(keyspace)) if state_keyspace != keyspace => {
                return Err(Error::InvalidArgument(format!(
                    "paging state from keyspace {} cannot resume a statement in {}",
                    state_keyspace, keyspace
                )))
            }
            _ => {}
        }

        self.paging_state = Some(paging_state.state().clone());
        Ok(self)
    }

    fn set_paging_state_unsafe(&mut self, paging_state: CBytes) -> &mut dyn Statement {
        self.paging_state = Some(paging_state);
        self
    }

    fn is_idempotent(&self) -> Option<bool> {
        self.idempotent
    }

    fn set_idempotent(&mut self, idempotent: bool) -> &mut dyn Statement {
        self.idempotent = Some(idempotent);
        self
    }

    fn outgoing_payload(&self) -> Option<&HashMap<String, CBytes>> {
        self.outgoing_payload.as_ref()
    }

    fn set_outgoing_payload(
        &mut self,
        payload: Option<HashMap<String, CBytes>>,
    ) -> &mut dyn Statement {
        self.outgoing_payload = payload;
        self
    }

    fn request_size(&self, version: Version, codecs: &dyn CodecRegistry) -> Result<usize> {
        // [long string] query, consistency, flags, value count
        let mut size = INT_LEN + self.query.len() + SHORT_LEN + 1 + SHORT_LEN;

        for value in &self.values {
            size += codecs.encode(value, version)?.serialized_len();
        }

        if let Some(paging_state) = &self.paging_state {
            size += paging_state.serialized_len();
        }

        if let Some(payload) = &self.outgoing_payload {
            size += SHORT_LEN;
            for (key, value) in payload {
                size += SHORT_LEN + key.len() + value.serialized_len();
            }
        }

        Ok(size)
    }

    fn host(&self) -> Option<Arc<Host>> {
        self.host.clone()
    }

    fn set_host(&mut self, host: Arc<Host>) -> &mut dyn Statement {
        self.host = Some(host);
        self
    }
}
