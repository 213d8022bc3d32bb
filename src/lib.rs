//! Core request-model and handshake primitives for CQL drivers.
//!
//! This crate covers the boundary between a driver's request model and the
//! native protocol it speaks:
//!
//! * the [`Statement`](statement::Statement) contract describing a fully
//!   configured request, together with [`StatementWrapper`](statement::StatementWrapper),
//!   a transparent decorator that lets client code mark statements for special
//!   handling in retry, routing or speculative-execution policies without
//!   changing their observable behavior;
//! * [`StartupOptionsBuilder`](startup::StartupOptionsBuilder), which assembles
//!   the key/value options announced to the server when a connection is first
//!   established (driver identity, negotiated compression, caller overrides).
//!
//! ## Wrapping statements
//!
//! ```
//! use cql_core::consistency::Consistency;
//! use cql_core::statement::{SimpleStatement, Statement, StatementWrapper};
//!
//! let statement = SimpleStatement::new("SELECT * FROM test_ks.my_table WHERE id = ?");
//! let mut wrapper = StatementWrapper::new(Box::new(statement));
//!
//! // Configuration through the wrapper acts on the wrapped statement, while
//! // chained calls keep returning the wrapper itself.
//! wrapper.set_consistency(Consistency::Quorum).set_idempotent(true);
//!
//! assert_eq!(wrapper.consistency(), Consistency::Quorum);
//! assert_eq!(wrapper.is_idempotent(), Some(true));
//! ```

pub mod cluster;
pub mod codec;
pub mod compression;
pub mod consistency;
pub mod error;
pub mod frame;
pub mod retry;
pub mod startup;
pub mod statement;
pub mod types;

pub type Error = error::Error;
pub type Result<T> = error::Result<T>;
