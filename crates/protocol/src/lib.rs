//! Wire types for the Odoo XML-RPC protocol.
//!
//! This crate holds everything that is fixed by the server's wire contract and
//! nothing that performs I/O:
//!
//! - [`codec`] - XML-RPC `methodCall` / `methodResponse` encoding over [`serde_json::Value`]
//! - [`Endpoint`] - the three RPC paths and the method names served on them
//! - [`params`] - fixed-arity positional parameter tuples for each endpoint
//! - [`Domain`] - search filter expressions
//!
//! # Main Types
//!
//! - [`RequiredParams`] - `[database, uid-or-username, password]`, prefixed to every dispatch call
//! - [`ExecuteKw`] - the seven positional arguments of `execute_kw`
//! - [`RecordTarget`] - record-id list with the `[0]` "no bound records" substitution

pub mod codec;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod params;

pub use codec::{Fault, MethodCall, MethodResponse};
pub use domain::Domain;
pub use endpoint::{Endpoint, methods};
pub use error::CodecError;
pub use params::{AuthenticateParams, ComposedArgs, ExecuteKw, Login, RecordTarget, RequiredParams, UserId};

/// A record as returned by `search_read`: field name to decoded value.
pub type Record = serde_json::Map<String, serde_json::Value>;
