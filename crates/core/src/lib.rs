//! Async XML-RPC client for Odoo-style business servers.
//!
//! [`ModelClient`] exposes record-oriented operations (search, browse, create,
//! write, unlink, field introspection, version) as typed async calls. Underneath,
//! a [`Session`] authenticates at most once and marshals every model call into
//! the positional `execute_kw` convention.
//!
//! # Example
//!
//! ```ignore
//! use odoo::{ClientConfig, ModelClient, SearchOptions};
//!
//! let client = ModelClient::new(ClientConfig::new("https://erp.example.com", 443, "prod", "admin", "secret"))?;
//! let partners = client
//!     .search("res.partner", SearchOptions::new().fields(["name", "email"]).limit(10))
//!     .await?;
//! ```
//!
//! # Errors
//!
//! Every operation on [`ModelClient`] fails with the single normalized
//! [`Error::Rpc`] shape. Only [`Session::invoke`] returns the raw
//! [`odoo_runtime::Error`], for callers that need to tell faults from
//! transport failures.

mod call;
mod client;
mod config;
mod error;
pub mod relational;
mod session;

#[cfg(test)]
mod testing;

pub use call::{Context, ModelCall, SearchOptions};
pub use client::{FieldInfo, Fields, ModelClient};
pub use config::ClientConfig;
pub use error::{Error, INVALID_CREDENTIALS, RPC_ERROR_CODE, RPC_ERROR_KIND, Result};
pub use odoo_protocol::{Domain, Endpoint, Record, UserId};
pub use odoo_runtime::{HttpTransport, ServerAddress, Transport};
pub use session::Session;
