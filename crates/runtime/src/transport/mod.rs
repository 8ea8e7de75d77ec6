//! Transport channel for XML-RPC calls.
//!
//! A [`Transport`] performs exactly one remote procedure call per invocation:
//! encode the method call, deliver it to an endpoint, decode the response.
//! The production implementation is [`HttpTransport`]; tests substitute an
//! in-memory recorder through the same trait object.

mod http;


use std::future::Future;
use std::pin::Pin;

use odoo_protocol::Endpoint;
use serde_json::Value;

use crate::error::Result;

pub use http::HttpTransport;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("odoo-rpc/", env!("CARGO_PKG_VERSION"));

/// Boxed future returned by [`Transport::call`].
pub type CallFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;

/// One XML-RPC round trip against a named endpoint.
///
/// Implementations are shared behind `Arc<dyn Transport>` and must not hold
/// per-call state across invocations.
pub trait Transport: Send + Sync {
	/// Sends `method(params...)` to `endpoint` and returns the single result value.
	///
	/// A remote fault is returned as [`Error::Fault`](crate::Error::Fault).
	fn call<'a>(&'a self, endpoint: Endpoint, method: &'a str, params: Vec<Value>) -> CallFuture<'a>;
}
