use std::time::Duration;

use odoo_protocol::codec::{self, MethodResponse};
use odoo_protocol::Endpoint;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use super::{CallFuture, Transport, USER_AGENT};
use crate::address::ServerAddress;
use crate::error::{Error, Result};

/// XML-RPC over HTTP(S).
///
/// The secure channel is chosen from the address scheme; both channels share
/// one pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	address: ServerAddress,
}

impl HttpTransport {
	pub fn new(address: ServerAddress) -> Result<Self> {
		Self::with_timeout(address, None)
	}

	/// Creates a transport whose requests fail after `timeout`.
	pub fn with_timeout(address: ServerAddress, timeout: Option<Duration>) -> Result<Self> {
		let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		let client = builder.build().map_err(|e| Error::TransportError(e.to_string()))?;
		Ok(Self { client, address })
	}

	pub fn address(&self) -> &ServerAddress {
		&self.address
	}

	async fn post(&self, endpoint: Endpoint, method: &str, params: Vec<Value>) -> Result<Value> {
		let url = self.address.endpoint_url(endpoint);
		let body = codec::encode_call(method, &params);
		// The body carries the password; log its size only.
		debug!(%url, method, bytes = body.len(), "xml-rpc call");

		let response = self
			.client
			.post(&url)
			.header(CONTENT_TYPE, "text/xml")
			.body(body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(Error::Http {
				status: status.as_u16(),
				reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
			});
		}

		let bytes = response.bytes().await?;
		match codec::decode_response(&bytes)? {
			MethodResponse::Success(value) => Ok(value),
			MethodResponse::Fault(fault) => {
				debug!(method, fault = %fault, "xml-rpc fault");
				Err(Error::Fault {
					code: fault.code,
					message: fault.message,
				})
			}
		}
	}
}

impl Transport for HttpTransport {
	fn call<'a>(&'a self, endpoint: Endpoint, method: &'a str, params: Vec<Value>) -> CallFuture<'a> {
		Box::pin(self.post(endpoint, method, params))
	}
}
