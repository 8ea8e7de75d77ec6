//! Server address resolution.

use std::fmt;

use odoo_protocol::Endpoint;
use url::Url;

use crate::error::{Error, Result};

/// Where the XML-RPC endpoints live: scheme, host and port.
///
/// The host comes from the configured address, the port always from the
/// explicit port setting, even when the address carries one of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
	secure: bool,
	host: String,
	port: u16,
}

impl ServerAddress {
	/// Parses an address such as `https://erp.example.com` or `localhost`.
	///
	/// An `https` scheme selects the secure channel; any other scheme, or none,
	/// selects plain HTTP.
	pub fn parse(address: &str, port: u16) -> Result<Self> {
		let trimmed = address.trim();
		if trimmed.is_empty() {
			return Err(Error::InvalidAddress("host is empty".into()));
		}

		let candidate = if trimmed.contains("://") {
			trimmed.to_string()
		} else {
			format!("http://{trimmed}")
		};
		let url = Url::parse(&candidate).map_err(|e| Error::InvalidAddress(format!("{address}: {e}")))?;
		let host = url
			.host_str()
			.filter(|host| !host.is_empty())
			.ok_or_else(|| Error::InvalidAddress(format!("{address}: missing host")))?;

		Ok(Self {
			secure: url.scheme() == "https",
			host: host.to_string(),
			port,
		})
	}

	pub fn is_secure(&self) -> bool {
		self.secure
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	pub fn port(&self) -> u16 {
		self.port
	}

	fn scheme(&self) -> &'static str {
		if self.secure { "https" } else { "http" }
	}

	/// `{scheme}://{host}:{port}`
	pub fn base_url(&self) -> String {
		format!("{}://{}:{}", self.scheme(), self.host, self.port)
	}

	/// Full URL of an endpoint on this server.
	pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
		format!("{}{}", self.base_url(), endpoint.path())
	}
}

impl fmt::Display for ServerAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.base_url())
	}
}
