//! Error types for the transport channel.

use odoo_protocol::CodecError;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during one remote procedure call.
#[derive(Debug, Error)]
pub enum Error {
	/// The configured host could not be turned into a server address.
	#[error("Invalid server address: {0}")]
	InvalidAddress(String),

	/// The request could not be sent or the response body could not be read.
	#[error("Transport error: {0}")]
	TransportError(String),

	/// The server answered with a non-success HTTP status.
	#[error("HTTP {status}: {reason}")]
	Http { status: u16, reason: String },

	/// The remote method raised; `message` is the server's fault string.
	#[error("XML-RPC fault: {message}")]
	Fault {
		/// `faultCode` as sent by the server (integer or string).
		code: Value,
		message: String,
	},

	/// The response body is not a valid XML-RPC document.
	#[error("Protocol error: {0}")]
	Protocol(#[from] CodecError),
}

impl Error {
	/// Returns true if the remote method itself failed.
	pub fn is_fault(&self) -> bool {
		matches!(self, Error::Fault { .. })
	}

	/// Returns the fault string if this is a remote fault.
	pub fn fault_message(&self) -> Option<&str> {
		match self {
			Error::Fault { message, .. } => Some(message),
			_ => None,
		}
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_builder() {
			return Error::InvalidAddress(err.to_string());
		}
		// reqwest keeps the useful part ("connection refused", ...) in the source chain
		let mut message = err.to_string();
		let mut source = std::error::Error::source(&err);
		while let Some(cause) = source {
			message.push_str(": ");
			message.push_str(&cause.to_string());
			source = cause.source();
		}
		Error::TransportError(message)
	}
}
