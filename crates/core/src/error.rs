//! The normalized error returned by every client operation.

use std::fmt;

use thiserror::Error;

/// `kind` tag of every normalized error.
pub const RPC_ERROR_KIND: &str = "RPC error";

/// `code` classifier of every normalized error.
pub const RPC_ERROR_CODE: &str = "rpc_error_code";

/// Message used when the server rejects the configured credentials.
pub const INVALID_CREDENTIALS: &str = "invalid username/password";

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Client error.
///
/// Transport failures, remote faults, rejected credentials and undecodable
/// results all collapse into [`Error::Rpc`]; the original failure survives only
/// as the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	#[error("{kind}: {message}")]
	Rpc {
		kind: &'static str,
		code: &'static str,
		message: String,
	},
}

impl Error {
	/// Wraps any failure into the normalized shape, keeping its display text.
	pub fn normalize(err: impl fmt::Display) -> Self {
		Error::Rpc {
			kind: RPC_ERROR_KIND,
			code: RPC_ERROR_CODE,
			message: err.to_string(),
		}
	}

	/// The error for a falsy `authenticate` result.
	pub fn invalid_credentials() -> Self {
		Self::normalize(INVALID_CREDENTIALS)
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Error::Rpc { kind, .. } => kind,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			Error::Rpc { code, .. } => code,
		}
	}

	pub fn message(&self) -> &str {
		match self {
			Error::Rpc { message, .. } => message,
		}
	}

	/// Returns true if this error reports rejected credentials.
	pub fn is_invalid_credentials(&self) -> bool {
		self.message() == INVALID_CREDENTIALS
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_keeps_the_display_text() {
		let raw = odoo_runtime::Error::Fault {
			code: serde_json::json!(2),
			message: "Access Denied".into(),
		};
		let err = Error::normalize(&raw);
		assert_eq!(err.kind(), "RPC error");
		assert_eq!(err.code(), "rpc_error_code");
		assert_eq!(err.message(), "XML-RPC fault: Access Denied");
		assert_eq!(err.to_string(), "RPC error: XML-RPC fault: Access Denied");
	}

	#[test]
	fn invalid_credentials_message() {
		let err = Error::invalid_credentials();
		assert!(err.is_invalid_credentials());
		assert_eq!(err.message(), "invalid username/password");
	}
}
