//! Connection configuration.

use std::fmt;
use std::time::Duration;

use odoo_protocol::UserId;
use serde::{Deserialize, Serialize};

/// Immutable connection settings for one server, database and user.
///
/// Serialized as camelCase JSON:
///
/// ```json
/// { "host": "https://erp.example.com", "port": 443, "database": "prod",
///   "username": "admin", "password": "secret", "uid": 2 }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
	/// Server address; an `https` scheme selects the secure channel.
	pub host: String,
	/// Port, always taken from here and never from `host`.
	pub port: u16,
	pub database: String,
	pub username: String,
	pub password: String,
	/// Known user id. When set, authentication is skipped entirely.
	#[serde(
		default,
		deserialize_with = "UserId::deserialize_optional",
		skip_serializing_if = "Option::is_none"
	)]
	pub uid: Option<UserId>,
	/// Per-request timeout in milliseconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,
}

impl ClientConfig {
	pub fn new(
		host: impl Into<String>,
		port: u16,
		database: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Self {
		Self {
			host: host.into(),
			port,
			database: database.into(),
			username: username.into(),
			password: password.into(),
			uid: None,
			timeout_ms: None,
		}
	}

	/// Pre-seeds the user id so no `authenticate` call is ever made.
	pub fn with_uid(mut self, uid: UserId) -> Self {
		self.uid = Some(uid);
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
		self
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_ms.map(Duration::from_millis)
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("database", &self.database)
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.field("uid", &self.uid)
			.field("timeout_ms", &self.timeout_ms)
			.finish()
	}
}
