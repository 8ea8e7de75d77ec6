//! RPC endpoints exposed by the server and the method names called on them.

use std::fmt;

/// One of the fixed XML-RPC paths served by the remote server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Session-less services such as `authenticate`.
	Common,
	/// Model method dispatch (`execute_kw`).
	Object,
	/// Database management. Unauthenticated by protocol design.
	Db,
}

impl Endpoint {
	/// Returns the URL path of this endpoint.
	pub const fn path(self) -> &'static str {
		match self {
			Endpoint::Common => "/xmlrpc/2/common",
			Endpoint::Object => "/xmlrpc/2/object",
			Endpoint::Db => "/xmlrpc/2/db",
		}
	}
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}

/// Remote method names.
pub mod methods {
	/// `common.authenticate(db, login, password, user_agent_env)`
	pub const AUTHENTICATE: &str = "authenticate";
	/// `object.execute_kw(db, uid, password, model, method, args, kwargs)`
	pub const EXECUTE_KW: &str = "execute_kw";
	/// `db.server_version()`
	pub const SERVER_VERSION: &str = "server_version";

	pub const SEARCH_READ: &str = "search_read";
	pub const SEARCH_COUNT: &str = "search_count";
	pub const CREATE: &str = "create";
	pub const WRITE: &str = "write";
	pub const UNLINK: &str = "unlink";
	pub const FIELDS_GET: &str = "fields_get";
}
