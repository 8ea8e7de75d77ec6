//! Authentication state and the raw invoke primitive.

use std::fmt;
use std::sync::Arc;

use odoo_protocol::{AuthenticateParams, Endpoint, Login, RequiredParams, UserId, methods};
use odoo_runtime::{HttpTransport, ServerAddress, Transport};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Connection configuration plus the resolved user id.
///
/// The id moves from unset to set at most once and is never cleared. A `uid`
/// in the configuration starts the session already authenticated.
pub struct Session {
	config: ClientConfig,
	transport: Arc<dyn Transport>,
	uid: Mutex<Option<UserId>>,
}

impl Session {
	/// Creates a session that talks HTTP(S) to `config.host`.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let address = ServerAddress::parse(&config.host, config.port).map_err(Error::normalize)?;
		let transport = HttpTransport::with_timeout(address, config.timeout()).map_err(Error::normalize)?;
		Ok(Self::with_transport(config, Arc::new(transport)))
	}

	/// Creates a session over a caller-supplied transport.
	pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
		let uid = Mutex::new(config.uid);
		Self { config, transport, uid }
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn is_authenticated(&self) -> bool {
		self.uid.lock().is_some()
	}

	/// The preset or resolved user id, if any.
	pub fn resolved_identifier(&self) -> Option<UserId> {
		*self.uid.lock()
	}

	/// Resolves the user id, calling `common.authenticate` only when none is known yet.
	///
	/// Concurrent first calls each reach the server; the first id stored is kept.
	pub async fn authenticate(&self) -> Result<UserId> {
		if let Some(uid) = self.resolved_identifier() {
			return Ok(uid);
		}

		let params = AuthenticateParams {
			database: self.config.database.clone(),
			username: self.config.username.clone(),
			password: self.config.password.clone(),
		};
		let response = self
			.invoke(Endpoint::Common, methods::AUTHENTICATE, Vec::from(params.into_values()))
			.await
			.map_err(Error::normalize)?;

		let Some(uid) = UserId::from_response(&response) else {
			warn!(database = %self.config.database, username = %self.config.username, "authentication rejected");
			return Err(Error::invalid_credentials());
		};

		let uid = *self.uid.lock().get_or_insert(uid);
		info!(database = %self.config.database, uid = uid.get(), "authenticated");
		Ok(uid)
	}

	/// `[database, uid-or-username, password]` for the object endpoint.
	pub fn required_params(&self) -> RequiredParams {
		let login = match self.resolved_identifier() {
			Some(uid) => Login::Uid(uid),
			None => Login::Username(self.config.username.clone()),
		};
		RequiredParams {
			database: self.config.database.clone(),
			login,
			password: self.config.password.clone(),
		}
	}

	/// Performs exactly one remote call and returns the decoded result.
	///
	/// Errors are returned as the transport reports them.
	pub async fn invoke(&self, endpoint: Endpoint, method: &str, args: Vec<Value>) -> odoo_runtime::Result<Value> {
		debug!(%endpoint, method, args = args.len(), "invoke");
		self.transport.call(endpoint, method, args).await
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("config", &self.config)
			.field("uid", &self.resolved_identifier())
			.finish_non_exhaustive()
	}
}
