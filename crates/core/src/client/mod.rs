//! [`ModelClient`]: the generic model call and the operations derived from it.


use std::collections::BTreeMap;
use std::sync::Arc;

use odoo_protocol::{Domain, Endpoint, Record, methods};
use odoo_runtime::Transport;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::call::{Context, ModelCall, SearchOptions};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::session::Session;

/// Field metadata returned by `fields_get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
	/// Field type such as `char`, `many2one` or `one2many`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Any further attributes the server returned.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl FieldInfo {
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			attributes: Map::new(),
		}
	}

	pub fn is_many2one(&self) -> bool {
		self.kind == "many2one"
	}

	/// `one2many` or `many2many`.
	pub fn is_x2many(&self) -> bool {
		matches!(self.kind.as_str(), "one2many" | "many2many")
	}

	pub fn is_relational(&self) -> bool {
		self.is_many2one() || self.is_x2many()
	}
}

/// Field name to metadata, in name order.
pub type Fields = BTreeMap<String, FieldInfo>;

/// Record-oriented client for one server, database and user.
///
/// Cheap to clone; clones share the session and its authentication state.
#[derive(Debug, Clone)]
pub struct ModelClient {
	session: Arc<Session>,
}

impl ModelClient {
	/// Creates a client speaking HTTP(S) to `config.host`.
	///
	/// No request is made until the first operation.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Session::new(config).map(Self::from_session)
	}

	pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
		Self::from_session(Session::with_transport(config, transport))
	}

	pub fn from_session(session: Session) -> Self {
		Self {
			session: Arc::new(session),
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Calls a model method and returns the raw result.
	///
	/// Authenticates first if needed.
	pub async fn call(&self, call: ModelCall) -> Result<Value> {
		self.session.authenticate().await?;
		let params = call.into_execute_kw(self.session.required_params()).into_values();
		self.session
			.invoke(Endpoint::Object, methods::EXECUTE_KW, Vec::from(params))
			.await
			.map_err(Error::normalize)
	}

	/// Calls a model method and deserializes its result into `T`.
	pub async fn call_as<T: DeserializeOwned>(&self, call: ModelCall) -> Result<T> {
		let value = self.call(call).await?;
		serde_json::from_value(value).map_err(Error::normalize)
	}

	/// Reads the records matching `options.domain`.
	pub async fn search(&self, model: &str, options: SearchOptions) -> Result<Vec<Record>> {
		self.call_as(options.into_call(model)).await
	}

	/// Reads the records with the given ids.
	///
	/// An empty id list matches nothing.
	pub async fn browse(&self, model: &str, ids: &[i64], context: Option<Context>) -> Result<Vec<Record>> {
		let mut options = SearchOptions::new().domain(Domain::ids_in(ids));
		options.context = context;
		self.search(model, options).await
	}

	/// Creates one record and returns its id.
	pub async fn create(&self, model: &str, values: Record, context: Option<Context>) -> Result<i64> {
		let call = ModelCall::new(model, methods::CREATE)
			.arg(values)
			.context(context.unwrap_or_default());
		self.call_as(call).await
	}

	/// Updates `ids` with `values`.
	pub async fn write(&self, model: &str, ids: &[i64], values: Record, context: Option<Context>) -> Result<bool> {
		let call = ModelCall::new(model, methods::WRITE)
			.arg(ids)
			.arg(values)
			.context(context.unwrap_or_default());
		self.call_as(call).await
	}

	/// Deletes `ids`.
	pub async fn unlink(&self, model: &str, ids: &[i64], context: Option<Context>) -> Result<bool> {
		let call = ModelCall::new(model, methods::UNLINK)
			.arg(ids)
			.context(context.unwrap_or_default());
		self.call_as(call).await
	}

	/// Counts every record of `model`.
	pub async fn count(&self, model: &str, context: Option<Context>) -> Result<u64> {
		let call = ModelCall::new(model, methods::SEARCH_COUNT).context(context.unwrap_or_default());
		self.call_as(call).await
	}

	/// Field metadata of `model`, restricted to the `type` attribute.
	pub async fn fields(&self, model: &str) -> Result<Fields> {
		let call = ModelCall::new(model, methods::FIELDS_GET).kwarg("attributes", json!(["type"]));
		self.call_as(call).await
	}

	/// Server version information from the db endpoint.
	///
	/// Needs no credentials and never authenticates. The shape of the result
	/// differs between server versions and is returned as is.
	pub async fn version(&self) -> Result<Value> {
		self.session
			.invoke(Endpoint::Db, methods::SERVER_VERSION, Vec::new())
			.await
			.map_err(Error::normalize)
	}
}
