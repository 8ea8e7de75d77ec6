//! Fixed-arity positional parameter tuples.
//!
//! The server dispatches on argument position, so every tuple here has a fixed
//! shape and converts into a fixed-size array. Nothing is assembled by list
//! concatenation.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// Positive user identifier resolved by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
	/// Returns `None` unless `raw` is positive.
	pub fn new(raw: i64) -> Option<Self> {
		(raw > 0).then_some(Self(raw))
	}

	/// Interprets an `authenticate` return value.
	///
	/// The server answers `false` (or `0`) for rejected credentials.
	pub fn from_response(value: &Value) -> Option<Self> {
		value.as_i64().and_then(Self::new)
	}

	pub fn get(self) -> i64 {
		self.0
	}

	/// Reads an optional configured id, treating `false`, `null` and non-positive numbers as unset.
	///
	/// Use with `#[serde(default, deserialize_with = "UserId::deserialize_optional")]`.
	pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Value::deserialize(deserializer)? {
			Value::Null | Value::Bool(false) => Ok(None),
			Value::Number(raw) => raw
				.as_i64()
				.map(Self::new)
				.ok_or_else(|| D::Error::custom(format!("user id must be an integer, got {raw}"))),
			other => Err(D::Error::custom(format!("expected a user id, got {other}"))),
		}
	}
}

impl TryFrom<i64> for UserId {
	type Error = String;

	fn try_from(raw: i64) -> Result<Self, Self::Error> {
		Self::new(raw).ok_or_else(|| format!("user id must be positive, got {raw}"))
	}
}

impl From<UserId> for i64 {
	fn from(uid: UserId) -> Self {
		uid.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Second element of [`RequiredParams`]: the resolved id when known, else the login name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Login {
	Uid(UserId),
	Username(String),
}

impl From<Login> for Value {
	fn from(login: Login) -> Self {
		match login {
			Login::Uid(uid) => Value::from(uid.get()),
			Login::Username(name) => Value::String(name),
		}
	}
}

/// `[database, uid-or-username, password]`, the prefix of every dispatch call.
#[derive(Clone, PartialEq, Eq)]
pub struct RequiredParams {
	pub database: String,
	pub login: Login,
	pub password: String,
}

impl RequiredParams {
	pub fn into_values(self) -> [Value; 3] {
		[Value::String(self.database), self.login.into(), Value::String(self.password)]
	}
}

impl fmt::Debug for RequiredParams {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RequiredParams")
			.field("database", &self.database)
			.field("login", &self.login)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Parameters of `common.authenticate`.
///
/// Always carries the login name, never a previously known uid.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticateParams {
	pub database: String,
	pub username: String,
	pub password: String,
}

impl AuthenticateParams {
	/// `[database, username, password, user_agent_env]`
	pub fn into_values(self) -> [Value; 4] {
		[
			Value::String(self.database),
			Value::String(self.username),
			Value::String(self.password),
			Value::Object(Map::new()),
		]
	}
}

impl fmt::Debug for AuthenticateParams {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthenticateParams")
			.field("database", &self.database)
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Record ids a model method is bound to.
///
/// An empty id list is sent as `[0]`: the method runs without a bound record
/// set and mutations of the implicit records are not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTarget {
	Unbound,
	Records(Vec<i64>),
}

impl RecordTarget {
	pub fn from_ids(ids: Vec<i64>) -> Self {
		if ids.is_empty() {
			RecordTarget::Unbound
		} else {
			RecordTarget::Records(ids)
		}
	}

	pub fn into_value(self) -> Value {
		match self {
			RecordTarget::Unbound => json!([0]),
			RecordTarget::Records(ids) => Value::from(ids),
		}
	}
}

/// The `args` element of `execute_kw`: `[record-target, method-args]`.
///
/// The method arguments stay nested as the second element.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedArgs {
	pub target: RecordTarget,
	pub args: Vec<Value>,
}

impl ComposedArgs {
	pub fn into_value(self) -> Value {
		Value::Array(vec![self.target.into_value(), Value::Array(self.args)])
	}
}

/// Parameters of `object.execute_kw`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteKw {
	pub required: RequiredParams,
	pub model: String,
	pub method: String,
	pub args: ComposedArgs,
	pub kwargs: Map<String, Value>,
}

impl ExecuteKw {
	/// `[database, uid-or-username, password, model, method, args, kwargs]`
	pub fn into_values(self) -> [Value; 7] {
		let [database, login, password] = self.required.into_values();
		[
			database,
			login,
			password,
			Value::String(self.model),
			Value::String(self.method),
			self.args.into_value(),
			Value::Object(self.kwargs),
		]
	}
}
