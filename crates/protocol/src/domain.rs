//! Search domains: prefix-notation lists of `[field, operator, value]` triplets.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::params::RecordTarget;

/// A search filter evaluated by the server.
///
/// Terms are implicitly AND-ed; [`and`](Self::and), [`or`](Self::or) and
/// [`not`](Self::not) push the explicit prefix operators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(Vec<Value>);

impl Domain {
	/// The empty domain, matching every record.
	pub fn all() -> Self {
		Self::default()
	}

	/// `[["id", "in", ids]]`, with an empty id list sent as `[0]`.
	pub fn ids_in(ids: &[i64]) -> Self {
		let ids = RecordTarget::from_ids(ids.to_vec()).into_value();
		Self(vec![json!(["id", "in", ids])])
	}

	/// Appends a `[field, operator, value]` condition.
	pub fn filter(mut self, field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0
			.push(Value::Array(vec![Value::String(field.into()), Value::String(operator.into()), value.into()]));
		self
	}

	pub fn and(mut self) -> Self {
		self.0.push(json!("&"));
		self
	}

	pub fn or(mut self) -> Self {
		self.0.push(json!("|"));
		self
	}

	pub fn not(mut self) -> Self {
		self.0.push(json!("!"));
		self
	}

	pub fn into_value(self) -> Value {
		Value::Array(self.0)
	}
}

impl From<Vec<Value>> for Domain {
	fn from(terms: Vec<Value>) -> Self {
		Self(terms)
	}
}
