//! Call descriptors for model methods.

use odoo_protocol::{ComposedArgs, Domain, ExecuteKw, RecordTarget, RequiredParams, methods};
use serde_json::{Map, Value};

/// Evaluation context passed as the `context` kwarg (language, timezone, company...).
pub type Context = Map<String, Value>;

/// One model method call: `model.method(ids, *args, **kwargs, context=context)`.
///
/// Every part except the model and method defaults to empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCall {
	pub model: String,
	pub method: String,
	/// Records the method is bound to; empty means no bound record set.
	pub ids: Vec<i64>,
	pub args: Vec<Value>,
	pub kwargs: Map<String, Value>,
	pub context: Context,
}

impl ModelCall {
	pub fn new(model: impl Into<String>, method: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			method: method.into(),
			..Self::default()
		}
	}

	pub fn ids(mut self, ids: impl Into<Vec<i64>>) -> Self {
		self.ids = ids.into();
		self
	}

	pub fn args(mut self, args: Vec<Value>) -> Self {
		self.args = args;
		self
	}

	/// Appends one positional argument.
	pub fn arg(mut self, arg: impl Into<Value>) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn kwargs(mut self, kwargs: Map<String, Value>) -> Self {
		self.kwargs = kwargs;
		self
	}

	/// Sets one keyword argument.
	pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.kwargs.insert(key.into(), value.into());
		self
	}

	pub fn context(mut self, context: Context) -> Self {
		self.context = context;
		self
	}

	/// Composes the seven `execute_kw` parameters.
	///
	/// `context` always ends up in kwargs and replaces any `context` kwarg set directly.
	pub(crate) fn into_execute_kw(self, required: RequiredParams) -> ExecuteKw {
		let mut kwargs = self.kwargs;
		kwargs.insert("context".into(), Value::Object(self.context));
		ExecuteKw {
			required,
			model: self.model,
			method: self.method,
			args: ComposedArgs {
				target: RecordTarget::from_ids(self.ids),
				args: self.args,
			},
			kwargs,
		}
	}
}

/// Options for [`ModelClient::search`](crate::ModelClient::search).
///
/// Unset `limit`, `offset` and `order` are left out of the request so the
/// server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
	/// Filter; defaults to matching every record.
	pub domain: Option<Domain>,
	/// Fields to read; empty reads all fields.
	pub fields: Vec<String>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
	/// Sort specification such as `"name asc, id desc"`.
	pub order: Option<String>,
	pub context: Option<Context>,
}

impl SearchOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn domain(mut self, domain: impl Into<Domain>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	pub fn fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);
		self
	}

	pub fn order(mut self, order: impl Into<String>) -> Self {
		self.order = Some(order.into());
		self
	}

	pub fn context(mut self, context: Context) -> Self {
		self.context = Some(context);
		self
	}

	/// `search_read` on `model` with `[domain]` as the only positional argument.
	pub(crate) fn into_call(self, model: &str) -> ModelCall {
		let domain = self.domain.unwrap_or_default();
		let mut call = ModelCall::new(model, methods::SEARCH_READ)
			.arg(domain.into_value())
			.kwarg("fields", self.fields)
			.context(self.context.unwrap_or_default());
		if let Some(limit) = self.limit {
			call = call.kwarg("limit", limit);
		}
		if let Some(offset) = self.offset {
			call = call.kwarg("offset", offset);
		}
		if let Some(order) = self.order {
			call = call.kwarg("order", order);
		}
		call
	}
}
