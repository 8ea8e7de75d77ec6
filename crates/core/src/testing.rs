//! In-memory transport that records every call.

use std::sync::Arc;

use odoo_protocol::Endpoint;
use odoo_runtime::{CallFuture, Result, Transport};
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
	pub endpoint: Endpoint,
	pub method: String,
	pub params: Vec<Value>,
}

type Responder = Box<dyn Fn(&RecordedCall) -> Result<Value> + Send + Sync>;

pub(crate) struct RecordingTransport {
	calls: Mutex<Vec<RecordedCall>>,
	respond: Responder,
}

impl RecordingTransport {
	pub fn new(respond: impl Fn(&RecordedCall) -> Result<Value> + Send + Sync + 'static) -> Arc<Self> {
		Arc::new(Self {
			calls: Mutex::new(Vec::new()),
			respond: Box::new(respond),
		})
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().clone()
	}

	pub fn calls_to(&self, endpoint: Endpoint) -> Vec<RecordedCall> {
		self.calls.lock().iter().filter(|call| call.endpoint == endpoint).cloned().collect()
	}
}

impl Transport for RecordingTransport {
	fn call<'a>(&'a self, endpoint: Endpoint, method: &'a str, params: Vec<Value>) -> CallFuture<'a> {
		let call = RecordedCall {
			endpoint,
			method: method.to_string(),
			params,
		};
		let result = (self.respond)(&call);
		self.calls.lock().push(call);
		// Yield once so concurrent callers are all in flight together.
		Box::pin(async move {
			tokio::task::yield_now().await;
			result
		})
	}
}
