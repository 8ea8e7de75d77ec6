//! XML-RPC document codec.
//!
//! Values are carried as [`serde_json::Value`] on both sides of the wire:
//!
//! | XML-RPC                        | JSON                         |
//! |--------------------------------|------------------------------|
//! | `int`, `i4`, `i8`              | integer                      |
//! | `boolean`                      | bool                         |
//! | `string`, untyped `<value>`    | string                       |
//! | `double`                       | float                        |
//! | `dateTime.iso8601`, `base64`   | string (verbatim)            |
//! | `nil`                          | null                         |
//! | `array`                        | array                        |
//! | `struct`                       | object                       |
//!
//! Integers that fit in `i32` are encoded as `<int>`, wider ones as `<i8>`.

#[cfg(test)]
mod tests;

mod decode;
mod encode;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CodecError, Result};

/// A decoded `methodCall` document.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
	pub method: String,
	pub params: Vec<Value>,
}

/// A decoded `methodResponse` document.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
	/// The single return value of a successful call.
	Success(Value),
	/// A fault raised by the remote method.
	Fault(Fault),
}

/// XML-RPC fault payload.
///
/// Odoo reports the exception text in `faultString` and uses either an integer
/// or the exception message itself as `faultCode`, so the code is kept untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
	pub code: Value,
	pub message: String,
}

impl Fault {
	pub fn new(code: impl Into<Value>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
		}
	}

	fn from_value(value: Value) -> Result<Self> {
		let Value::Object(mut members) = value else {
			return Err(CodecError::Malformed("fault value is not a struct".into()));
		};
		let message = match members.remove("faultString") {
			Some(Value::String(message)) => message,
			Some(other) => other.to_string(),
			None => return Err(CodecError::Malformed("fault without faultString".into())),
		};
		let code = members.remove("faultCode").unwrap_or(Value::Null);
		Ok(Self { code, message })
	}

	fn to_value(&self) -> Value {
		let mut members = Map::new();
		members.insert("faultCode".into(), self.code.clone());
		members.insert("faultString".into(), Value::String(self.message.clone()));
		Value::Object(members)
	}
}

impl std::fmt::Display for Fault {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.message)
	}
}

/// Encodes a `methodCall` document.
pub fn encode_call(method: &str, params: &[Value]) -> String {
	let mut out = String::from(r#"<?xml version="1.0"?><methodCall><methodName>"#);
	out.push_str(&quick_xml::escape::escape(method));
	out.push_str("</methodName><params>");
	for param in params {
		out.push_str("<param>");
		encode::write_value(&mut out, param);
		out.push_str("</param>");
	}
	out.push_str("</params></methodCall>");
	out
}

/// Encodes a successful `methodResponse` document.
pub fn encode_response(value: &Value) -> String {
	let mut out = String::from(r#"<?xml version="1.0"?><methodResponse><params><param>"#);
	encode::write_value(&mut out, value);
	out.push_str("</param></params></methodResponse>");
	out
}

/// Encodes a fault `methodResponse` document.
pub fn encode_fault(fault: &Fault) -> String {
	let mut out = String::from(r#"<?xml version="1.0"?><methodResponse><fault>"#);
	encode::write_value(&mut out, &fault.to_value());
	out.push_str("</fault></methodResponse>");
	out
}

/// Decodes a `methodCall` document.
pub fn decode_call(input: &[u8]) -> Result<MethodCall> {
	let root = decode::parse_document(input)?;
	root.expect_name("methodCall")?;

	let method = root.required("methodName")?.text.trim().to_string();
	if method.is_empty() {
		return Err(CodecError::Malformed("empty methodName".into()));
	}

	let params = match root.child("params") {
		Some(params) => params
			.children_named("param")
			.map(|param| decode::decode_value(param.required("value")?))
			.collect::<Result<Vec<_>>>()?,
		None => Vec::new(),
	};

	Ok(MethodCall { method, params })
}

/// Decodes a `methodResponse` document into a value or a fault.
pub fn decode_response(input: &[u8]) -> Result<MethodResponse> {
	let root = decode::parse_document(input)?;
	root.expect_name("methodResponse")?;

	if let Some(fault) = root.child("fault") {
		let value = decode::decode_value(fault.required("value")?)?;
		return Fault::from_value(value).map(MethodResponse::Fault);
	}

	let param = root.required("params")?.required("param")?;
	decode::decode_value(param.required("value")?).map(MethodResponse::Success)
}
