//! Error type for XML-RPC encoding and decoding.

use thiserror::Error;

/// Errors produced while decoding an XML-RPC document.
///
/// Encoding never fails: every [`serde_json::Value`] has an XML-RPC representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
	/// The payload is not well-formed XML.
	#[error("malformed XML: {0}")]
	Xml(String),

	/// The XML is well-formed but does not have the XML-RPC document shape.
	#[error("malformed XML-RPC document: {0}")]
	Malformed(String),

	/// The document root is not the expected element.
	#[error("expected <{expected}> element, found <{found}>")]
	UnexpectedElement { expected: &'static str, found: String },

	/// A required child element is absent.
	#[error("missing <{0}> element")]
	MissingElement(&'static str),

	/// A scalar could not be parsed as its declared type.
	#[error("invalid {kind} value: {text:?}")]
	InvalidValue { kind: &'static str, text: String },

	/// A `<value>` contains a type element this codec does not know.
	#[error("unknown value type <{0}>")]
	UnknownType(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
