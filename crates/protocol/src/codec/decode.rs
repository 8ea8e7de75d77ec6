use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::{Map, Number, Value};

use crate::error::{CodecError, Result};

/// Minimal element tree built from the event stream.
///
/// XML-RPC documents are small and strictly nested, so materializing the tree
/// keeps the value decoder a plain recursive walk.
#[derive(Debug, Default)]
pub(super) struct Element {
	pub name: String,
	pub text: String,
	pub children: Vec<Element>,
}

impl Element {
	fn open(start: &BytesStart<'_>) -> Self {
		// Local name only, so `ex:nil` from Apache-style servers decodes as `nil`.
		let name = start.local_name();
		Self {
			name: String::from_utf8_lossy(name.as_ref()).into_owned(),
			..Default::default()
		}
	}

	pub fn child(&self, name: &str) -> Option<&Element> {
		self.children.iter().find(|child| child.name == name)
	}

	pub fn required(&self, name: &'static str) -> Result<&Element> {
		self.child(name).ok_or(CodecError::MissingElement(name))
	}

	pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
		self.children.iter().filter(move |child| child.name == name)
	}

	pub fn expect_name(&self, expected: &'static str) -> Result<()> {
		if self.name == expected {
			Ok(())
		} else {
			Err(CodecError::UnexpectedElement {
				expected,
				found: self.name.clone(),
			})
		}
	}
}

/// Deepest element nesting a document may reach.
pub(super) const MAX_DEPTH: usize = 256;

/// Parses a whole document and returns its root element.
///
/// Documents nested deeper than [`MAX_DEPTH`] are rejected as malformed.
pub(super) fn parse_document(input: &[u8]) -> Result<Element> {
	let mut reader = Reader::from_reader(input);
	let mut stack: Vec<Element> = Vec::new();

	loop {
		let event = reader.read_event().map_err(|e| CodecError::Xml(e.to_string()))?;
		let closed = match event {
			Event::Start(start) => {
				if stack.len() >= MAX_DEPTH {
					return Err(CodecError::Malformed(format!("nesting deeper than {MAX_DEPTH} elements")));
				}
				stack.push(Element::open(&start));
				None
			}
			Event::Empty(start) => Some(Element::open(&start)),
			Event::End(_) => Some(
				stack
					.pop()
					.ok_or_else(|| CodecError::Malformed("unbalanced closing tag".into()))?,
			),
			Event::Text(text) => {
				if let Some(top) = stack.last_mut() {
					let text = text.unescape().map_err(|e| CodecError::Xml(e.to_string()))?;
					top.text.push_str(&text);
				}
				None
			}
			Event::CData(data) => {
				if let Some(top) = stack.last_mut() {
					top.text.push_str(&String::from_utf8_lossy(&data));
				}
				None
			}
			Event::Eof => {
				return Err(CodecError::Malformed("document ended before the root element closed".into()));
			}
			_ => None,
		};

		if let Some(element) = closed {
			match stack.last_mut() {
				Some(parent) => parent.children.push(element),
				None => return Ok(element),
			}
		}
	}
}

/// Decodes one `<value>` element.
pub(super) fn decode_value(value: &Element) -> Result<Value> {
	let Some(typed) = value.children.first() else {
		// Untyped `<value>text</value>` is a string.
		return Ok(Value::String(value.text.clone()));
	};
	let text = typed.text.trim();

	match typed.name.as_str() {
		"int" | "i4" | "i8" => text.parse::<i64>().map(Value::from).map_err(|_| invalid("int", text)),
		"boolean" => match text {
			"1" | "true" => Ok(Value::Bool(true)),
			"0" | "false" => Ok(Value::Bool(false)),
			_ => Err(invalid("boolean", text)),
		},
		"string" => Ok(Value::String(typed.text.clone())),
		"double" => text
			.parse::<f64>()
			.ok()
			.and_then(Number::from_f64)
			.map(Value::Number)
			.ok_or_else(|| invalid("double", text)),
		"dateTime.iso8601" => Ok(Value::String(text.to_string())),
		"base64" => Ok(Value::String(text.split_whitespace().collect())),
		"nil" => Ok(Value::Null),
		"array" => typed
			.required("data")?
			.children_named("value")
			.map(decode_value)
			.collect::<Result<Vec<_>>>()
			.map(Value::Array),
		"struct" => {
			let mut members = Map::new();
			for member in typed.children_named("member") {
				let name = member.required("name")?.text.clone();
				members.insert(name, decode_value(member.required("value")?)?);
			}
			Ok(Value::Object(members))
		}
		other => Err(CodecError::UnknownType(other.to_string())),
	}
}

fn invalid(kind: &'static str, text: &str) -> CodecError {
	CodecError::InvalidValue {
		kind,
		text: text.to_string(),
	}
}
