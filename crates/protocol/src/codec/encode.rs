use std::fmt::Write;

use quick_xml::escape::escape;
use serde_json::{Number, Value};

pub(super) fn write_value(out: &mut String, value: &Value) {
	out.push_str("<value>");
	match value {
		Value::Null => out.push_str("<nil/>"),
		Value::Bool(flag) => {
			let _ = write!(out, "<boolean>{}</boolean>", u8::from(*flag));
		}
		Value::Number(number) => write_number(out, number),
		Value::String(text) => {
			out.push_str("<string>");
			out.push_str(&escape(text.as_str()));
			out.push_str("</string>");
		}
		Value::Array(items) => {
			out.push_str("<array><data>");
			for item in items {
				write_value(out, item);
			}
			out.push_str("</data></array>");
		}
		Value::Object(members) => {
			out.push_str("<struct>");
			for (name, member) in members {
				out.push_str("<member><name>");
				out.push_str(&escape(name.as_str()));
				out.push_str("</name>");
				write_value(out, member);
				out.push_str("</member>");
			}
			out.push_str("</struct>");
		}
	}
	out.push_str("</value>");
}

fn write_number(out: &mut String, number: &Number) {
	let _ = match number.as_i64() {
		Some(int) if i32::try_from(int).is_ok() => write!(out, "<int>{int}</int>"),
		Some(int) => write!(out, "<i8>{int}</i8>"),
		// u64 above i64::MAX or a float
		None => write!(out, "<double>{}</double>", number.as_f64().unwrap_or_default()),
	};
}
