//! Reshaping of relational field values in read results.
//!
//! `search_read` returns many2one values as `[id, "display name"]` and unset
//! relations as `false`. These helpers turn them into shapes that deserialize
//! cleanly: `{"id", "name"}` objects, `null`, and `[]`.

use odoo_protocol::Record;
use serde_json::{Map, Value};

use crate::client::Fields;

/// Normalizes the relational values of one record in place.
///
/// Fields missing from `fields` and non-relational fields are left untouched.
pub fn normalize_record(record: &mut Record, fields: &Fields) {
	for (name, value) in record.iter_mut() {
		let Some(info) = fields.get(name) else {
			continue;
		};
		if info.is_many2one() {
			*value = many2one(value.take());
		} else if info.is_x2many() && *value == Value::Bool(false) {
			*value = Value::Array(Vec::new());
		}
	}
}

/// Normalizes every record of a read result.
pub fn normalize_records(records: &mut [Record], fields: &Fields) {
	for record in records {
		normalize_record(record, fields);
	}
}

fn many2one(value: Value) -> Value {
	match value {
		Value::Bool(false) => Value::Null,
		Value::Array(pair) if pair.len() == 2 && pair[0].is_i64() => {
			let mut pair = pair.into_iter();
			let mut object = Map::new();
			object.insert("id".into(), pair.next().unwrap_or_default());
			object.insert("name".into(), pair.next().unwrap_or_default());
			Value::Object(object)
		}
		other => other,
	}
}
