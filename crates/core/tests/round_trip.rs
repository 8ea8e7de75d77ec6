//! End-to-end operations against an in-process fake server.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use odoo::{ClientConfig, Domain, ModelClient, Record, SearchOptions, UserId};
use odoo_protocol::codec::{self, Fault};
use parking_lot::Mutex;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Store {
	records: Arc<Mutex<Vec<Record>>>,
	logins: Arc<Mutex<u32>>,
}

fn ids_filter(domain: &Value) -> Option<Vec<i64>> {
	let term = domain.as_array()?.first()?.as_array()?;
	if term.first()? != "id" || term.get(1)? != "in" {
		return None;
	}
	term.get(2)?.as_array()?.iter().map(Value::as_i64).collect()
}

async fn common(State(store): State<Store>, body: Bytes) -> String {
	let call = codec::decode_call(&body).unwrap();
	assert_eq!(call.method, "authenticate");
	*store.logins.lock() += 1;
	let uid = if call.params[2] == "secret" { json!(2) } else { json!(false) };
	codec::encode_response(&uid)
}

async fn object(State(store): State<Store>, body: Bytes) -> String {
	let call = codec::decode_call(&body).unwrap();
	assert_eq!(call.method, "execute_kw");
	let [_, uid, _, model, method, args, kwargs]: [Value; 7] = call.params.try_into().unwrap();
	if uid != 2 {
		return codec::encode_fault(&Fault::new(3, "Access Denied"));
	}
	if model != "res.partner" {
		return codec::encode_fault(&Fault::new(1, format!("Object {} doesn't exist", model)));
	}
	let method_args = args[1].as_array().cloned().unwrap_or_default();

	let result = match method.as_str().unwrap_or_default() {
		"create" => {
			let mut values = method_args[0].as_object().cloned().unwrap();
			let mut records = store.records.lock();
			let id = records.len() as i64 + 1;
			values.insert("id".into(), json!(id));
			records.push(values);
			json!(id)
		}
		"search_read" => {
			let wanted = ids_filter(&method_args[0]);
			let fields: Vec<String> = serde_json::from_value(kwargs["fields"].clone()).unwrap();
			let limit = kwargs.get("limit").and_then(Value::as_u64).unwrap_or(u64::MAX) as usize;
			let records = store.records.lock();
			let matched: Vec<Value> = records
				.iter()
				.filter(|record| match &wanted {
					Some(ids) => ids.contains(&record["id"].as_i64().unwrap()),
					None => true,
				})
				.take(limit)
				.map(|record| {
					let mut out = Record::new();
					for (name, value) in record {
						if name == "id" || fields.is_empty() || fields.contains(name) {
							out.insert(name.clone(), value.clone());
						}
					}
					Value::Object(out)
				})
				.collect();
			Value::Array(matched)
		}
		"search_count" => json!(store.records.lock().len()),
		"unlink" => {
			let ids: Vec<i64> = serde_json::from_value(method_args[0].clone()).unwrap();
			store.records.lock().retain(|record| !ids.contains(&record["id"].as_i64().unwrap()));
			json!(true)
		}
		other => return codec::encode_fault(&Fault::new(2, format!("method {other} not found"))),
	};
	codec::encode_response(&result)
}

async fn db(body: Bytes) -> String {
	let call = codec::decode_call(&body).unwrap();
	assert_eq!(call.method, "server_version");
	codec::encode_response(&json!("17.0"))
}

async fn spawn_server() -> (u16, Store) {
	let store = Store::default();
	let app = Router::new()
		.route("/xmlrpc/2/common", post(common))
		.route("/xmlrpc/2/object", post(object))
		.route("/xmlrpc/2/db", post(db))
		.with_state(store.clone());
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let port = listener.local_addr().unwrap().port();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	(port, store)
}

fn client(port: u16, password: &str) -> ModelClient {
	ModelClient::new(ClientConfig::new("http://127.0.0.1", port, "demo", "admin", password)).unwrap()
}

fn partner(name: &str) -> Record {
	let mut values = Record::new();
	values.insert("name".into(), json!(name));
	values.insert("email".into(), json!(format!("{}@example.com", name.to_lowercase())));
	values
}

#[tokio::test]
async fn create_then_browse_returns_the_record() {
	let (port, store) = spawn_server().await;
	let client = client(port, "secret");

	let id = client.create("res.partner", partner("Acme"), None).await.unwrap();
	let records = client.browse("res.partner", &[id], None).await.unwrap();

	assert_eq!(records.len(), 1);
	assert_eq!(records[0]["id"], json!(id));
	assert_eq!(records[0]["name"], json!("Acme"));
	assert_eq!(*store.logins.lock(), 1);
}

#[tokio::test]
async fn search_count_and_unlink() {
	let (port, _store) = spawn_server().await;
	let client = client(port, "secret");

	for name in ["Acme", "Globex", "Initech"] {
		client.create("res.partner", partner(name), None).await.unwrap();
	}
	assert_eq!(client.count("res.partner", None).await.unwrap(), 3);

	let limited = client
		.search("res.partner", SearchOptions::new().fields(["name"]).limit(2))
		.await
		.unwrap();
	assert_eq!(limited.len(), 2);
	assert!(limited.iter().all(|record| !record.contains_key("email")));

	assert!(client.unlink("res.partner", &[2], None).await.unwrap());
	let remaining = client
		.search("res.partner", SearchOptions::new().domain(Domain::ids_in(&[1, 2, 3])))
		.await
		.unwrap();
	let ids: Vec<i64> = remaining.iter().filter_map(|record| record["id"].as_i64()).collect();
	assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
	let (port, _store) = spawn_server().await;
	let err = client(port, "wrong").count("res.partner", None).await.unwrap_err();
	assert_eq!(err.message(), "invalid username/password");
}

#[tokio::test]
async fn preset_uid_skips_login() {
	let (port, store) = spawn_server().await;
	let config = ClientConfig::new("http://127.0.0.1", port, "demo", "admin", "secret").with_uid(UserId::new(2).unwrap());
	let client = ModelClient::new(config).unwrap();

	assert_eq!(client.count("res.partner", None).await.unwrap(), 0);
	assert_eq!(*store.logins.lock(), 0);
}

#[tokio::test]
async fn server_fault_is_normalized() {
	let (port, _store) = spawn_server().await;
	let err = client(port, "secret").count("res.nope", None).await.unwrap_err();
	assert_eq!(err.code(), "rpc_error_code");
	assert_eq!(err.message(), "XML-RPC fault: Object \"res.nope\" doesn't exist");
}

#[tokio::test]
async fn version_needs_no_login() {
	let (port, store) = spawn_server().await;
	assert_eq!(client(port, "wrong").version().await.unwrap(), json!("17.0"));
	assert_eq!(*store.logins.lock(), 0);
}

#[tokio::test]
async fn unreachable_server_is_normalized() {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);

	let err = client(port, "secret").count("res.partner", None).await.unwrap_err();
	assert_eq!(err.kind(), "RPC error");
	assert!(err.message().starts_with("Transport error"), "got: {}", err.message());
}
