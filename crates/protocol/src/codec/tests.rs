use serde_json::json;

use super::*;

#[test]
fn encode_call_nests_params_in_order() {
	let xml = encode_call("execute_kw", &[json!("db"), json!(2), json!([[0], []])]);

	assert!(xml.starts_with(r#"<?xml version="1.0"?><methodCall><methodName>execute_kw</methodName>"#));
	let db = xml.find("<string>db</string>").unwrap();
	let uid = xml.find("<int>2</int>").unwrap();
	let args = xml.find("<array>").unwrap();
	assert!(db < uid && uid < args, "params out of order: {xml}");
}

#[test]
fn encode_escapes_markup_in_strings_and_names() {
	let xml = encode_response(&json!({"a<b": "x & y"}));
	assert!(xml.contains("<name>a&lt;b</name>"));
	assert!(xml.contains("<string>x &amp; y</string>"));
}

#[test]
fn encode_picks_integer_width() {
	let xml = encode_response(&json!([1, 5_000_000_000_i64, 1.5, null, true]));
	assert!(xml.contains("<int>1</int>"));
	assert!(xml.contains("<i8>5000000000</i8>"));
	assert!(xml.contains("<double>1.5</double>"));
	assert!(xml.contains("<nil/>"));
	assert!(xml.contains("<boolean>1</boolean>"));
}

#[test]
fn decode_success_response_with_nested_values() {
	let xml = r#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param>
      <value><array><data>
        <value><struct>
          <member><name>id</name><value><int>7</int></value></member>
          <member><name>name</name><value><string>Azure Interior</string></value></member>
          <member><name>parent_id</name><value><boolean>0</boolean></value></member>
          <member><name>credit</name><value><double>12.5</double></value></member>
          <member><name>ref</name><value>plain text</value></member>
        </struct></value>
      </data></array></value>
    </param>
  </params>
</methodResponse>"#;

	let response = decode_response(xml.as_bytes()).unwrap();
	assert_eq!(
		response,
		MethodResponse::Success(json!([{
			"id": 7,
			"name": "Azure Interior",
			"parent_id": false,
			"credit": 12.5,
			"ref": "plain text",
		}]))
	);
}

#[test]
fn decode_preserves_string_whitespace_and_entities() {
	let xml = r#"<methodResponse><params><param><value><string>  a &amp; b  </string></value></param></params></methodResponse>"#;
	let response = decode_response(xml.as_bytes()).unwrap();
	assert_eq!(response, MethodResponse::Success(json!("  a & b  ")));
}

#[test]
fn decode_empty_value_is_empty_string() {
	let xml = r#"<methodResponse><params><param><value/></param></params></methodResponse>"#;
	let response = decode_response(xml.as_bytes()).unwrap();
	assert_eq!(response, MethodResponse::Success(json!("")));
}

#[test]
fn decode_namespaced_nil() {
	let xml = r#"<methodResponse xmlns:ex="http://ws.apache.org/xmlrpc/namespaces/extensions"><params><param><value><ex:nil/></value></param></params></methodResponse>"#;
	let response = decode_response(xml.as_bytes()).unwrap();
	assert_eq!(response, MethodResponse::Success(Value::Null));
}

#[test]
fn decode_fault_response() {
	let xml = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
  <member><name>faultCode</name><value><int>1</int></value></member>
  <member><name>faultString</name><value><string>Access Denied</string></value></member>
</struct></value></fault></methodResponse>"#;

	match decode_response(xml.as_bytes()).unwrap() {
		MethodResponse::Fault(fault) => {
			assert_eq!(fault.code, json!(1));
			assert_eq!(fault.message, "Access Denied");
			assert_eq!(fault.to_string(), "Access Denied");
		}
		other => panic!("Expected fault, got: {other:?}"),
	}
}

#[test]
fn fault_without_message_is_rejected() {
	let xml = encode_response(&json!({"faultCode": 3}))
		.replace("<params><param>", "<fault>")
		.replace("</param></params>", "</fault>");
	let err = decode_response(xml.as_bytes()).unwrap_err();
	assert!(matches!(err, CodecError::Malformed(_)), "got: {err:?}");
}

#[test]
fn decode_call_reads_method_and_params() {
	let xml = encode_call("authenticate", &[json!("db"), json!("admin"), json!("secret"), json!({})]);
	let call = decode_call(xml.as_bytes()).unwrap();
	assert_eq!(call.method, "authenticate");
	assert_eq!(call.params, vec![json!("db"), json!("admin"), json!("secret"), json!({})]);
}

#[test]
fn decode_call_without_params() {
	let call = decode_call(b"<methodCall><methodName>server_version</methodName></methodCall>").unwrap();
	assert_eq!(call.method, "server_version");
	assert!(call.params.is_empty());
}

#[test]
fn encoded_fault_decodes_back() {
	let fault = Fault::new("warning", "Record does not exist");
	let response = decode_response(encode_fault(&fault).as_bytes()).unwrap();
	assert_eq!(response, MethodResponse::Fault(fault));
}

#[test]
fn wrong_root_element_is_rejected() {
	let err = decode_response(b"<methodCall><methodName>x</methodName></methodCall>").unwrap_err();
	assert_eq!(
		err,
		CodecError::UnexpectedElement {
			expected: "methodResponse",
			found: "methodCall".into(),
		}
	);
}

#[test]
fn missing_params_is_rejected() {
	let err = decode_response(b"<methodResponse></methodResponse>").unwrap_err();
	assert_eq!(err, CodecError::MissingElement("params"));
}

#[test]
fn unknown_type_is_rejected() {
	let xml = r#"<methodResponse><params><param><value><decimal>1</decimal></value></param></params></methodResponse>"#;
	let err = decode_response(xml.as_bytes()).unwrap_err();
	assert_eq!(err, CodecError::UnknownType("decimal".into()));
}

#[test]
fn invalid_int_is_rejected() {
	let xml = r#"<methodResponse><params><param><value><int>seven</int></value></param></params></methodResponse>"#;
	let err = decode_response(xml.as_bytes()).unwrap_err();
	assert!(matches!(err, CodecError::InvalidValue { kind: "int", .. }));
}

#[test]
fn truncated_document_is_rejected() {
	let err = decode_response(b"<methodResponse><params>").unwrap_err();
	assert!(matches!(err, CodecError::Malformed(_) | CodecError::Xml(_)), "got: {err:?}");
}

#[test]
fn mismatched_tags_are_rejected() {
	let err = decode_response(b"<methodResponse><params></param></methodResponse>").unwrap_err();
	assert!(matches!(err, CodecError::Xml(_)), "got: {err:?}");
}

fn nested_arrays(depth: usize) -> String {
	let mut xml = String::from("<methodResponse><params><param>");
	xml.push_str(&"<value><array><data>".repeat(depth));
	xml.push_str("<value><int>1</int></value>");
	xml.push_str(&"</data></array></value>".repeat(depth));
	xml.push_str("</param></params></methodResponse>");
	xml
}

#[test]
fn deeply_nested_document_is_rejected() {
	let err = decode_response(nested_arrays(200_000).as_bytes()).unwrap_err();
	assert!(matches!(err, CodecError::Malformed(_)), "got: {err:?}");
}

#[test]
fn nesting_within_the_limit_decodes() {
	let depth = (decode::MAX_DEPTH - 5) / 3;
	let response = decode_response(nested_arrays(depth).as_bytes()).unwrap();

	let mut value = match response {
		MethodResponse::Success(value) => value,
		other => panic!("expected success, got {other:?}"),
	};
	for _ in 0..depth {
		value = value.as_array().unwrap()[0].clone();
	}
	assert_eq!(value, json!(1));
}
