use std::fs;

use tempfile::TempDir;

use super::*;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
	let path = dir.path().join("config.json");
	fs::write(&path, content).unwrap();
	path
}

const SAMPLE: &str = r#"{
	"schema": 1,
	"profiles": {
		"default": { "host": "http://localhost", "port": 8069, "database": "demo", "username": "admin" },
		"prod": { "host": "https://erp.example.com", "port": 443, "database": "prod", "username": "bot", "password": "s3cret", "uid": 12 }
	}
}"#;

#[test]
fn default_path_ends_with_app_dir() {
	assert!(default_config_path().ends_with("odoo-rpc/config.json"));
}

#[test]
fn missing_file_is_empty_config() {
	let tmp = TempDir::new().unwrap();
	let config = ConfigFile::load(&tmp.path().join("nonexistent.json")).unwrap();
	assert_eq!(config, ConfigFile::default());
}

#[test]
fn invalid_json_names_the_file() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(&tmp, "{ not json");
	let err = ConfigFile::load(&path).unwrap_err();
	assert!(format!("{err:#}").contains("parsing"), "got: {err:#}");
}

#[test]
fn unsupported_schema_is_rejected() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(&tmp, r#"{ "schema": 9, "profiles": {} }"#);
	assert!(ConfigFile::load(&path).is_err());
}

#[test]
fn full_profile_resolves() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(&tmp, SAMPLE);

	let config = resolve(Some(&path), "prod", &Profile::default()).unwrap();

	assert_eq!(config.host, "https://erp.example.com");
	assert_eq!(config.port, 443);
	assert_eq!(config.password, "s3cret");
	assert_eq!(config.uid, UserId::new(12));
}

#[test]
fn overrides_fill_and_replace_profile_fields() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(&tmp, SAMPLE);
	let overrides = Profile {
		port: Some(8070),
		password: Some("from-env".into()),
		..Default::default()
	};

	let config = resolve(Some(&path), "default", &overrides).unwrap();

	assert_eq!(config.host, "http://localhost");
	assert_eq!(config.port, 8070);
	assert_eq!(config.password, "from-env");
	assert_eq!(config.uid, None);
}

#[test]
fn missing_password_is_reported() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(&tmp, SAMPLE);

	let err = resolve(Some(&path), "default", &Profile::default()).unwrap_err();
	let message = format!("{err:#}");

	assert!(message.starts_with("profile \"default\""), "got: {message}");
	assert!(message.contains("missing password"), "got: {message}");
	assert!(message.contains("ODOO_PASSWORD"), "got: {message}");
}

#[test]
fn unknown_profile_is_an_error() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(&tmp, SAMPLE);
	let err = resolve(Some(&path), "staging", &Profile::default()).unwrap_err();
	assert!(err.to_string().contains("unknown profile \"staging\""));
}

#[test]
fn default_profile_may_come_entirely_from_flags() {
	let tmp = TempDir::new().unwrap();
	let overrides = Profile {
		host: Some("localhost".into()),
		port: Some(8069),
		database: Some("demo".into()),
		username: Some("admin".into()),
		password: Some("admin".into()),
		..Default::default()
	};

	let config = resolve(Some(&tmp.path().join("none.json")), DEFAULT_PROFILE, &overrides).unwrap();

	assert_eq!(config.database, "demo");
}

#[test]
fn redacted_profile_hides_password() {
	let profile = Profile {
		password: Some("s3cret".into()),
		..Default::default()
	};
	assert_eq!(profile.redacted().password.as_deref(), Some("<redacted>"));
	assert!(!format!("{profile:?}").contains("s3cret"));
}

#[test]
fn zero_uid_in_profile_is_unset() {
	let tmp = TempDir::new().unwrap();
	let path = write_config(
		&tmp,
		r#"{ "schema": 1, "profiles": { "default": { "host": "localhost", "port": 8069, "database": "demo", "username": "admin", "password": "pw", "uid": 0 } } }"#,
	);

	let config = resolve(Some(&path), "default", &Profile::default()).unwrap();
	assert_eq!(config.uid, None);
}
