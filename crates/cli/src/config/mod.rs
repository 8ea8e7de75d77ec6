//! Connection profiles stored in the CLI config file.
//!
//! The file lives at `$XDG_CONFIG_HOME/odoo-rpc/config.json` (falling back to
//! `~/.config/odoo-rpc/config.json`):
//!
//! ```json
//! {
//!   "schema": 1,
//!   "profiles": {
//!     "default": { "host": "http://localhost", "port": 8069, "database": "demo", "username": "admin" }
//!   }
//! }
//! ```
//!
//! Profiles may be partial; global flags and `ODOO_PASSWORD` fill in the rest.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use odoo::{ClientConfig, UserId};
use serde::{Deserialize, Serialize};

pub const CONFIG_SCHEMA: u32 = 1;

/// Environment variable read by `--password`.
pub const PASSWORD_ENV: &str = "ODOO_PASSWORD";

/// Name of the profile used when `--profile` is not given.
pub const DEFAULT_PROFILE: &str = "default";

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."));
	config_home.join("odoo-rpc").join("config.json")
}

fn default_schema() -> u32 {
	CONFIG_SCHEMA
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
	#[serde(default = "default_schema")]
	pub schema: u32,
	#[serde(default)]
	pub profiles: BTreeMap<String, Profile>,
}

impl Default for ConfigFile {
	fn default() -> Self {
		Self {
			schema: CONFIG_SCHEMA,
			profiles: BTreeMap::new(),
		}
	}
}

impl ConfigFile {
	/// Loads the file at `path`; a missing file is an empty config.
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
			Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
		};
		let config: Self = serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
		if config.schema != CONFIG_SCHEMA {
			bail!("{}: unsupported schema {} (expected {CONFIG_SCHEMA})", path.display(), config.schema);
		}
		Ok(config)
	}

	/// Returns the named profile merged under `overrides`.
	///
	/// Only the default profile may be absent from the file.
	pub fn profile(&self, name: &str, overrides: &Profile) -> anyhow::Result<Profile> {
		let base = match self.profiles.get(name) {
			Some(profile) => profile.clone(),
			None if name == DEFAULT_PROFILE => Profile::default(),
			None => return Err(anyhow!("unknown profile \"{name}\"")),
		};
		Ok(base.merged(overrides))
	}
}

/// A possibly partial set of connection settings.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub host: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub port: Option<u16>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub database: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	#[serde(
		default,
		deserialize_with = "UserId::deserialize_optional",
		skip_serializing_if = "Option::is_none"
	)]
	pub uid: Option<UserId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,
}

impl Profile {
	/// Fields set in `overrides` replace those in `self`.
	pub fn merged(self, overrides: &Profile) -> Profile {
		let overrides = overrides.clone();
		Profile {
			host: overrides.host.or(self.host),
			port: overrides.port.or(self.port),
			database: overrides.database.or(self.database),
			username: overrides.username.or(self.username),
			password: overrides.password.or(self.password),
			uid: overrides.uid.or(self.uid),
			timeout_ms: overrides.timeout_ms.or(self.timeout_ms),
		}
	}

	/// Copy with the password masked, for display.
	pub fn redacted(&self) -> Profile {
		Profile {
			password: self.password.as_ref().map(|_| "<redacted>".to_string()),
			..self.clone()
		}
	}

	/// Converts into a client configuration; every field except `uid` and `timeoutMs` is required.
	pub fn into_client_config(self) -> anyhow::Result<ClientConfig> {
		fn required<T>(value: Option<T>, field: &str, flag: &str) -> anyhow::Result<T> {
			value.ok_or_else(|| anyhow!("missing {field} (set it in the profile or pass {flag})"))
		}

		let mut config = ClientConfig::new(
			required(self.host, "host", "--host")?,
			required(self.port, "port", "--port")?,
			required(self.database, "database", "--database")?,
			required(self.username, "username", "--username")?,
			required(self.password, "password", &format!("--password or set {PASSWORD_ENV}"))?,
		);
		config.uid = self.uid;
		config.timeout_ms = self.timeout_ms;
		Ok(config)
	}
}

impl fmt::Debug for Profile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let redacted = self.redacted();
		f.debug_struct("Profile")
			.field("host", &redacted.host)
			.field("port", &redacted.port)
			.field("database", &redacted.database)
			.field("username", &redacted.username)
			.field("password", &redacted.password)
			.field("uid", &redacted.uid)
			.field("timeout_ms", &redacted.timeout_ms)
			.finish()
	}
}

/// Loads `path` (or the default path) and resolves `profile` with `overrides` applied.
pub fn resolve(path: Option<&Path>, profile: &str, overrides: &Profile) -> anyhow::Result<ClientConfig> {
	let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
	let file = ConfigFile::load(&path)?;
	file.profile(profile, overrides)?
		.into_client_config()
		.with_context(|| format!("profile \"{profile}\""))
}
