use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// No usable connection settings after merging profile, flags and environment.
	#[error("configuration error: {0:#}")]
	Config(anyhow::Error),

	/// A JSON argument could not be parsed or has the wrong shape.
	#[error("invalid {flag}: {message}")]
	InvalidInput { flag: &'static str, message: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Odoo(#[from] odoo::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	pub fn invalid_input(flag: &'static str, message: impl ToString) -> Self {
		CliError::InvalidInput {
			flag,
			message: message.to_string(),
		}
	}

	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, message, details) = match self {
			CliError::Config(err) => (ErrorCode::ConfigError, format!("{err:#}"), None),
			CliError::InvalidInput { flag, .. } => (
				ErrorCode::InvalidInput,
				self.to_string(),
				Some(serde_json::json!({ "flag": flag })),
			),
			CliError::Io(err) => (ErrorCode::IoError, err.to_string(), None),
			CliError::Json(err) => (ErrorCode::InternalError, format!("JSON error: {err}"), None),
			CliError::Odoo(err) => {
				let code = if err.is_invalid_credentials() {
					ErrorCode::AuthError
				} else {
					ErrorCode::RpcError
				};
				(
					code,
					err.message().to_string(),
					Some(serde_json::json!({ "kind": err.kind(), "code": err.code() })),
				)
			}
			CliError::Anyhow(err) => (ErrorCode::InternalError, format!("{err:#}"), None),
		};

		CommandError { code, message, details }
	}
}
