use serde_json::json;

use super::CommandContext;
use crate::cli::ProfileAction;
use crate::config::{self, ConfigFile};
use crate::error::{CliError, Result};
use crate::output;

pub fn execute(ctx: &CommandContext, action: ProfileAction) -> Result<()> {
	let path = ctx.connection.config.clone().unwrap_or_else(config::default_config_path);
	let file = ConfigFile::load(&path).map_err(CliError::Config)?;

	match action {
		ProfileAction::List => {
			let names: Vec<&String> = file.profiles.keys().collect();
			output::emit_success("profile list", json!({ "config": path }), names, ctx.started, ctx.format);
		}
		ProfileAction::Show { name } => {
			let name = name.unwrap_or_else(|| ctx.connection.profile.clone());
			let profile = file
				.profile(&name, &ctx.connection.overrides())
				.map_err(CliError::Config)?
				.redacted();
			output::emit_success(
				"profile show",
				json!({ "config": path, "profile": name }),
				profile,
				ctx.started,
				ctx.format,
			);
		}
	}
	Ok(())
}
