use serde_json::json;
use tracing::info;

use super::CommandContext;
use crate::error::Result;
use crate::output;

pub async fn version(ctx: &CommandContext) -> Result<()> {
	let client = ctx.client()?;
	let version = client.version().await?;
	let inputs = json!({ "host": client.session().config().host });
	output::emit_success("version", inputs, version, ctx.started, ctx.format);
	Ok(())
}

pub async fn login(ctx: &CommandContext) -> Result<()> {
	let client = ctx.client()?;
	let session = client.session();
	let preset = session.is_authenticated();
	let uid = session.authenticate().await?;
	info!(uid = uid.get(), preset, "login");

	let config = session.config();
	let inputs = json!({ "host": config.host, "database": config.database, "username": config.username });
	let data = json!({ "uid": uid, "database": config.database, "preset": preset });
	output::emit_success("login", inputs, data, ctx.started, ctx.format);
	Ok(())
}
