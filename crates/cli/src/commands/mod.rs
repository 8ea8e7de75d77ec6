mod profile;
mod records;
mod session;

use std::time::Instant;

use odoo::{Context, ModelClient};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cli::{Cli, Commands, ConnectionArgs};
use crate::config;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

/// Shared state for one command invocation.
pub struct CommandContext {
	pub connection: ConnectionArgs,
	pub format: OutputFormat,
	pub started: Instant,
}

impl CommandContext {
	/// Builds a client from the selected profile and flag overrides.
	pub fn client(&self) -> Result<ModelClient> {
		let config = config::resolve(
			self.connection.config.as_deref(),
			&self.connection.profile,
			&self.connection.overrides(),
		)
		.map_err(CliError::Config)?;
		debug!(?config, "resolved connection");
		Ok(ModelClient::new(config)?)
	}
}

pub async fn dispatch(cli: Cli) -> Result<()> {
	let ctx = CommandContext {
		connection: cli.connection,
		format: cli.format,
		started: Instant::now(),
	};

	match cli.command {
		Commands::Version => session::version(&ctx).await,
		Commands::Login => session::login(&ctx).await,
		Commands::Search(args) => records::search(&ctx, args).await,
		Commands::Browse(args) => records::browse(&ctx, args).await,
		Commands::Count(args) => records::count(&ctx, args).await,
		Commands::Create(args) => records::create(&ctx, args).await,
		Commands::Write(args) => records::write(&ctx, args).await,
		Commands::Unlink(args) => records::unlink(&ctx, args).await,
		Commands::Fields { model } => records::fields(&ctx, &model).await,
		Commands::Call(args) => records::call(&ctx, args).await,
		Commands::Profile(args) => profile::execute(&ctx, args.action),
	}
}

/// Parses a JSON flag value into `T`, naming the flag on failure.
pub(crate) fn parse_json<T: DeserializeOwned>(flag: &'static str, text: &str) -> Result<T> {
	serde_json::from_str(text).map_err(|e| CliError::invalid_input(flag, e))
}

pub(crate) fn parse_context(text: Option<&str>) -> Result<Option<Context>> {
	text.map(|text| parse_json("--context", text)).transpose()
}
