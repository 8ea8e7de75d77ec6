
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_PROFILE, PASSWORD_ENV, Profile};
use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Root CLI for odoo-rpc.
#[derive(Parser, Debug)]
#[command(name = "odoo-rpc")]
#[command(about = "Query and modify Odoo records over XML-RPC")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: json (default), ndjson, or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	#[command(flatten)]
	pub connection: ConnectionArgs,

	#[command(subcommand)]
	pub command: Commands,
}

/// Connection settings; each flag overrides the matching profile field.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
	/// Config file (default: $XDG_CONFIG_HOME/odoo-rpc/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Profile name in the config file
	#[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_PROFILE)]
	pub profile: String,

	/// Server address, e.g. https://erp.example.com
	#[arg(long, global = true, value_name = "URL")]
	pub host: Option<String>,

	#[arg(long, global = true)]
	pub port: Option<u16>,

	#[arg(short = 'd', long, global = true, value_name = "NAME")]
	pub database: Option<String>,

	#[arg(short = 'u', long, global = true, value_name = "LOGIN")]
	pub username: Option<String>,

	/// Known user id; skips authentication
	#[arg(long, global = true, value_name = "ID", value_parser = parse_uid)]
	pub uid: Option<odoo::UserId>,

	#[arg(long, global = true, env = PASSWORD_ENV, hide_env_values = true)]
	pub password: Option<String>,

	/// Per-request timeout in milliseconds
	#[arg(long, global = true, value_name = "MS")]
	pub timeout_ms: Option<u64>,
}

impl ConnectionArgs {
	/// Flag values as a profile overlay.
	pub fn overrides(&self) -> Profile {
		Profile {
			host: self.host.clone(),
			port: self.port,
			database: self.database.clone(),
			username: self.username.clone(),
			password: self.password.clone(),
			uid: self.uid,
			timeout_ms: self.timeout_ms,
		}
	}
}

fn parse_uid(s: &str) -> Result<odoo::UserId, String> {
	let raw: i64 = s.parse().map_err(|e| format!("{e}"))?;
	odoo::UserId::new(raw).ok_or_else(|| "user id must be positive".to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show the server version (no login needed).
	Version,
	/// Authenticate and print the resolved user id.
	Login,
	/// Read records matching a domain.
	Search(SearchArgs),
	/// Read records by id.
	Browse(BrowseArgs),
	/// Count the records of a model.
	Count(ModelArgs),
	/// Create a record and print its id.
	Create(CreateArgs),
	/// Update records.
	Write(WriteArgs),
	/// Delete records.
	Unlink(IdsArgs),
	/// List the fields of a model and their types.
	Fields {
		#[arg(value_name = "MODEL")]
		model: String,
	},
	/// Call any model method.
	Call(CallArgs),
	/// Inspect configured profiles.
	Profile(ProfileArgs),
}

impl Commands {
	/// Command name used in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Version => "version",
			Commands::Login => "login",
			Commands::Search(_) => "search",
			Commands::Browse(_) => "browse",
			Commands::Count(_) => "count",
			Commands::Create(_) => "create",
			Commands::Write(_) => "write",
			Commands::Unlink(_) => "unlink",
			Commands::Fields { .. } => "fields",
			Commands::Call(_) => "call",
			Commands::Profile(args) => match args.action {
				ProfileAction::List => "profile list",
				ProfileAction::Show { .. } => "profile show",
			},
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
	/// Model name, e.g. res.partner
	#[arg(value_name = "MODEL")]
	pub model: String,

	/// Context as a JSON object
	#[arg(long, value_name = "JSON")]
	pub context: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
	#[command(flatten)]
	pub target: ModelArgs,

	/// Domain as a JSON array, e.g. '[["is_company","=",true]]'
	#[arg(long, value_name = "JSON")]
	pub domain: Option<String>,

	/// Fields to read (comma-separated; default all)
	#[arg(long, value_name = "FIELDS", value_delimiter = ',')]
	pub fields: Vec<String>,

	#[arg(long)]
	pub limit: Option<u32>,

	#[arg(long)]
	pub offset: Option<u32>,

	/// Sort order, e.g. "name asc, id desc"
	#[arg(long)]
	pub order: Option<String>,

	/// Reshape many2one/x2many values using field metadata
	#[arg(long)]
	pub relational: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BrowseArgs {
	#[command(flatten)]
	pub target: IdsArgs,

	/// Reshape many2one/x2many values using field metadata
	#[arg(long)]
	pub relational: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IdsArgs {
	#[command(flatten)]
	pub target: ModelArgs,

	/// Record ids (comma- or space-separated)
	#[arg(value_name = "IDS", required = true, num_args = 1.., value_delimiter = ',')]
	pub ids: Vec<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
	#[command(flatten)]
	pub target: ModelArgs,

	/// Field values as a JSON object
	#[arg(long, value_name = "JSON")]
	pub values: String,
}

#[derive(Args, Debug, Clone)]
pub struct WriteArgs {
	#[command(flatten)]
	pub target: IdsArgs,

	/// Field values as a JSON object
	#[arg(long, value_name = "JSON")]
	pub values: String,
}

#[derive(Args, Debug, Clone)]
pub struct CallArgs {
	#[command(flatten)]
	pub target: ModelArgs,

	#[arg(value_name = "METHOD")]
	pub method: String,

	/// Records to bind the call to (comma-separated)
	#[arg(long, value_name = "IDS", value_delimiter = ',')]
	pub ids: Vec<i64>,

	/// Positional arguments as a JSON array
	#[arg(long, value_name = "JSON")]
	pub args: Option<String>,

	/// Keyword arguments as a JSON object
	#[arg(long, value_name = "JSON")]
	pub kwargs: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
	#[command(subcommand)]
	pub action: ProfileAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
	/// List available profiles.
	List,
	/// Show profile configuration (password redacted).
	Show {
		#[arg(value_name = "NAME")]
		name: Option<String>,
	},
}
