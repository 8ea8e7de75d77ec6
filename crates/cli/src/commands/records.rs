use odoo::relational::normalize_records;
use odoo::{Domain, ModelCall, ModelClient, Record, SearchOptions};
use serde_json::{Map, Value, json};

use super::{CommandContext, parse_context, parse_json};
use crate::cli::{BrowseArgs, CallArgs, CreateArgs, IdsArgs, ModelArgs, SearchArgs, WriteArgs};
use crate::error::Result;
use crate::output;

/// Applies relational reshaping when requested; costs one extra `fields_get` call.
async fn finish_records(client: &ModelClient, model: &str, mut records: Vec<Record>, relational: bool) -> Result<Vec<Record>> {
	if relational && !records.is_empty() {
		let fields = client.fields(model).await?;
		normalize_records(&mut records, &fields);
	}
	Ok(records)
}

pub async fn search(ctx: &CommandContext, args: SearchArgs) -> Result<()> {
	let model = args.target.model;
	let mut options = SearchOptions::new().fields(args.fields.iter().cloned());
	if let Some(ref domain) = args.domain {
		options = options.domain(parse_json::<Domain>("--domain", domain)?);
	}
	options.limit = args.limit;
	options.offset = args.offset;
	options.order = args.order.clone();
	options.context = parse_context(args.target.context.as_deref())?;

	let client = ctx.client()?;
	let records = client.search(&model, options).await?;
	let records = finish_records(&client, &model, records, args.relational).await?;

	let inputs = json!({
		"model": model,
		"domain": args.domain,
		"fields": args.fields,
		"limit": args.limit,
		"offset": args.offset,
		"order": args.order,
	});
	output::emit_success("search", inputs, records, ctx.started, ctx.format);
	Ok(())
}

pub async fn browse(ctx: &CommandContext, args: BrowseArgs) -> Result<()> {
	let IdsArgs { target, ids } = args.target;
	let context = parse_context(target.context.as_deref())?;

	let client = ctx.client()?;
	let records = client.browse(&target.model, &ids, context).await?;
	let records = finish_records(&client, &target.model, records, args.relational).await?;

	output::emit_success(
		"browse",
		json!({ "model": target.model, "ids": ids }),
		records,
		ctx.started,
		ctx.format,
	);
	Ok(())
}

pub async fn count(ctx: &CommandContext, args: ModelArgs) -> Result<()> {
	let context = parse_context(args.context.as_deref())?;
	let count = ctx.client()?.count(&args.model, context).await?;
	output::emit_success("count", json!({ "model": args.model }), count, ctx.started, ctx.format);
	Ok(())
}

pub async fn create(ctx: &CommandContext, args: CreateArgs) -> Result<()> {
	let values: Record = parse_json("--values", &args.values)?;
	let context = parse_context(args.target.context.as_deref())?;

	let id = ctx.client()?.create(&args.target.model, values, context).await?;

	output::emit_success(
		"create",
		json!({ "model": args.target.model }),
		json!({ "id": id }),
		ctx.started,
		ctx.format,
	);
	Ok(())
}

pub async fn write(ctx: &CommandContext, args: WriteArgs) -> Result<()> {
	let IdsArgs { target, ids } = args.target;
	let values: Record = parse_json("--values", &args.values)?;
	let context = parse_context(target.context.as_deref())?;

	let written = ctx.client()?.write(&target.model, &ids, values, context).await?;

	output::emit_success(
		"write",
		json!({ "model": target.model, "ids": ids }),
		json!({ "written": written }),
		ctx.started,
		ctx.format,
	);
	Ok(())
}

pub async fn unlink(ctx: &CommandContext, args: IdsArgs) -> Result<()> {
	let context = parse_context(args.target.context.as_deref())?;

	let removed = ctx.client()?.unlink(&args.target.model, &args.ids, context).await?;

	output::emit_success(
		"unlink",
		json!({ "model": args.target.model, "ids": args.ids }),
		json!({ "removed": removed }),
		ctx.started,
		ctx.format,
	);
	Ok(())
}

pub async fn fields(ctx: &CommandContext, model: &str) -> Result<()> {
	let fields = ctx.client()?.fields(model).await?;
	output::emit_success("fields", json!({ "model": model }), fields, ctx.started, ctx.format);
	Ok(())
}

pub async fn call(ctx: &CommandContext, args: CallArgs) -> Result<()> {
	let positional: Vec<Value> = match args.args.as_deref() {
		Some(text) => parse_json("--args", text)?,
		None => Vec::new(),
	};
	let kwargs: Map<String, Value> = match args.kwargs.as_deref() {
		Some(text) => parse_json("--kwargs", text)?,
		None => Map::new(),
	};
	let context = parse_context(args.target.context.as_deref())?.unwrap_or_default();

	let call = ModelCall::new(&args.target.model, &args.method)
		.ids(args.ids.clone())
		.args(positional)
		.kwargs(kwargs)
		.context(context);
	let result = ctx.client()?.call(call).await?;

	output::emit_success(
		"call",
		json!({ "model": args.target.model, "method": args.method, "ids": args.ids }),
		result,
		ctx.started,
		ctx.format,
	);
	Ok(())
}
