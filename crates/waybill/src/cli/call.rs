use anyhow::{Context as _, Result};
use waybill_client::{ApiEnvelope, CallOptions, Method, Params};

use crate::cli::Context;
use crate::cli::app::CallArgs;

const USER_INFO_PATH: &str = "/app_driver/user/getUserInfo";

pub async fn me(ctx: &Context) -> Result<()> {
    let envelope = send(ctx, Method::Get, USER_INFO_PATH, Params::new()).await?;
    print_json(&envelope.data.unwrap_or_default())
}

pub async fn get(ctx: &Context, args: CallArgs) -> Result<()> {
    let envelope = send(ctx, Method::Get, &args.path, args.params.into_params()).await?;
    print_json(&serde_json::to_value(envelope)?)
}

pub async fn post(ctx: &Context, args: CallArgs) -> Result<()> {
    let envelope = send(ctx, Method::Post, &args.path, args.params.into_params()).await?;
    print_json(&serde_json::to_value(envelope)?)
}

async fn send(ctx: &Context, method: Method, path: &str, params: Params) -> Result<ApiEnvelope> {
    let options = CallOptions::default().loading(true).toast_errors(true);
    let envelope = ctx
        .client()?
        .call(method, path, params, options)
        .await
        .with_context(|| format!("{method} {path} failed"))?;
    envelope
        .into_result()
        .with_context(|| format!("{method} {path} was rejected"))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
