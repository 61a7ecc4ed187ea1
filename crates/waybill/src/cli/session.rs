use anyhow::{Context as _, Result};
use chrono::{Local, TimeZone};
use console::style;

use crate::cli::Context;
use crate::cli::app::ParamArgs;

pub async fn login(ctx: &Context, args: ParamArgs) -> Result<()> {
    ctx.client()?
        .login(args.into_params())
        .await
        .context("Login failed")?;
    println!("{} signed in", style("✓").green().bold());
    status(ctx).await
}

pub async fn logout(ctx: &Context) -> Result<()> {
    match ctx.client() {
        Ok(client) => client.logout().await.context("Failed to drop the stored session")?,
        Err(e) => {
            tracing::warn!("backend unavailable, signing out locally: {e:#}");
            ctx.session
                .try_clear()
                .await
                .context("Failed to drop the stored session")?;
        }
    }
    println!("{} signed out", style("✓").green().bold());
    Ok(())
}

pub async fn status(ctx: &Context) -> Result<()> {
    let session = &ctx.session;
    let snapshot = session.snapshot().await;

    println!("session file: {}", ctx.env.session_file().display());
    if snapshot.access_token.is_none() {
        println!("status: {}", style("signed out").dim());
        return Ok(());
    }

    let expiry = snapshot
        .expires_at_ms
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map_or_else(|| "unknown".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
    if snapshot.is_expired_at(session.now_ms()) {
        println!("status: {} (expired {expiry})", style("expired").red());
    } else {
        println!("status: {} until {expiry}", style("signed in").green());
    }
    Ok(())
}
