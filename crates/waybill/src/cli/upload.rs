use std::sync::Arc;

use anyhow::{Context as _, Result};
use console::style;
use waybill_client::Uploader;

use crate::cli::Context;
use crate::cli::app::UploadArgs;
use crate::ui::UploadTracker;

pub async fn upload(ctx: &Context, args: UploadArgs) -> Result<()> {
    let client = ctx.client()?;
    let tracker = Arc::new(UploadTracker::new());
    let progress = Arc::clone(&tracker);
    let uploader =
        Uploader::new(Arc::clone(&client)).on_progress(Arc::new(move |phase| progress.phase(phase)));

    let object = match uploader.upload(&args.file).await {
        Ok(object) => object,
        Err(e) => {
            client.ui().toast(&e.user_message());
            return Err(e).with_context(|| format!("Failed to upload {}", args.file.display()));
        }
    };

    println!("{} uploaded {}", style("✓").green().bold(), args.file.display());
    println!("key: {}", object.object_key);
    println!("url: {}", object.resolved_url);
    Ok(())
}
