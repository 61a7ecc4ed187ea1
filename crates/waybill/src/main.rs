use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod cli;
mod env;
mod ui;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let app = cli::App::parse();

    if let Err(e) = cli::run(app).await {
        eprintln!("{} {e:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}
