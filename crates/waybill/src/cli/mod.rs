use std::sync::Arc;

use anyhow::{Context as _, Result};
use waybill_client::{ApiClient, ClientConfig, ReqwestClient};
use waybill_session::{FileStorage, SessionStore};

use crate::env::WaybillEnv;
use crate::ui::{TerminalNavigator, TerminalUi};

pub mod app;
pub mod call;
pub mod parse;
pub mod session;
pub mod upload;

pub use app::{App, Commands};

/// Everything a command needs, built once per invocation.
///
/// The API client is only built by commands that talk to the backend, so
/// local commands work without a configured secret.
pub struct Context {
    pub env:     WaybillEnv,
    pub config:  ClientConfig,
    pub session: Arc<SessionStore>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let env = WaybillEnv::new()?;
        let config = env.load_config()?;
        tracing::debug!(root = %env.root().display(), ?config, "loaded configuration");
        Ok(Self::new(env, config))
    }

    pub fn new(env: WaybillEnv, config: ClientConfig) -> Self {
        let session = Arc::new(SessionStore::new(Arc::new(FileStorage::new(env.session_file()))));
        Self {
            env,
            config,
            session,
        }
    }

    pub fn client(&self) -> Result<Arc<ApiClient<ReqwestClient>>> {
        let http = ReqwestClient::with_timeout(self.config.timeout())
            .context("Failed to build HTTP client")?;
        let client = ApiClient::new(
            http,
            self.config.clone(),
            Arc::clone(&self.session),
            Arc::new(TerminalNavigator),
        )
        .context("Invalid client configuration (is WAYBILL_SECRET set?)")?
        .with_ui(Arc::new(TerminalUi::default()));
        Ok(Arc::new(client))
    }
}

pub async fn run(app: App) -> Result<()> {
    let ctx = Context::load()?;
    match app.cmd {
        Commands::Login(args) => session::login(&ctx, args).await,
        Commands::Logout => session::logout(&ctx).await,
        Commands::Status => session::status(&ctx).await,
        Commands::Me => call::me(&ctx).await,
        Commands::Get(args) => call::get(&ctx, args).await,
        Commands::Post(args) => call::post(&ctx, args).await,
        Commands::Upload(args) => upload::upload(&ctx, args).await,
    }
}
