use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use waybill_client::Params;

use crate::cli::parse::{Param, into_params};

#[derive(Clone, Debug, Parser)]
#[command(name = "waybill", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(name = "login", about = "Sign in and store the session")]
    Login(ParamArgs),
    #[command(name = "logout", about = "Sign out and drop the stored session")]
    Logout,
    #[command(alias = "st", name = "status", about = "Show the stored session")]
    Status,
    #[command(name = "me", about = "Fetch the signed-in driver's profile")]
    Me,

    // Raw calls
    #[command(name = "get", about = "Signed GET against the API")]
    Get(CallArgs),
    #[command(name = "post", about = "Signed POST against the API")]
    Post(CallArgs),

    #[command(alias = "up", name = "upload", about = "Upload a file to object storage")]
    Upload(UploadArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ParamArgs {
    /// Request parameter as `key=value`; JSON values are parsed, anything else is a string.
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
    pub params: Vec<Param>,
}

impl ParamArgs {
    pub fn into_params(self) -> Params { into_params(self.params) }
}

#[derive(Args, Clone, Debug)]
pub struct CallArgs {
    /// Path under the base URL, e.g. `/app_driver/waybill/list`.
    pub path: String,
    #[command(flatten)]
    pub params: ParamArgs,
}

#[derive(Args, Clone, Debug)]
pub struct UploadArgs {
    pub file: PathBuf,
}
