//! I/O and effectful operations.
//!
//! Network calls go through [`HttpClient`]; UI and navigation go through
//! [`UiSink`] and [`SessionNavigator`]. Everything global in a mobile client
//! (loading overlay, navigation stack) is an injected dependency here.

mod client;
mod expiry;
mod http;
mod ui;
mod upload;

pub use client::ApiClient;
pub use expiry::{ExpiryHandler, SessionNavigator};
pub use http::HttpClient;
pub use ui::{LoadingGuard, LoadingIndicator, NoopUi, UiSink};
pub use upload::{PhaseCallback, Uploader};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
