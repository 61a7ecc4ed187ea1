//! Signed, session-aware API client for the waybill driver backend.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Configuration, envelopes and upload types
//! - [`core`] - Pure request/response transformations
//! - [`effects`] - Network calls, session expiry, uploads behind trait seams
//!
//! # Key Features
//!
//! - **Signed Requests**: Every call carries an HMAC-SHA256 `x-signature`
//! - **Token Rotation**: `new-token`/`new-expires-at` response headers are persisted
//! - **Single-Shot Expiry**: Concurrent 401s produce exactly one logout prompt
//! - **Upload Chain**: Policy fetch, direct multipart upload, URL resolution
//! - **Injected UI**: Loading indicator, toasts and navigation are traits, not globals

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use data::{
    ApiEnvelope, CallOptions, ClientConfig, HttpRequest, HttpResponse, MultipartForm,
    UploadPhase, UploadPolicy, UploadSession, UploadedObject,
};
pub use effects::{
    ApiClient, ExpiryHandler, HttpClient, LoadingGuard, LoadingIndicator, NoopUi,
    SessionNavigator, UiSink, Uploader,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{ApiError, Result, UploadError};
pub use waybill_sign::{Method, Params};
