//! Immutable data types for API calls and uploads.
//!
//! Configuration, the response envelope, per-call options, the raw HTTP
//! request/response shapes exchanged with an [`HttpClient`](crate::HttpClient),
//! and the upload chain's state types.

pub mod config;
pub mod envelope;
pub mod http;
pub mod options;
pub mod upload;

pub use config::ClientConfig;
pub use envelope::ApiEnvelope;
pub use http::{HttpRequest, HttpResponse, MultipartForm};
pub use options::CallOptions;
pub use upload::{UploadPhase, UploadPolicy, UploadSession, UploadedObject};
