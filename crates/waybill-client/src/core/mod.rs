//! Pure transformations for building requests and reading responses.
//!
//! Nothing here performs I/O; the effects layer composes these functions.

mod content_type;
mod endpoint;
mod rotation;
mod status;

pub use content_type::{content_type_for, file_extension};
pub use endpoint::request_url;
pub use rotation::{NEW_EXPIRES_AT_HEADER, NEW_TOKEN_HEADER, TokenRotation, token_rotation};
pub use status::{StatusClass, classify_status, server_message};
