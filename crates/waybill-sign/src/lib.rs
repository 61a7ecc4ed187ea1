//! Deterministic request signing for the waybill driver API.
//!
//! Every API request carries an `x-signature` header: the lowercase hex
//! HMAC-SHA256 of a canonical string built from the request parameters and
//! the request path, keyed with the shared application secret.
//!
//! # Canonical Forms
//!
//! - **GET**: null parameters are dropped, keys are sorted, pairs are joined
//!   as `key=value&...`, then `@` and the path are appended.
//! - **POST**: the full parameter object is serialized as compact JSON in
//!   insertion order (nulls included), then `@` and the path are appended.
//!
//! The two forms are intentionally asymmetric: the backend verifies exactly
//! these strings, so POST signatures depend on key insertion order.
//!
//! # Example
//!
//! ```
//! use waybill_sign::{Method, Params, Signer};
//!
//! let signer = Signer::new("app-secret").unwrap();
//! let mut params = Params::new();
//! params.insert("page".into(), 1.into());
//!
//! let sig = signer.sign(Method::Get, "/app_driver/waybill/list", &params);
//! assert_eq!(sig.len(), 64);
//! assert!(signer.verify(Method::Get, "/app_driver/waybill/list", &params, &sig));
//! ```

pub use self::canonical::{
    Params, canonical_body, canonical_query, render_value, string_to_sign, strip_nulls,
};
pub use self::error::{Result, SignError};
pub use self::method::Method;
pub use self::signer::{Signer, hmac_sha256_hex};

mod canonical;
mod error;
mod method;
mod signer;
