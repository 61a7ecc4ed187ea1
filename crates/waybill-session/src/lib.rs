//! Persisted session state for the waybill driver API client.
//!
//! A session is an access token plus the absolute wall-clock instant (epoch
//! milliseconds) at which it stops being valid. It is stored as two string
//! values under fixed keys and cleared wholesale on logout or expiry.
//!
//! # Architecture
//!
//! - [`SessionStorage`] - async key/value persistence ([`MemoryStorage`], [`FileStorage`])
//! - [`Clock`] - wall-clock source ([`SystemClock`], [`ManualClock`])
//! - [`SessionStore`] - token/expiry operations with serialized mutation
//!
//! Read operations never fail: storage errors are logged and read as "no
//! session", so callers degrade to unauthenticated behavior.

pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::error::{Result, StorageError};
pub use self::storage::{FileStorage, MemoryStorage, SessionStorage};
pub use self::store::{EXPIRES_AT_KEY, Session, SessionStore, TOKEN_KEY, is_expired_at};

mod clock;
mod error;
mod storage;
mod store;
