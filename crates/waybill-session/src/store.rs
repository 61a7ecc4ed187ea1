use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::{Clock, Result, SessionStorage, SystemClock};

pub const TOKEN_KEY: &str = "access_token";
pub const EXPIRES_AT_KEY: &str = "expires_at";

/// A point-in-time view of the persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token:  Option<String>,
    pub expires_at_ms: Option<i64>,
}

impl Session {
    pub fn is_expired_at(&self, now_ms: i64) -> bool { is_expired_at(self.expires_at_ms, now_ms) }
}

/// A session is valid only while `expiry > now`; unset or zero means expired.
pub fn is_expired_at(expires_at_ms: Option<i64>, now_ms: i64) -> bool {
    match expires_at_ms {
        Some(expiry) if expiry > 0 => now_ms >= expiry,
        _ => true,
    }
}

/// Token and expiry operations over a [`SessionStorage`].
///
/// Mutations (`save`, `clear`, `rotate`) are serialized. Each clear bumps a
/// generation counter so that a token rotation observed by a request issued
/// before the clear is discarded instead of resurrecting the session. Each
/// persisted session bumps an issue counter, which lets observers tell one
/// session from the next.
pub struct SessionStore {
    storage:    Arc<dyn SessionStorage>,
    clock:      Arc<dyn Clock>,
    write_lock: Mutex<()>,
    generation: AtomicU64,
    issued:     AtomicU64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn SessionStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            write_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            issued:     AtomicU64::new(0),
        }
    }

    pub fn now_ms(&self) -> i64 { self.clock.now_ms() }

    /// The current access token, if any. Empty strings read as absent.
    pub async fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await.filter(|t| !t.is_empty())
    }

    /// The stored absolute expiry, if present and parseable.
    pub async fn expiry(&self) -> Option<i64> {
        self.read(EXPIRES_AT_KEY)
            .await
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    pub async fn is_expired(&self) -> bool { is_expired_at(self.expiry().await, self.now_ms()) }

    pub async fn snapshot(&self) -> Session {
        Session {
            access_token:  self.token().await,
            expires_at_ms: self.expiry().await,
        }
    }

    /// Persist a new session. Storage failures are logged, not returned.
    pub async fn save(&self, token: &str, expires_at_ms: i64) {
        if let Err(e) = self.try_save(token, expires_at_ms).await {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }

    pub async fn try_save(&self, token: &str, expires_at_ms: i64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(token, expires_at_ms).await
    }

    /// Persist a server-rotated token unless the session was cleared after
    /// `observed_generation` was read. Returns whether the rotation was applied.
    pub async fn rotate(&self, token: &str, expires_at_ms: i64, observed_generation: u64) -> bool {
        let _guard = self.write_lock.lock().await;
        if self.generation() != observed_generation {
            tracing::debug!("dropping token rotation from a request issued before session clear");
            return false;
        }
        match self.write(token, expires_at_ms).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist rotated token");
                false
            }
        }
    }

    /// Remove every persisted session value. Storage failures are logged.
    pub async fn clear(&self) {
        if let Err(e) = self.try_clear().await {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    pub async fn try_clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.storage.remove_many(&[TOKEN_KEY, EXPIRES_AT_KEY]).await
    }

    /// Incremented on every clear.
    pub fn generation(&self) -> u64 { self.generation.load(Ordering::SeqCst) }

    /// Incremented on every successful save or rotation.
    pub fn issued(&self) -> u64 { self.issued.load(Ordering::SeqCst) }

    async fn write(&self, token: &str, expires_at_ms: i64) -> Result<()> {
        let expiry = expires_at_ms.to_string();
        self.storage
            .set_many(&[(TOKEN_KEY, token), (EXPIRES_AT_KEY, expiry.as_str())])
            .await?;
        self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "session storage unreadable, treating as empty");
                None
            }
        }
    }
}
