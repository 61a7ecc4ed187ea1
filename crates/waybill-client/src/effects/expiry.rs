use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use waybill_session::SessionStore;

/// Navigation capabilities needed when the session ends.
#[async_trait]
pub trait SessionNavigator: Send + Sync {
    /// Show a blocking prompt and return once the user has acknowledged it.
    async fn acknowledge(&self, message: &str);

    /// Reset the navigation stack to the authentication screen.
    fn reset_to_login(&self);
}

/// Clears the session on every expiry and sends the user back to login once
/// per session.
///
/// Each persisted session gets its own episode: the first [`expire`](Self::expire)
/// for it prompts and resets navigation, later calls only clear. Saving or
/// rotating in a new session opens the next episode, as does
/// [`rearm`](Self::rearm).
pub struct ExpiryHandler {
    session:   Arc<SessionStore>,
    navigator: Arc<dyn SessionNavigator>,
    /// `issued + 1` of the session whose episode was handled; 0 when none.
    handled:   AtomicU64,
}

impl ExpiryHandler {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn SessionNavigator>) -> Self {
        Self {
            session,
            navigator,
            handled: AtomicU64::new(0),
        }
    }

    /// Returns `true` if this call opened the episode, `false` if it had
    /// already been handled. The session is cleared either way.
    pub async fn expire(&self, message: &str) -> bool {
        let episode = self.session.issued() + 1;
        self.session.clear().await;

        if self.handled.swap(episode, Ordering::SeqCst) == episode {
            tracing::debug!("session expiry already being handled");
            return false;
        }

        tracing::info!("session expired, returning to login");
        let navigator = Arc::clone(&self.navigator);
        let message = message.to_string();
        // Detached: dropping the caller must not leave the prompt without its reset.
        let prompt = tokio::spawn(async move {
            navigator.acknowledge(&message).await;
            navigator.reset_to_login();
        });
        if let Err(e) = prompt.await {
            tracing::warn!(error = %e, "session expiry prompt did not complete");
        }
        true
    }

    pub fn rearm(&self) { self.handled.store(0, Ordering::SeqCst); }

    /// Whether the current session's episode has been handled.
    pub fn is_fired(&self) -> bool {
        self.handled.load(Ordering::SeqCst) == self.session.issued() + 1
    }
}
