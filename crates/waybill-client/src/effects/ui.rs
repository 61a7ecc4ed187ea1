use std::sync::{Arc, Mutex};

/// The UI capabilities the client core calls into.
pub trait UiSink: Send + Sync {
    fn show_loading(&self);

    fn hide_loading(&self);

    fn toast(&self, message: &str);
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUi;

impl UiSink for NoopUi {
    fn show_loading(&self) {}

    fn hide_loading(&self) {}

    fn toast(&self, _message: &str) {}
}

/// Reference-counted blocking loading indicator.
///
/// The indicator is shown when the first holder acquires it and hidden when
/// the last holder's guard drops, so overlapping calls cannot hide it early.
pub struct LoadingIndicator {
    ui:      Arc<dyn UiSink>,
    holders: Mutex<usize>,
}

impl LoadingIndicator {
    pub fn new(ui: Arc<dyn UiSink>) -> Arc<Self> {
        Arc::new(Self {
            ui,
            holders: Mutex::new(0),
        })
    }

    pub fn acquire(self: &Arc<Self>) -> LoadingGuard {
        let mut holders = self.holders.lock().unwrap_or_else(|p| p.into_inner());
        if *holders == 0 {
            self.ui.show_loading();
        }
        *holders += 1;
        LoadingGuard {
            indicator: Arc::clone(self),
        }
    }

    pub fn holders(&self) -> usize { *self.holders.lock().unwrap_or_else(|p| p.into_inner()) }

    fn release(&self) {
        let mut holders = self.holders.lock().unwrap_or_else(|p| p.into_inner());
        *holders = holders.saturating_sub(1);
        if *holders == 0 {
            self.ui.hide_loading();
        }
    }
}

/// Hides the indicator on drop, including on error and cancellation paths.
#[must_use = "the loading indicator is hidden as soon as the guard drops"]
pub struct LoadingGuard {
    indicator: Arc<LoadingIndicator>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) { self.indicator.release(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingUi {
        shows: AtomicUsize,
        hides: AtomicUsize,
    }

    impl UiSink for CountingUi {
        fn show_loading(&self) { self.shows.fetch_add(1, Ordering::SeqCst); }

        fn hide_loading(&self) { self.hides.fetch_add(1, Ordering::SeqCst); }

        fn toast(&self, _message: &str) {}
    }

    #[test]
    fn test_overlapping_guards_hide_once() {
        let ui = Arc::new(CountingUi::default());
        let indicator = LoadingIndicator::new(ui.clone());

        let first = indicator.acquire();
        let second = indicator.acquire();
        assert_eq!(indicator.holders(), 2);

        drop(first);
        assert_eq!(ui.hides.load(Ordering::SeqCst), 0);
        drop(second);

        assert_eq!(ui.shows.load(Ordering::SeqCst), 1);
        assert_eq!(ui.hides.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_released_on_panic_unwind() {
        let ui = Arc::new(CountingUi::default());
        let indicator = LoadingIndicator::new(ui.clone());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = indicator.acquire();
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(indicator.holders(), 0);
        assert_eq!(ui.hides.load(Ordering::SeqCst), 1);
    }
}
