use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use waybill_client::{SessionNavigator, UiSink, UploadPhase};

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const SPINNER_STYLE: &str = "{spinner:.blue} {msg}";

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Some(style) = SPINNER_TEMPLATE.as_ref() {
        pb.set_style(style.clone());
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Loading spinner and toasts on stderr.
#[derive(Default)]
pub struct TerminalUi {
    spinner: Mutex<Option<ProgressBar>>,
}

impl UiSink for TerminalUi {
    fn show_loading(&self) {
        let mut slot = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        if slot.is_none() {
            *slot = Some(spinner("Loading..."));
        }
    }

    fn hide_loading(&self) {
        let mut slot = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(pb) = slot.take() {
            pb.finish_and_clear();
        }
    }

    fn toast(&self, message: &str) { eprintln!("{} {message}", style("!").yellow().bold()); }
}

/// Stands in for the login screen: prints the expiry notice and where to go next.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

#[async_trait]
impl SessionNavigator for TerminalNavigator {
    async fn acknowledge(&self, message: &str) { eprintln!("{} {message}", style("✗").red().bold()); }

    fn reset_to_login(&self) {
        eprintln!("Run {} to sign in again.", style("waybill login").cyan());
    }
}

/// Spinner that follows an upload through its phases.
pub struct UploadTracker {
    pb: ProgressBar,
}

impl UploadTracker {
    pub fn new() -> Self { Self { pb: spinner("Requesting upload policy") } }

    pub fn phase(&self, phase: UploadPhase) {
        match phase {
            UploadPhase::RequestingPolicy => self.pb.set_message("Requesting upload policy"),
            UploadPhase::Uploading => self.pb.set_message("Uploading"),
            UploadPhase::ResolvingUrl => self.pb.set_message("Resolving URL"),
            UploadPhase::Done | UploadPhase::Failed => self.pb.finish_and_clear(),
        }
    }
}
