/// Per-call behavior switches.
///
/// # Examples
///
/// ```
/// use waybill_client::CallOptions;
///
/// let options = CallOptions::default().loading(true).toast_errors(true);
/// assert!(options.loading);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Hold the global blocking loading indicator for the network call.
    pub loading:      bool,
    /// Toast the user-facing error message before returning an error.
    pub toast_errors: bool,
}

impl CallOptions {
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn toast_errors(mut self, toast_errors: bool) -> Self {
        self.toast_errors = toast_errors;
        self
    }
}
