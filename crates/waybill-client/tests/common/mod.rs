//! Scripted transport, navigator and UI doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use waybill_client::{
    ApiClient, ClientConfig, HttpClient, HttpRequest, HttpResponse, MultipartForm,
    SessionNavigator, UiSink,
};
use waybill_session::{ManualClock, MemoryStorage, SessionStore};

pub const SECRET: &str = "test-app-secret";
pub const BASE_URL: &str = "https://api.test.local";
pub const NOW_MS: i64 = 1_700_000_000_000;

#[derive(Debug)]
pub struct MockError(pub String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for MockError {}

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, MockError> + Send + Sync;
type MultipartResponder = dyn Fn(&str, &MultipartForm) -> Result<u16, MockError> + Send + Sync;
type Latency = dyn Fn(&HttpRequest) -> usize + Send + Sync;

/// Answers requests from closures and records everything it sees.
pub struct MockHttp {
    responder:  Box<Responder>,
    multipart:  Box<MultipartResponder>,
    latency:    Box<Latency>,
    requests:   Arc<Mutex<Vec<HttpRequest>>>,
    uploads:    Arc<Mutex<Vec<(String, MultipartForm)>>>,
}

impl MockHttp {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse, MockError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            multipart: Box::new(|_, _| Ok(204)),
            latency:   Box::new(|_| 0),
            requests:  Arc::default(),
            uploads:   Arc::default(),
        }
    }

    pub fn with_multipart(
        mut self,
        multipart: impl Fn(&str, &MultipartForm) -> Result<u16, MockError> + Send + Sync + 'static,
    ) -> Self {
        self.multipart = Box::new(multipart);
        self
    }

    /// Extra scheduler yields before answering a request.
    pub fn with_latency(mut self, latency: impl Fn(&HttpRequest) -> usize + Send + Sync + 'static) -> Self {
        self.latency = Box::new(latency);
        self
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<HttpRequest>>> { Arc::clone(&self.requests) }

    pub fn uploads(&self) -> Arc<Mutex<Vec<(String, MultipartForm)>>> { Arc::clone(&self.uploads) }
}

impl HttpClient for MockHttp {
    type Error = MockError;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, MockError> {
        // Let every concurrently issued request reach the transport first.
        tokio::task::yield_now().await;
        for _ in 0..(self.latency)(&request) {
            tokio::task::yield_now().await;
        }
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }

    async fn send_multipart(&self, url: &str, form: MultipartForm) -> Result<u16, MockError> {
        self.uploads.lock().unwrap().push((url.to_string(), form.clone()));
        (self.multipart)(url, &form)
    }
}

/// The path component of a recorded request URL.
pub fn path_of(request: &HttpRequest) -> String {
    url::Url::parse(&request.url).unwrap().path().to_string()
}

pub fn envelope(body: serde_json::Value) -> HttpResponse {
    HttpResponse::new(200, body.to_string())
}

#[derive(Default)]
pub struct MockNavigator {
    pub prompts: AtomicUsize,
    pub resets:  AtomicUsize,
}

#[async_trait]
impl SessionNavigator for MockNavigator {
    async fn acknowledge(&self, _message: &str) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        // A blocking dialog: other tasks run while the user reads it.
        tokio::task::yield_now().await;
    }

    fn reset_to_login(&self) { self.resets.fetch_add(1, Ordering::SeqCst); }
}

#[derive(Default)]
pub struct RecordingUi {
    pub visible: AtomicI64,
    pub shows:   AtomicUsize,
    pub toasts:  Mutex<Vec<String>>,
}

impl UiSink for RecordingUi {
    fn show_loading(&self) {
        self.shows.fetch_add(1, Ordering::SeqCst);
        self.visible.store(1, Ordering::SeqCst);
    }

    fn hide_loading(&self) { self.visible.store(0, Ordering::SeqCst); }

    fn toast(&self, message: &str) { self.toasts.lock().unwrap().push(message.to_string()); }
}

pub struct Harness {
    pub client:    ApiClient<MockHttp>,
    pub session:   Arc<SessionStore>,
    pub clock:     Arc<ManualClock>,
    pub navigator: Arc<MockNavigator>,
    pub ui:        Arc<RecordingUi>,
    pub requests:  Arc<Mutex<Vec<HttpRequest>>>,
    pub uploads:   Arc<Mutex<Vec<(String, MultipartForm)>>>,
}

impl Harness {
    pub fn new(http: MockHttp) -> Self {
        let clock = Arc::new(ManualClock::new(NOW_MS));
        let session = Arc::new(SessionStore::with_clock(
            Arc::new(MemoryStorage::new()),
            clock.clone(),
        ));
        let navigator = Arc::new(MockNavigator::default());
        let ui = Arc::new(RecordingUi::default());
        let requests = http.requests();
        let uploads = http.uploads();

        let client = ApiClient::new(
            http,
            ClientConfig::new(BASE_URL, SECRET),
            session.clone(),
            navigator.clone(),
        )
        .unwrap()
        .with_ui(ui.clone());

        Self {
            client,
            session,
            clock,
            navigator,
            ui,
            requests,
            uploads,
        }
    }

    /// Seed a session valid for one more hour.
    pub async fn logged_in(self, token: &str) -> Self {
        self.session.save(token, NOW_MS + 3_600_000).await;
        self
    }

    pub fn request_count(&self) -> usize { self.requests.lock().unwrap().len() }
}
