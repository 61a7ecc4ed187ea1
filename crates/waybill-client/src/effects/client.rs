use std::sync::Arc;

use serde::Deserialize;
use waybill_session::SessionStore;
use waybill_sign::{Method, Params, Signer, canonical_body, strip_nulls};

use crate::core::{StatusClass, classify_status, request_url, server_message, token_rotation};
use crate::data::{ApiEnvelope, CallOptions, ClientConfig, HttpRequest, HttpResponse};
use crate::effects::expiry::{ExpiryHandler, SessionNavigator};
use crate::effects::http::HttpClient;
use crate::effects::ui::{LoadingIndicator, NoopUi, UiSink};
use crate::error::{ApiError, Result};

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const TOKEN_HEADER: &str = "x-token";
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Session fields in a successful login envelope's `data`.
#[derive(Debug, Deserialize)]
struct LoginGrant {
    token:      String,
    #[serde(rename = "expiresAt")]
    expires_at: i64,
}

/// The signed, session-aware API client.
///
/// One instance is shared by every caller; it holds no per-call state.
pub struct ApiClient<C: HttpClient> {
    http:    C,
    config:  ClientConfig,
    signer:  Signer,
    session: Arc<SessionStore>,
    expiry:  Arc<ExpiryHandler>,
    ui:      Arc<dyn UiSink>,
    loading: Arc<LoadingIndicator>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(
        http: C,
        config: ClientConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn SessionNavigator>,
    ) -> Result<Self> {
        let signer = Signer::new(&config.app_secret)?;
        // Fail on a bad base URL now rather than on the first call.
        request_url(&config.base_url, "/", Method::Get, &Params::new())?;

        let ui: Arc<dyn UiSink> = Arc::new(NoopUi);
        Ok(Self {
            http,
            signer,
            expiry: Arc::new(ExpiryHandler::new(Arc::clone(&session), navigator)),
            session,
            loading: LoadingIndicator::new(Arc::clone(&ui)),
            ui,
            config,
        })
    }

    pub fn with_ui(mut self, ui: Arc<dyn UiSink>) -> Self {
        self.loading = LoadingIndicator::new(Arc::clone(&ui));
        self.ui = ui;
        self
    }

    pub fn config(&self) -> &ClientConfig { &self.config }

    pub fn session(&self) -> &Arc<SessionStore> { &self.session }

    pub fn expiry(&self) -> &Arc<ExpiryHandler> { &self.expiry }

    pub fn ui(&self) -> &Arc<dyn UiSink> { &self.ui }

    pub(crate) fn http(&self) -> &C { &self.http }

    pub async fn get(&self, path: &str, params: Params) -> Result<ApiEnvelope> {
        self.call(Method::Get, path, params, CallOptions::default()).await
    }

    pub async fn post(&self, path: &str, params: Params) -> Result<ApiEnvelope> {
        self.call(Method::Post, path, params, CallOptions::default()).await
    }

    /// Perform one signed call and return the parsed envelope.
    ///
    /// A nonzero envelope `code` is returned as `Ok`; use
    /// [`ApiEnvelope::into_result`] to treat it as a failure.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: Params,
        options: CallOptions,
    ) -> Result<ApiEnvelope> {
        let result = self.dispatch(method, path, params, options).await;
        if options.toast_errors
            && let Err(ref e) = result
        {
            self.ui.toast(&e.user_message());
        }
        result
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        params: Params,
        options: CallOptions,
    ) -> Result<ApiEnvelope> {
        if !self.config.is_public(path) && self.session.is_expired().await {
            tracing::info!(%method, path, "session expired before request");
            self.expiry.expire(ApiError::session_expired_message()).await;
            return Err(ApiError::SessionExpired);
        }

        // GET drops nulls; POST sends the object as given.
        let params = match method {
            Method::Get => strip_nulls(&params),
            Method::Post => params,
        };

        let url = request_url(&self.config.base_url, path, method, &params)?;
        let signature = self.signer.sign(method, path, &params);
        let token = self.session.token().await.unwrap_or_default();
        let generation = self.session.generation();

        let request = HttpRequest {
            method,
            url: url.into(),
            headers: vec![
                (CONTENT_TYPE_HEADER.to_string(), "application/json".to_string()),
                (TOKEN_HEADER.to_string(), token),
                (SIGNATURE_HEADER.to_string(), signature),
            ],
            body: match method {
                Method::Get => None,
                Method::Post => Some(canonical_body(&params).into_bytes()),
            },
        };

        let response = {
            let _loading = options.loading.then(|| self.loading.acquire());
            self.http
                .send(request)
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?
        };

        tracing::debug!(%method, path, status = response.status, "api response");
        self.interpret(response, generation).await
    }

    async fn interpret(&self, response: HttpResponse, generation: u64) -> Result<ApiEnvelope> {
        match classify_status(response.status) {
            StatusClass::Ok => {
                if let Some(rotation) = token_rotation(&response) {
                    self.session
                        .rotate(&rotation.token, rotation.expires_at_ms, generation)
                        .await;
                }
                Ok(serde_json::from_slice(&response.body)?)
            }
            StatusClass::Unauthorized => {
                self.expiry.expire(ApiError::session_expired_message()).await;
                Err(ApiError::SessionExpired)
            }
            StatusClass::BadRequest => Err(ApiError::ClientRequest(server_message(&response.body))),
            StatusClass::ServerError => Err(ApiError::Server),
            StatusClass::Other(status) => Err(ApiError::UnexpectedStatus(status)),
        }
    }

    /// Log in and persist the issued session.
    ///
    /// The session comes from `data.token`/`data.expiresAt`, or from rotation
    /// headers on the login response. A successful login re-arms the expiry
    /// latch.
    pub async fn login(&self, params: Params) -> Result<ApiEnvelope> {
        let options = CallOptions::default().loading(true);
        let envelope = self
            .call(Method::Post, &self.config.login_path, params, options)
            .await?
            .into_result()?;

        if let Ok(grant) = envelope.data_as::<LoginGrant>() {
            self.session.try_save(&grant.token, grant.expires_at).await?;
        }
        if self.session.token().await.is_none() || self.session.is_expired().await {
            return Err(ApiError::MissingSession);
        }

        self.expiry.rearm();
        tracing::info!("logged in");
        Ok(envelope)
    }

    /// Tell the backend (best effort) and drop the local session.
    pub async fn logout(&self) -> Result<()> {
        if !self.session.is_expired().await
            && let Err(e) = self.post(&self.config.logout_path, Params::new()).await
        {
            tracing::warn!(error = %e, "logout request failed, clearing session anyway");
        }
        self.session.try_clear().await?;
        Ok(())
    }
}
