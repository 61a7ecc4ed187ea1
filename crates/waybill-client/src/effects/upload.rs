use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use waybill_sign::Params;

use crate::core::{content_type_for, file_extension};
use crate::data::upload::ResolvedUrl;
use crate::data::{MultipartForm, UploadPhase, UploadPolicy, UploadSession, UploadedObject};
use crate::effects::client::ApiClient;
use crate::effects::http::HttpClient;
use crate::error::UploadError;

/// Invoked on every upload phase transition, including `Failed`.
pub type PhaseCallback = Arc<dyn Fn(UploadPhase) + Send + Sync>;

/// Runs the policy → multipart upload → URL resolution chain.
///
/// Each call owns its own [`UploadSession`]; concurrent uploads share nothing
/// but the API client. A failure after the object was stored leaves the
/// object in place.
pub struct Uploader<C: HttpClient> {
    api:         Arc<ApiClient<C>>,
    on_progress: Option<PhaseCallback>,
}

impl<C: HttpClient> Uploader<C> {
    pub fn new(api: Arc<ApiClient<C>>) -> Self {
        Self {
            api,
            on_progress: None,
        }
    }

    #[must_use]
    pub fn on_progress(mut self, callback: PhaseCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Read `file` from disk and upload it.
    pub async fn upload(&self, file: &Path) -> Result<UploadedObject, UploadError> {
        let bytes = tokio::fs::read(file).await.map_err(|source| UploadError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.upload_bytes(&file_name, bytes).await
    }

    pub async fn upload_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedObject, UploadError> {
        let extension = file_extension(file_name);
        let mut session = UploadSession::new(content_type_for(extension.as_deref()));

        match self.run(&mut session, extension, file_name, bytes).await {
            Ok(uploaded) => {
                self.advance(&mut session, UploadPhase::Done);
                tracing::info!(key = %uploaded.object_key, "upload complete");
                Ok(uploaded)
            }
            Err(e) => {
                tracing::warn!(phase = %session.phase, error = %e, "upload failed");
                self.advance(&mut session, UploadPhase::Failed);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        session: &mut UploadSession,
        extension: Option<String>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedObject, UploadError> {
        self.advance(session, UploadPhase::RequestingPolicy);
        let policy = self.request_policy(extension).await?;
        session.object_key = Some(policy.key.clone());
        session.policy = Some(policy.clone());

        self.advance(session, UploadPhase::Uploading);
        let form = MultipartForm {
            fields:       policy.form_fields(),
            file_name:    file_name.to_string(),
            content_type: session.content_type_hint.clone(),
            file:         bytes,
        };
        self.transfer(&policy.host, form).await?;

        self.advance(session, UploadPhase::ResolvingUrl);
        let resolved_url = self.resolve_url(&policy.key).await?;
        session.resolved_url = Some(resolved_url.clone());

        Ok(UploadedObject {
            object_key: policy.key,
            resolved_url,
        })
    }

    async fn request_policy(&self, extension: Option<String>) -> Result<UploadPolicy, UploadError> {
        let mut params = Params::new();
        params.insert("suffix".to_string(), extension.map_or(Value::Null, Value::String));

        let envelope = self
            .api
            .get(&self.api.config().policy_path, params)
            .await
            .and_then(|env| env.into_result())
            .map_err(UploadError::Config)?;
        envelope.data_as().map_err(UploadError::Config)
    }

    async fn transfer(&self, host: &str, form: MultipartForm) -> Result<(), UploadError> {
        let status = self
            .api
            .http()
            .send_multipart(host, form)
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        match status {
            200 | 204 => Ok(()),
            other => Err(UploadError::Transport(format!("object store answered {other}"))),
        }
    }

    async fn resolve_url(&self, key: &str) -> Result<String, UploadError> {
        let mut params = Params::new();
        params.insert("key".to_string(), Value::String(key.to_string()));

        let envelope = self
            .api
            .get(&self.api.config().resolve_path, params)
            .await
            .and_then(|env| env.into_result())
            .map_err(UploadError::Resolve)?;
        envelope
            .data_as::<ResolvedUrl>()
            .map(ResolvedUrl::into_url)
            .map_err(UploadError::Resolve)
    }

    fn advance(&self, session: &mut UploadSession, phase: UploadPhase) {
        session.phase = phase;
        if let Some(ref callback) = self.on_progress {
            callback(phase);
        }
    }
}
