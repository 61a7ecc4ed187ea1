use std::fmt;

use serde::{Deserialize, Serialize};

/// Phases of one upload chain.
///
/// `RequestingPolicy → Uploading → ResolvingUrl → Done`; `Failed` is
/// reachable from every non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    /// Fetching upload credentials from the API.
    #[default]
    RequestingPolicy,

    /// Posting the multipart form straight to the object store.
    Uploading,

    /// Exchanging the stored object key for a retrievable URL.
    ResolvingUrl,

    Done,

    Failed,
}

impl UploadPhase {
    pub fn is_terminal(&self) -> bool { matches!(self, UploadPhase::Done | UploadPhase::Failed) }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadPhase::RequestingPolicy => write!(f, "RequestingPolicy"),
            UploadPhase::Uploading => write!(f, "Uploading"),
            UploadPhase::ResolvingUrl => write!(f, "ResolvingUrl"),
            UploadPhase::Done => write!(f, "Done"),
            UploadPhase::Failed => write!(f, "Failed"),
        }
    }
}

/// Direct-upload credentials returned in the policy endpoint's `data`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Object store URL the multipart form is posted to.
    pub host:          String,
    /// Object key the file will be stored under.
    pub key:           String,
    /// Base64 policy document.
    pub policy:        String,
    #[serde(rename = "accessKeyId", alias = "AccessKeyId")]
    pub access_key_id: String,
    pub signature:     String,
}

impl fmt::Debug for UploadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadPolicy")
            .field("host", &self.host)
            .field("key", &self.key)
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

impl UploadPolicy {
    /// Form fields in the order the object store expects them, before `file`.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("key".to_string(), self.key.clone()),
            ("policy".to_string(), self.policy.clone()),
            ("AccessKeyId".to_string(), self.access_key_id.clone()),
            ("signature".to_string(), self.signature.clone()),
        ]
    }
}

/// The resolve endpoint answers with either a bare URL or `{ "url": ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResolvedUrl {
    Bare(String),
    Wrapped { url: String },
}

impl ResolvedUrl {
    pub(crate) fn into_url(self) -> String {
        match self {
            ResolvedUrl::Bare(url) | ResolvedUrl::Wrapped { url } => url,
        }
    }
}

/// Chain state owned by a single upload call.
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    pub phase:             UploadPhase,
    pub content_type_hint: String,
    pub policy:            Option<UploadPolicy>,
    pub object_key:        Option<String>,
    pub resolved_url:      Option<String>,
}

impl UploadSession {
    pub fn new(content_type_hint: impl Into<String>) -> Self {
        Self {
            content_type_hint: content_type_hint.into(),
            ..Self::default()
        }
    }
}

/// Result of a completed upload chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedObject {
    /// Raw key, for persistence in application records.
    pub object_key:   String,
    /// Retrievable URL, for display.
    pub resolved_url: String,
}
