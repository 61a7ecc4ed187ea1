use bytes::Bytes;
use waybill_sign::Method;

/// A fully built request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method:  Method,
    pub url:     String,
    pub headers: Vec<(String, String)>,
    pub body:    Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status:  u16,
    pub headers: Vec<(String, String)>,
    pub body:    Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A multipart form for a direct object store upload.
///
/// Text fields are sent in order, followed by the `file` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields:       Vec<(String, String)>,
    pub file_name:    String,
    pub content_type: String,
    pub file:         Vec<u8>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_header_case_insensitive() {
        let r = HttpResponse::new(200, "{}").with_header("New-Token", "abc");
        assert_eq!(r.header("new-token"), Some("abc"));
        assert_eq!(r.header("new-expires-at"), None);
    }
}
