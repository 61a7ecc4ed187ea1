use crate::data::HttpResponse;

pub const NEW_TOKEN_HEADER: &str = "new-token";
pub const NEW_EXPIRES_AT_HEADER: &str = "new-expires-at";

/// A refreshed session issued by the server in response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRotation {
    pub token:         String,
    pub expires_at_ms: i64,
}

/// Read the rotation headers. Both must be present and the expiry must be an
/// integer; a partial or malformed pair is ignored.
pub fn token_rotation(response: &HttpResponse) -> Option<TokenRotation> {
    let token = response.header(NEW_TOKEN_HEADER);
    let expires = response.header(NEW_EXPIRES_AT_HEADER);

    match (token, expires) {
        (None, None) => None,
        (Some(token), Some(expires)) if !token.is_empty() => match expires.trim().parse() {
            Ok(expires_at_ms) => Some(TokenRotation {
                token: token.to_string(),
                expires_at_ms,
            }),
            Err(_) => {
                tracing::warn!(value = expires, "ignoring non-numeric new-expires-at header");
                None
            }
        },
        _ => {
            tracing::warn!("ignoring incomplete token rotation headers");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_present() {
        let r = HttpResponse::new(200, "{}")
            .with_header("new-token", "abc")
            .with_header("new-expires-at", "999999");
        assert_eq!(
            token_rotation(&r),
            Some(TokenRotation { token: "abc".into(), expires_at_ms: 999_999 })
        );
    }

    #[test]
    fn test_rotation_requires_both_headers() {
        let only_token = HttpResponse::new(200, "{}").with_header("new-token", "abc");
        assert_eq!(token_rotation(&only_token), None);

        let only_expiry = HttpResponse::new(200, "{}").with_header("new-expires-at", "1");
        assert_eq!(token_rotation(&only_expiry), None);
    }

    #[test]
    fn test_rotation_rejects_bad_expiry() {
        let r = HttpResponse::new(200, "{}")
            .with_header("new-token", "abc")
            .with_header("new-expires-at", "tomorrow");
        assert_eq!(token_rotation(&r), None);
    }
}
