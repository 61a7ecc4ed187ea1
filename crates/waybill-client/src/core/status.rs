use serde::Deserialize;

/// How the client reacts to an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200: parse the envelope.
    Ok,
    /// 401: the session is gone.
    Unauthorized,
    /// 400: the server explains why in `msg`.
    BadRequest,
    /// 500.
    ServerError,
    /// Anything else.
    Other(u16),
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200 => StatusClass::Ok,
        401 => StatusClass::Unauthorized,
        400 => StatusClass::BadRequest,
        500 => StatusClass::ServerError,
        other => StatusClass::Other(other),
    }
}

#[derive(Deserialize)]
struct MessageBody {
    msg: Option<String>,
}

/// Extract the server-supplied message from a 400 body.
///
/// A JSON body yields its `msg` field, or an empty string when `msg` is
/// missing or null. Any other body yields its trimmed text.
pub fn server_message(body: &[u8]) -> String {
    match serde_json::from_slice::<MessageBody>(body) {
        Ok(MessageBody { msg }) => msg.unwrap_or_default(),
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), StatusClass::Ok);
        assert_eq!(classify_status(401), StatusClass::Unauthorized);
        assert_eq!(classify_status(400), StatusClass::BadRequest);
        assert_eq!(classify_status(500), StatusClass::ServerError);
        assert_eq!(classify_status(204), StatusClass::Other(204));
        assert_eq!(classify_status(403), StatusClass::Other(403));
        assert_eq!(classify_status(502), StatusClass::Other(502));
    }

    #[test]
    fn test_server_message_json() {
        assert_eq!(server_message(br#"{"msg":"id card expired"}"#), "id card expired");
    }

    #[test]
    fn test_server_message_null_msg_is_empty() {
        assert_eq!(server_message(br#"{"msg":null}"#), "");
        assert_eq!(server_message(br#"{"code":400}"#), "");
    }

    #[test]
    fn test_server_message_plain_text() {
        assert_eq!(server_message(b"  bad phone number \n"), "bad phone number");
        assert_eq!(server_message(b""), "");
    }
}
