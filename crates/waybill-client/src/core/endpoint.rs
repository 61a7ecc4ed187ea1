use std::collections::BTreeMap;

use url::Url;
use waybill_sign::{Method, Params, render_value};

use crate::{ApiError, Result};

/// Build the wire URL for a call.
///
/// `path` is appended to `base_url` verbatim, so a base with a path prefix
/// keeps it. GET parameters are appended as a query string, sorted by key,
/// nulls dropped, values URL-encoded. POST parameters travel in the body.
pub fn request_url(base_url: &str, path: &str, method: Method, params: &Params) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))?;

    if method == Method::Get {
        let sorted: BTreeMap<&str, String> = params
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.as_str(), render_value(v)))
            .collect();
        if !sorted.is_empty() {
            url.query_pairs_mut().extend_pairs(sorted);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, serde_json::Value)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_get_query_sorted_and_encoded() {
        let p = params(&[("b", json!("x y")), ("a", json!(1)), ("skip", json!(null))]);
        let url = request_url("https://api.example.com", "/app_driver/waybill/list", Method::Get, &p)
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/app_driver/waybill/list?a=1&b=x+y");
    }

    #[test]
    fn test_get_without_params_has_no_query() {
        let url = request_url("https://api.example.com/", "/app_driver/user/getUserInfo", Method::Get, &Params::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/app_driver/user/getUserInfo");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_base_path_prefix_kept() {
        let url = request_url("https://gw.example.com/api", "/app_driver/x", Method::Post, &params(&[("a", json!(1))]))
            .unwrap();
        assert_eq!(url.as_str(), "https://gw.example.com/api/app_driver/x");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            request_url("not a url", "/x", Method::Get, &Params::new()),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
