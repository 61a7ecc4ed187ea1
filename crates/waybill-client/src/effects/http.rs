use std::future::Future;

use crate::data::{HttpRequest, HttpResponse, MultipartForm};

/// Asynchronous HTTP transport.
///
/// Implementations send exactly what they are given: signing, token headers
/// and status interpretation all happen in [`ApiClient`](crate::ApiClient).
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Scripted implementations in tests
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a request and read the whole response body.
    ///
    /// Non-2xx statuses are not errors at this layer.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = std::result::Result<HttpResponse, Self::Error>> + Send;

    /// POST a multipart form to a third-party host and return the status code.
    fn send_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> impl Future<Output = std::result::Result<u16, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use reqwest::multipart::{Form, Part};
    use waybill_sign::Method;

    use super::*;

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self, reqwest::Error> { Self::with_timeout(None) }

        pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            Ok(Self {
                client: builder.build()?,
            })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };
            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
                .collect();
            let body = response.bytes().await?;

            Ok(HttpResponse { status, headers, body })
        }

        async fn send_multipart(&self, url: &str, form: MultipartForm) -> Result<u16, Self::Error> {
            let mut multipart = Form::new();
            for (key, value) in form.fields {
                multipart = multipart.text(key, value);
            }
            let file = Part::bytes(form.file)
                .file_name(form.file_name)
                .mime_str(&form.content_type)?;
            multipart = multipart.part("file", file);

            let response = self.client.post(url).multipart(multipart).send().await?;
            Ok(response.status().as_u16())
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
