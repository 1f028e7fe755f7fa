//! Production fetch capability backed by `reqwest`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::sync::Mutex;

use super::http::{HttpClient, RawResponse};
use crate::data::body::{BODY_USED_MESSAGE, decode_json, decode_text};
use crate::data::{
    AbortSignal, Blob, ClientConfig, FormData, Headers, RedirectMode, Request, RequestInit,
    ResponseType,
};
use crate::error::{AbortError, BoxError, TypeError};

/// HTTP client using `reqwest`.
///
/// Transport failures reject with a [`TypeError`], cancellation through the
/// request's signal with an [`AbortError`]. HTTP error statuses resolve
/// normally with `ok() == false`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    follow: reqwest::Client,
    manual: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self, TypeError> { Self::with_config(&ClientConfig::default()) }

    pub fn with_config(config: &ClientConfig) -> Result<Self, TypeError> {
        let follow = builder(config)
            .build()
            .map_err(|e| TypeError::with_source("failed to build HTTP client", e))?;
        let manual = builder(config)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TypeError::with_source("failed to build HTTP client", e))?;
        Ok(Self { follow, manual })
    }
}

fn builder(config: &ClientConfig) -> reqwest::ClientBuilder {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn fetch(
        &self,
        request: Request,
        init: RequestInit,
    ) -> Result<Box<dyn RawResponse>, BoxError> {
        let signal = init.signal.clone();
        if let Some(signal) = signal.as_ref().filter(|s| s.is_aborted()) {
            return Err(signal.to_error().into());
        }

        let request = request.with_init(&init);
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TypeError::with_source(format!("invalid method `{}`", request.method), e))?;
        let client = match init.redirect {
            RedirectMode::Follow => &self.follow,
            RedirectMode::Error | RedirectMode::Manual => &self.manual,
        };

        let mut builder = client.request(method, request.url.as_str());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body.clone() {
            builder = builder.body(body);
        }

        let send = builder.send();
        let response = match &signal {
            Some(signal) => tokio::select! {
                biased;
                reason = signal.aborted() => return Err(AbortError::new(reason).into()),
                result = send => result,
            },
            None => send.await,
        }
        .map_err(|e| TypeError::with_source(format!("network request to {} failed", request.url), e))?;

        if init.redirect == RedirectMode::Error && is_redirect(response.status()) {
            return Err(TypeError::new(format!(
                "unexpected redirect from {} with redirect mode `error`",
                request.url
            ))
            .into());
        }

        Ok(Box::new(ReqwestResponse::new(&request.url, response, signal)))
    }
}

// 304 and 300 are ordinary responses, not redirects.
fn is_redirect(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

enum BodyState {
    Pending {
        response: reqwest::Response,
        received: BytesMut,
    },
    Ready(Bytes),
    Failed(String),
}

/// Body shared between a response and its clones; buffered on first read.
///
/// Chunks are appended to the state as they arrive, so a read dropped
/// mid-body leaves it `Pending` and the next reader resumes where it stopped.
struct SharedBody {
    state: Mutex<BodyState>,
}

impl SharedBody {
    async fn read(&self) -> Result<Bytes, BoxError> {
        let mut state = self.state.lock().await;
        loop {
            match &mut *state {
                BodyState::Ready(bytes) => return Ok(bytes.clone()),
                BodyState::Failed(message) => return Err(TypeError::new(message.clone()).into()),
                BodyState::Pending { response, received } => match response.chunk().await {
                    Ok(Some(chunk)) => received.extend_from_slice(&chunk),
                    Ok(None) => {
                        let bytes = std::mem::take(received).freeze();
                        *state = BodyState::Ready(bytes);
                    }
                    Err(e) => {
                        *state = BodyState::Failed(e.to_string());
                        return Err(TypeError::with_source("failed to read response body", e).into());
                    }
                },
            }
        }
    }
}

/// A response received through [`ReqwestClient`].
pub struct ReqwestResponse {
    status: u16,
    status_text: String,
    headers: Headers,
    url: String,
    redirected: bool,
    body: Arc<SharedBody>,
    body_used: AtomicBool,
    signal: Option<AbortSignal>,
}

impl ReqwestResponse {
    fn new(requested: &str, response: reqwest::Response, signal: Option<AbortSignal>) -> Self {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let redirected = reqwest::Url::parse(requested)
            .map(|url| url != *response.url())
            .unwrap_or(false);
        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            url: response.url().to_string(),
            redirected,
            body: Arc::new(SharedBody {
                state: Mutex::new(BodyState::Pending {
                    response,
                    received: BytesMut::new(),
                }),
            }),
            body_used: AtomicBool::new(false),
            signal,
        }
    }

    async fn consume(&self) -> Result<Bytes, BoxError> {
        if self.body_used.swap(true, Ordering::SeqCst) {
            return Err(TypeError::new(BODY_USED_MESSAGE).into());
        }
        match &self.signal {
            Some(signal) => tokio::select! {
                biased;
                reason = signal.aborted() => Err(AbortError::new(reason).into()),
                bytes = self.body.read() => bytes,
            },
            None => self.body.read().await,
        }
    }
}

impl std::fmt::Debug for ReqwestResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestResponse")
            .field("status", &self.status)
            .field("url", &self.url)
            .field("redirected", &self.redirected)
            .field("body_used", &self.body_used)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RawResponse for ReqwestResponse {
    fn status(&self) -> u16 { self.status }

    fn status_text(&self) -> &str { &self.status_text }

    fn headers(&self) -> &Headers { &self.headers }

    fn url(&self) -> &str { &self.url }

    fn redirected(&self) -> bool { self.redirected }

    fn response_type(&self) -> ResponseType { ResponseType::Basic }

    fn body_used(&self) -> bool { self.body_used.load(Ordering::SeqCst) }

    async fn text(&self) -> Result<String, BoxError> { Ok(decode_text(&self.consume().await?)) }

    async fn json(&self) -> Result<serde_json::Value, BoxError> {
        decode_json(&self.consume().await?)
    }

    async fn bytes(&self) -> Result<Bytes, BoxError> { self.consume().await }

    async fn blob(&self) -> Result<Blob, BoxError> {
        let bytes = self.consume().await?;
        Ok(Blob::new(bytes, self.headers.get("content-type").unwrap_or_default()))
    }

    async fn form_data(&self) -> Result<FormData, BoxError> {
        let bytes = self.consume().await?;
        Ok(FormData::from_body(self.headers.get("content-type"), &bytes)?)
    }

    // reqwest does not surface HTTP trailers.
    async fn trailer(&self) -> Result<Headers, BoxError> { Ok(Headers::new()) }

    fn clone_response(&self) -> Box<dyn RawResponse> {
        Box::new(Self {
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            url: self.url.clone(),
            redirected: self.redirected,
            body: Arc::clone(&self.body),
            body_used: AtomicBool::new(self.body_used()),
            signal: self.signal.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_redirect_statuses_count_as_redirects() {
        for code in [301, 302, 303, 307, 308] {
            assert!(is_redirect(reqwest::StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [200, 300, 304, 305, 404] {
            assert!(!is_redirect(reqwest::StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }
}
