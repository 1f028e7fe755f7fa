//! In-memory [`RawResponse`], the equivalent of constructing a response
//! from a body by hand.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use super::http::RawResponse;
use crate::data::body::{BODY_USED_MESSAGE, decode_json, decode_text};
use crate::data::{Blob, FormData, Headers, ResponseType};
use crate::error::{BoxError, TypeError};

/// A fully buffered response.
#[derive(Debug)]
pub struct MemoryResponse {
    status: u16,
    status_text: String,
    headers: Headers,
    url: String,
    redirected: bool,
    response_type: ResponseType,
    body: Bytes,
    trailer: Headers,
    body_used: AtomicBool,
}

impl MemoryResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers: Headers::new(),
            url: String::new(),
            redirected: false,
            response_type: ResponseType::Default,
            body: body.into(),
            trailer: Headers::new(),
            body_used: AtomicBool::new(false),
        }
    }

    /// A `200 OK` response.
    pub fn ok(body: impl Into<Bytes>) -> Self { Self::new(200, body).with_status_text("OK") }

    /// A `200 OK` JSON response.
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self::ok(value.to_string()).with_header("content-type", "application/json")
    }

    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    #[must_use]
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    #[must_use]
    pub fn with_trailer(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.trailer.append(key, value);
        self
    }

    fn consume(&self) -> Result<Bytes, BoxError> {
        if self.body_used.swap(true, Ordering::SeqCst) {
            return Err(TypeError::new(BODY_USED_MESSAGE).into());
        }
        Ok(self.body.clone())
    }
}

#[async_trait]
impl RawResponse for MemoryResponse {
    fn status(&self) -> u16 { self.status }

    fn status_text(&self) -> &str { &self.status_text }

    fn headers(&self) -> &Headers { &self.headers }

    fn url(&self) -> &str { &self.url }

    fn redirected(&self) -> bool { self.redirected }

    fn response_type(&self) -> ResponseType { self.response_type }

    fn body_used(&self) -> bool { self.body_used.load(Ordering::SeqCst) }

    async fn text(&self) -> Result<String, BoxError> { Ok(decode_text(&self.consume()?)) }

    async fn json(&self) -> Result<serde_json::Value, BoxError> { decode_json(&self.consume()?) }

    async fn bytes(&self) -> Result<Bytes, BoxError> { self.consume() }

    async fn blob(&self) -> Result<Blob, BoxError> {
        let content_type = self.headers.get("content-type").unwrap_or_default();
        Ok(Blob::new(self.consume()?, content_type))
    }

    async fn form_data(&self) -> Result<FormData, BoxError> {
        let body = self.consume()?;
        Ok(FormData::from_body(self.headers.get("content-type"), &body)?)
    }

    async fn trailer(&self) -> Result<Headers, BoxError> { Ok(self.trailer.clone()) }

    fn clone_response(&self) -> Box<dyn RawResponse> {
        Box::new(Self {
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            url: self.url.clone(),
            redirected: self.redirected,
            response_type: self.response_type,
            body: self.body.clone(),
            trailer: self.trailer.clone(),
            body_used: AtomicBool::new(self.body_used()),
        })
    }
}
