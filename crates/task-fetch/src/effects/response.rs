//! The proxied response: a raw response whose asynchronous members return
//! lazy tasks.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::http::RawResponse;
use crate::core::{Task, classify};
use crate::data::{Blob, FormData, Headers, ResponseType};
use crate::error::{BoxError, FetchError};

/// A fetched response.
///
/// Field accessors read straight through to the underlying raw response.
/// Body-reading members and [`Response::trailer`] return a [`Task`] instead
/// of a future: nothing is read until the task is forked, the success value
/// is delivered unchanged and failures are classified into [`FetchError`].
///
/// Cloning calls the raw response's own clone and wraps the result, so every
/// response reachable through any number of clones is again a `Response`.
pub struct Response {
    raw: Arc<dyn RawResponse>,
}

impl Response {
    pub fn wrap(raw: Box<dyn RawResponse>) -> Self { Self { raw: Arc::from(raw) } }

    pub fn status(&self) -> u16 { self.raw.status() }

    pub fn status_text(&self) -> &str { self.raw.status_text() }

    pub fn ok(&self) -> bool { self.raw.ok() }

    pub fn headers(&self) -> &Headers { self.raw.headers() }

    pub fn url(&self) -> &str { self.raw.url() }

    pub fn redirected(&self) -> bool { self.raw.redirected() }

    pub fn response_type(&self) -> ResponseType { self.raw.response_type() }

    pub fn body_used(&self) -> bool { self.raw.body_used() }

    /// Whether both responses wrap the same raw response object.
    pub fn same_raw(&self, other: &Response) -> bool { Arc::ptr_eq(&self.raw, &other.raw) }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> &dyn RawResponse { self.raw.as_ref() }

    pub fn text(&self) -> Task<String, FetchError> {
        self.intercept("text", |raw| async move { raw.text().await })
    }

    pub fn json(&self) -> Task<serde_json::Value, FetchError> {
        self.intercept("json", |raw| async move { raw.json().await })
    }

    /// [`Response::json`] decoded into `T`. A shape mismatch fails as an
    /// `UnknownError` holding the `serde_json::Error`.
    pub fn json_as<T>(&self) -> Task<T, FetchError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.json().chain(|value| match serde_json::from_value(value) {
            Ok(decoded) => Task::resolve(decoded),
            Err(e) => Task::reject(classify(Box::new(e))),
        })
    }

    pub fn bytes(&self) -> Task<Bytes, FetchError> {
        self.intercept("bytes", |raw| async move { raw.bytes().await })
    }

    pub fn array_buffer(&self) -> Task<Bytes, FetchError> {
        self.intercept("array_buffer", |raw| async move { raw.array_buffer().await })
    }

    pub fn blob(&self) -> Task<Blob, FetchError> {
        self.intercept("blob", |raw| async move { raw.blob().await })
    }

    pub fn form_data(&self) -> Task<FormData, FetchError> {
        self.intercept("form_data", |raw| async move { raw.form_data().await })
    }

    pub fn trailer(&self) -> Task<Headers, FetchError> {
        self.intercept("trailer", |raw| async move { raw.trailer().await })
    }

    fn intercept<T, F, Fut>(&self, member: &'static str, read: F) -> Task<T, FetchError>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn RawResponse>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, BoxError>> + Send + 'static,
    {
        let raw = Arc::clone(&self.raw);
        Task::from_future_with(
            move || {
                debug!(member, url = raw.url(), "reading response");
                read(raw)
            },
            classify,
        )
    }
}

impl Clone for Response {
    fn clone(&self) -> Self {
        debug!(url = self.raw.url(), "cloning response");
        Self::wrap(self.raw.clone_response())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status())
            .field("ok", &self.ok())
            .field("url", &self.url())
            .field("redirected", &self.redirected())
            .field("body_used", &self.body_used())
            .finish_non_exhaustive()
    }
}
