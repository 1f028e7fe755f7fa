use std::future::Future;

use async_trait::async_trait;
use bytes::Bytes;

use crate::data::{Blob, FormData, Headers, Request, RequestInit, ResponseType};
use crate::error::BoxError;

/// The fetch capability the adapter delegates to.
///
/// Implementations own the wire protocol and may reject with any error
/// value; the adapter classifies whatever comes back. Closures of the shape
/// `Fn(Request, RequestInit) -> impl Future<Output = Result<Box<dyn RawResponse>, BoxError>>`
/// implement this trait, which keeps test doubles small.
///
/// # Implementations
///
/// - [`crate::ReqwestClient`]: production implementation using `reqwest`
/// - closures and in-memory doubles for testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn fetch(
        &self,
        request: Request,
        init: RequestInit,
    ) -> Result<Box<dyn RawResponse>, BoxError>;
}

#[async_trait]
impl<F, Fut> HttpClient for F
where
    F: Fn(Request, RequestInit) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Box<dyn RawResponse>, BoxError>> + Send + 'static,
{
    async fn fetch(
        &self,
        request: Request,
        init: RequestInit,
    ) -> Result<Box<dyn RawResponse>, BoxError> {
        (self)(request, init).await
    }
}

/// A response as produced by a fetch capability.
///
/// Field accessors are plain reads. The body-reading members and
/// [`RawResponse::trailer`] are asynchronous and reject with arbitrary
/// errors; a body can be consumed once per instance, after which reads
/// reject with a `TypeError`. [`RawResponse::clone_response`] yields an
/// independent instance whose body can be read separately.
#[async_trait]
pub trait RawResponse: Send + Sync + 'static {
    fn status(&self) -> u16;

    fn status_text(&self) -> &str;

    fn ok(&self) -> bool { (200..=299).contains(&self.status()) }

    fn headers(&self) -> &Headers;

    fn url(&self) -> &str;

    fn redirected(&self) -> bool;

    fn response_type(&self) -> ResponseType;

    fn body_used(&self) -> bool;

    async fn text(&self) -> Result<String, BoxError>;

    async fn json(&self) -> Result<serde_json::Value, BoxError>;

    async fn bytes(&self) -> Result<Bytes, BoxError>;

    async fn array_buffer(&self) -> Result<Bytes, BoxError> { self.bytes().await }

    async fn blob(&self) -> Result<Blob, BoxError>;

    async fn form_data(&self) -> Result<FormData, BoxError>;

    async fn trailer(&self) -> Result<Headers, BoxError>;

    fn clone_response(&self) -> Box<dyn RawResponse>;
}
