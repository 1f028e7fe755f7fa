use bytes::Bytes;

use super::headers::Headers;
use super::signal::AbortSignal;

/// How redirects are handled by the underlying capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    /// Follow redirects transparently.
    #[default]
    Follow,
    /// Reject the request with a `TypeError` when a redirect is returned.
    Error,
    /// Hand the redirect response back to the caller.
    Manual,
}

/// Per-request options, passed to the fetch capability untouched.
///
/// Fields left unset fall back to what the [`crate::Request`] carries.
///
/// # Examples
///
/// ```
/// use task_fetch::{AbortController, RedirectMode, RequestInit};
///
/// let controller = AbortController::new();
/// let init = RequestInit::default()
///     .method("POST")
///     .header("Content-Type", "application/json")
///     .body(r#"{"title":"foo"}"#)
///     .redirect(RedirectMode::Manual)
///     .signal(controller.signal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    pub method: Option<String>,

    /// Replaces the request's headers when non-empty.
    pub headers: Headers,

    pub body: Option<Bytes>,

    pub redirect: RedirectMode,

    pub signal: Option<AbortSignal>,
}

impl RequestInit {
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    /// Set every header at once, replacing the ones already set.
    #[must_use]
    pub fn headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = headers.into();
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn redirect(mut self, redirect: RedirectMode) -> Self {
        self.redirect = redirect;
        self
    }

    #[must_use]
    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}
