use bytes::Bytes;

use super::headers::Headers;
use super::options::RequestInit;

/// The resource descriptor handed to a fetch capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub method: String,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Set the method. Standard methods are matched case-insensitively and
    /// upper-cased; extension methods are sent as given.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = normalize_method(method.into());
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The request as the capability should send it, with `init` applied on top.
    pub fn with_init(mut self, init: &RequestInit) -> Self {
        if let Some(method) = &init.method {
            self.method = normalize_method(method.clone());
        }
        if !init.headers.is_empty() {
            self.headers = init.headers.clone();
        }
        if let Some(body) = &init.body {
            self.body = Some(body.clone());
        }
        self
    }
}

fn normalize_method(method: String) -> String {
    const STANDARD: [&str; 6] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT"];
    match STANDARD.iter().find(|standard| standard.eq_ignore_ascii_case(&method)) {
        Some(standard) => (*standard).to_string(),
        None => method,
    }
}

impl From<&str> for Request {
    fn from(url: &str) -> Self { Self::new(url) }
}

impl From<String> for Request {
    fn from(url: String) -> Self { Self::new(url) }
}

impl From<&String> for Request {
    fn from(url: &String) -> Self { Self::new(url.as_str()) }
}
