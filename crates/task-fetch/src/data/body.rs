//! Terminal body values produced by the body-reading members.

use std::fmt;

use bytes::Bytes;

use crate::error::{BoxError, TypeError};

/// Message used when a body is read a second time.
pub const BODY_USED_MESSAGE: &str = "body stream already read";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Raw body bytes tagged with their media type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    bytes: Bytes,
    content_type: String,
}

impl Blob {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    pub fn size(&self) -> usize { self.bytes.len() }

    /// Media type, empty when the response carried none.
    pub fn content_type(&self) -> &str { &self.content_type }

    pub fn bytes(&self) -> &Bytes { &self.bytes }

    pub fn text(&self) -> String { decode_text(&self.bytes) }
}

/// Decoded `application/x-www-form-urlencoded` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Decode a body, rejecting content types other than url-encoded forms.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, TypeError> {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match essence.as_deref() {
            Some(FORM_URLENCODED) => Ok(Self::parse(body)),
            Some(other) => Err(TypeError::new(format!(
                "could not parse content as FormData: unsupported content type `{other}`"
            ))),
            None => Err(TypeError::new(
                "could not parse content as FormData: missing content type",
            )),
        }
    }

    pub fn parse(body: &[u8]) -> Self {
        let entries = form_urlencoded::parse(body)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// How a response was obtained, mirroring the fetch standard's response types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    #[default]
    Basic,
    Cors,
    Default,
    Error,
    Opaque,
    OpaqueRedirect,
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseType::Basic => write!(f, "basic"),
            ResponseType::Cors => write!(f, "cors"),
            ResponseType::Default => write!(f, "default"),
            ResponseType::Error => write!(f, "error"),
            ResponseType::Opaque => write!(f, "opaque"),
            ResponseType::OpaqueRedirect => write!(f, "opaqueredirect"),
        }
    }
}

/// UTF-8 decode with replacement characters.
pub(crate) fn decode_text(body: &[u8]) -> String { String::from_utf8_lossy(body).into_owned() }

/// JSON decode. Parse failures are left unclassified.
pub(crate) fn decode_json(body: &[u8]) -> Result<serde_json::Value, BoxError> {
    serde_json::from_slice(body).map_err(BoxError::from)
}
