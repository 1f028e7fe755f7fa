//! The dependency slot: which fetch capability the adapter uses.

use std::fmt;
use std::sync::Arc;

use super::http::HttpClient;

/// Explicit context carrying the underlying fetch capability.
///
/// An empty slot is a valid state: fetches made through it fail with a
/// `TypeError` when forked, without any I/O.
#[derive(Clone)]
pub struct Dependencies {
    fetch: Option<Arc<dyn HttpClient>>,
}

impl Dependencies {
    /// A slot with no fetch capability.
    pub fn none() -> Self { Self { fetch: None } }

    pub fn new(client: impl HttpClient + 'static) -> Self { Self::from_arc(Arc::new(client)) }

    pub fn from_arc(client: Arc<dyn HttpClient>) -> Self { Self { fetch: Some(client) } }

    /// The platform capability if one is available.
    ///
    /// With the `reqwest` feature this is a default [`crate::ReqwestClient`];
    /// otherwise, or if the client cannot be built, the slot is empty.
    pub fn detect() -> Self {
        #[cfg(feature = "reqwest")]
        {
            match crate::ReqwestClient::new() {
                Ok(client) => return Self::new(client),
                Err(e) => tracing::warn!(error = %e, "reqwest client unavailable, fetch slot left empty"),
            }
        }
        Self::none()
    }

    pub fn fetch(&self) -> Option<&Arc<dyn HttpClient>> { self.fetch.as_ref() }

    pub fn is_available(&self) -> bool { self.fetch.is_some() }

    pub fn set_fetch(&mut self, client: impl HttpClient + 'static) {
        self.fetch = Some(Arc::new(client));
    }

    pub fn clear_fetch(&mut self) { self.fetch = None; }
}

impl Default for Dependencies {
    fn default() -> Self { Self::detect() }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies")
            .field("fetch", &self.fetch.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}
