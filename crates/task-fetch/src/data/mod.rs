//! Immutable data types: requests, options, headers, bodies and signals.
//!
//! Nothing in here performs I/O. These values are built by callers and
//! handed to the effects layer unchanged.

pub mod body;
pub mod config;
pub mod headers;
pub mod options;
pub mod request;
pub mod signal;

pub use body::{Blob, FormData, ResponseType};
pub use config::ClientConfig;
pub use headers::Headers;
pub use options::{RedirectMode, RequestInit};
pub use request::Request;
pub use signal::{AbortController, AbortSignal};
