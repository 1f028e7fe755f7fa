//! Lazy, typed-error fetch.
//!
//! [`fetch`] turns an injected fetch capability into a [`Task`]: a value
//! that performs no work until it is forked, and that fails only with one of
//! the kinds in [`FetchError`]. The [`Response`] it delivers applies the same
//! treatment to its body-reading members, and to every clone of itself.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Requests, options, headers, bodies, abort signals
//! - `core` - The task primitive and error classification
//! - `effects` - The capability traits, the response proxy and the adapter
//!
//! # Example
//!
//! ```
//! use task_fetch::{BoxError, Dependencies, MemoryResponse, RawResponse, Request, RequestInit, fetch};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let deps = Dependencies::new(|_request: Request, _init: RequestInit| async {
//!     let response: Box<dyn RawResponse> = Box::new(MemoryResponse::ok("somejson"));
//!     Ok::<_, BoxError>(response)
//! });
//!
//! let body = fetch(&deps, "https://example.test", None)
//!     .chain(|response| response.text())
//!     .run()
//!     .await;
//! assert_eq!(body.unwrap(), "somejson");
//! # }
//! ```

mod core;
pub mod data;
mod effects;
mod error;

pub use crate::core::{Task, classify, is_abort_error};
pub use data::{
    AbortController, AbortSignal, Blob, ClientConfig, FormData, Headers, RedirectMode, Request,
    RequestInit, ResponseType,
};
pub use effects::{
    Dependencies, HttpClient, MISSING_FETCH_MESSAGE, MemoryResponse, RawResponse, Response,
    TaskFetch, fetch,
};
#[cfg(feature = "reqwest")]
pub use effects::{ReqwestClient, ReqwestResponse};
pub use error::{AbortError, BoxError, ErrorKind, FetchError, TypeError, UnknownError};
