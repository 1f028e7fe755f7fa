//! Effectful layer: everything that touches the fetch capability.
//!
//! The capability itself is abstracted behind [`HttpClient`] and
//! [`RawResponse`]; the rest of this module adapts it into lazy tasks.

mod dependencies;
mod fetcher;
mod http;
mod memory;
mod response;
#[cfg(feature = "reqwest")]
mod reqwest_client;

pub use dependencies::Dependencies;
pub use fetcher::{MISSING_FETCH_MESSAGE, TaskFetch, fetch};
pub use http::{HttpClient, RawResponse};
pub use memory::MemoryResponse;
pub use response::Response;
#[cfg(feature = "reqwest")]
pub use reqwest_client::{ReqwestClient, ReqwestResponse};
