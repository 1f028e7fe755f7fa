//! Core layer: the lazy task primitive and failure classification.
//!
//! Both are pure; nothing here performs I/O.

mod classify;
mod task;

pub use classify::{classify, is_abort_error};
pub use task::Task;
