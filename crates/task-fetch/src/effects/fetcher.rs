//! The task adapter: turns the injected fetch capability into lazy tasks.

use tracing::{debug, warn};

use super::dependencies::Dependencies;
use super::response::Response;
use crate::core::{Task, classify};
use crate::data::{Request, RequestInit};
use crate::error::{FetchError, TypeError};

/// Failure message when the dependency slot is empty.
pub const MISSING_FETCH_MESSAGE: &str = "The fetch function is not defined, you should install a \
                                         fetch implementation or enable the `reqwest` feature";

/// Fetch `input` through the capability held by `dependencies`.
///
/// Building the task does nothing. Forking it performs exactly one call to
/// the capability; a fulfilled call succeeds with the wrapped [`Response`]
/// regardless of HTTP status, a rejected one fails with the classified
/// [`FetchError`]. With an empty slot the task fails with a [`TypeError`]
/// and the network is never touched.
pub fn fetch(
    dependencies: &Dependencies,
    input: impl Into<Request>,
    init: Option<RequestInit>,
) -> Task<Response, FetchError> {
    let request = input.into();
    let Some(client) = dependencies.fetch().cloned() else {
        return Task::new(move || {
            warn!(url = %request.url, "fetch forked without a fetch capability");
            std::future::ready(Err(TypeError::new(MISSING_FETCH_MESSAGE).into()))
        });
    };
    let init = init.unwrap_or_default();

    Task::from_future_with(
        move || async move {
            debug!(method = %request.method, url = %request.url, "fetching");
            client.fetch(request, init).await
        },
        |rejection| {
            let err = classify(rejection);
            debug!(kind = %err.kind(), error = %err, "fetch rejected");
            err
        },
    )
    .map(Response::wrap)
}

/// A fetch entry point bound to one set of [`Dependencies`].
///
/// # Examples
///
/// ```no_run
/// use task_fetch::TaskFetch;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let client = TaskFetch::default();
/// let todo = client
///     .fetch("https://jsonplaceholder.typicode.com/todos/1", None)
///     .chain(|response| response.json());
///
/// todo.fork(
///     |err| eprintln!("request failed: {err}"),
///     |value| println!("{value}"),
/// )
/// .await;
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskFetch {
    dependencies: Dependencies,
}

impl TaskFetch {
    pub fn new(dependencies: Dependencies) -> Self { Self { dependencies } }

    pub fn dependencies(&self) -> &Dependencies { &self.dependencies }

    pub fn fetch(
        &self,
        input: impl Into<Request>,
        init: Option<RequestInit>,
    ) -> Task<Response, FetchError> {
        fetch(&self.dependencies, input, init)
    }
}
