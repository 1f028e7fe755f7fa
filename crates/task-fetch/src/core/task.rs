//! Lazy task: a deferred computation with a typed failure channel.
//!
//! A [`Task`] stores a thunk and does nothing until it is forked (or run, or
//! awaited). Every running method takes `self`, so one instance settles at
//! most once.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures_util::future::{self, BoxFuture};
use tokio::task::JoinHandle;

type Thunk<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;

/// A computation that eventually succeeds with `T` or fails with `E`.
///
/// # Examples
///
/// ```
/// use task_fetch::Task;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let task = Task::<u32, String>::resolve(20).map(|n| n + 1).map(|n| n * 2);
///
/// task.fork(
///     |err| panic!("unexpected failure: {err}"),
///     |value| assert_eq!(value, 42),
/// )
/// .await;
/// # }
/// ```
pub struct Task<T, E> {
    thunk: Thunk<T, E>,
}

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a task from a future-producing thunk. The thunk runs on fork.
    pub fn new<F, Fut>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            thunk: Box::new(move || Box::pin(thunk())),
        }
    }

    /// A task that succeeds with `value`.
    pub fn resolve(value: T) -> Self { Self::new(move || future::ready(Ok(value))) }

    /// A task that fails with `error`.
    pub fn reject(error: E) -> Self { Self::new(move || future::ready(Err(error))) }

    /// Adapt a fallible future into a task.
    ///
    /// `thunk` is invoked at fork time; a success value is delivered as is,
    /// a failure value is routed through `classify` first.
    pub fn from_future_with<F, Fut, R, C>(thunk: F, classify: C) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, R>> + Send + 'static,
        C: FnOnce(R) -> E + Send + 'static,
    {
        Self::new(move || async move { thunk().await.map_err(classify) })
    }

    pub fn map<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Task::new(move || async move { self.run().await.map(f) })
    }

    pub fn map_err<E2, F>(self, f: F) -> Task<T, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        Task::new(move || async move { self.run().await.map_err(f) })
    }

    /// Sequence another task after a success.
    pub fn chain<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Task<U, E> + Send + 'static,
    {
        Task::new(move || async move {
            match self.run().await {
                Ok(value) => f(value).run().await,
                Err(err) => Err(err),
            }
        })
    }

    /// Recover from a failure with another task.
    pub fn catch<E2, F>(self, f: F) -> Task<T, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> Task<T, E2> + Send + 'static,
    {
        Task::new(move || async move {
            match self.run().await {
                Ok(value) => Ok(value),
                Err(err) => f(err).run().await,
            }
        })
    }

    /// Execute the task and hand back its outcome.
    pub async fn run(self) -> Result<T, E> { (self.thunk)().await }

    /// Execute the task, calling exactly one of the handlers exactly once.
    pub async fn fork<OnErr, OnOk>(self, on_err: OnErr, on_ok: OnOk)
    where
        OnErr: FnOnce(E),
        OnOk: FnOnce(T),
    {
        match self.run().await {
            Ok(value) => on_ok(value),
            Err(err) => on_err(err),
        }
    }

    /// Fork on the ambient tokio runtime.
    pub fn spawn_fork<OnErr, OnOk>(self, on_err: OnErr, on_ok: OnOk) -> JoinHandle<()>
    where
        OnErr: FnOnce(E) + Send + 'static,
        OnOk: FnOnce(T) + Send + 'static,
    {
        tokio::spawn(self.fork(on_err, on_ok))
    }
}

impl<T, E> IntoFuture for Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = Result<T, E>;
    type IntoFuture = BoxFuture<'static, Result<T, E>>;

    fn into_future(self) -> Self::IntoFuture { (self.thunk)() }
}

impl<T, E> fmt::Debug for Task<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}
