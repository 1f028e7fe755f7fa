//! End-to-end behaviour of the adapter and the response proxy against
//! in-memory fetch capabilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Value, json};
use task_fetch::{
    AbortController, AbortError, Blob, BoxError, Dependencies, FetchError, FormData, Headers,
    MemoryResponse, RawResponse, Request, RequestInit, Response, ResponseType, TaskFetch, TypeError,
    fetch, is_abort_error,
};

const URL: &str = "https://jsonplaceholder.typicode.com/todos/1";

/// Test double that records every call and answers with `respond`.
fn mock<F>(calls: Arc<AtomicUsize>, respond: F) -> Dependencies
where
    F: Fn() -> Result<Box<dyn RawResponse>, BoxError> + Send + Sync + 'static,
{
    Dependencies::new(move |_request: Request, _init: RequestInit| {
        calls.fetch_add(1, Ordering::SeqCst);
        std::future::ready(respond())
    })
}

#[derive(Debug, Default)]
struct Handlers {
    ok: AtomicUsize,
    err: AtomicUsize,
}

/// Response whose clone hands back the same shared state and whose body
/// can be read any number of times.
#[derive(Clone)]
struct SelfCloning {
    headers: Arc<Headers>,
    clones: Arc<AtomicUsize>,
}

#[async_trait]
impl RawResponse for SelfCloning {
    fn status(&self) -> u16 { 200 }

    fn status_text(&self) -> &str { "OK" }

    fn headers(&self) -> &Headers { &self.headers }

    fn url(&self) -> &str { URL }

    fn redirected(&self) -> bool { false }

    fn response_type(&self) -> ResponseType { ResponseType::Basic }

    fn body_used(&self) -> bool { false }

    async fn text(&self) -> Result<String, BoxError> { Ok("somejson".into()) }

    async fn json(&self) -> Result<Value, BoxError> { Ok(Value::from("somejson")) }

    async fn bytes(&self) -> Result<Bytes, BoxError> { Ok(Bytes::from_static(b"somejson")) }

    async fn blob(&self) -> Result<Blob, BoxError> { Ok(Blob::new("somejson", "")) }

    async fn form_data(&self) -> Result<FormData, BoxError> { Ok(FormData::parse(b"")) }

    async fn trailer(&self) -> Result<Headers, BoxError> { Ok(Headers::new()) }

    fn clone_response(&self) -> Box<dyn RawResponse> {
        self.clones.fetch_add(1, Ordering::SeqCst);
        Box::new(self.clone())
    }
}

/// Response whose every asynchronous member rejects with `reject()`.
struct Rejecting {
    headers: Headers,
    reject: fn() -> BoxError,
}

#[async_trait]
impl RawResponse for Rejecting {
    fn status(&self) -> u16 { 200 }

    fn status_text(&self) -> &str { "" }

    fn headers(&self) -> &Headers { &self.headers }

    fn url(&self) -> &str { URL }

    fn redirected(&self) -> bool { false }

    fn response_type(&self) -> ResponseType { ResponseType::Default }

    fn body_used(&self) -> bool { false }

    async fn text(&self) -> Result<String, BoxError> { Err((self.reject)()) }

    async fn json(&self) -> Result<Value, BoxError> { Err((self.reject)()) }

    async fn bytes(&self) -> Result<Bytes, BoxError> { Err((self.reject)()) }

    async fn blob(&self) -> Result<Blob, BoxError> { Err((self.reject)()) }

    async fn form_data(&self) -> Result<FormData, BoxError> { Err((self.reject)()) }

    async fn trailer(&self) -> Result<Headers, BoxError> { Err((self.reject)()) }

    fn clone_response(&self) -> Box<dyn RawResponse> {
        Box::new(Rejecting {
            headers: self.headers.clone(),
            reject: self.reject,
        })
    }
}

fn rejecting(reject: fn() -> BoxError) -> Response {
    Response::wrap(Box::new(Rejecting {
        headers: Headers::new(),
        reject,
    }))
}

#[tokio::test]
async fn resolves_with_the_response() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deps = mock(Arc::clone(&calls), || Ok(Box::new(MemoryResponse::ok("yeay"))));
    let handlers = Handlers::default();

    fetch(&deps, URL, None)
        .fork(
            |_| {
                handlers.err.fetch_add(1, Ordering::SeqCst);
            },
            |response| {
                assert!(response.ok());
                handlers.ok.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await;

    assert_eq!(handlers.ok.load(Ordering::SeqCst), 1);
    assert_eq!(handlers.err.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn http_error_status_still_resolves() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deps = mock(calls, || Ok(Box::new(MemoryResponse::new(500, "boom"))));

    let response = fetch(&deps, URL, None).await.unwrap();
    assert_eq!(response.status(), 500);
    assert!(!response.ok());
}

#[tokio::test]
async fn rejects_with_unknown_error_wrapping_the_cause() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deps = mock(calls, || Err("buu".into()));
    let seen = Mutex::new(None);

    fetch(&deps, URL, None)
        .fork(
            |err| *seen.lock().unwrap() = Some(err),
            |_| panic!("success handler must not run"),
        )
        .await;

    let err = seen.into_inner().unwrap().expect("failure handler ran");
    let FetchError::Unknown(unknown) = err else {
        panic!("expected UnknownError, got {err:?}");
    };
    assert_eq!(unknown.cause().to_string(), "buu");
    assert!(!is_abort_error(&unknown));
}

#[tokio::test]
async fn rejects_with_type_error_without_a_dependency() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut deps = mock(Arc::clone(&calls), || Ok(Box::new(MemoryResponse::ok(""))));
    deps.clear_fetch();

    let err = fetch(&deps, URL, None).await.unwrap_err();
    assert!(matches!(err, FetchError::Type(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn type_error_from_the_capability_passes_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deps = mock(calls, || Err(Box::new(TypeError::new("Failed to fetch"))));

    let err = fetch(&deps, URL, None).await.unwrap_err();
    let FetchError::Type(inner) = err else {
        panic!("expected TypeError, got {err:?}");
    };
    assert_eq!(inner.message(), "Failed to fetch");
}

#[tokio::test]
async fn json_member_resolves_with_the_raw_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deps = mock(calls, || Ok(Box::new(MemoryResponse::from_json(&json!("somejson")))));

    let value = fetch(&deps, URL, None)
        .chain(|response| response.json())
        .await
        .unwrap();
    assert_eq!(value, json!("somejson"));
}

#[tokio::test]
async fn json_survives_clone() {
    let clones = Arc::new(AtomicUsize::new(0));
    let raw = SelfCloning {
        headers: Arc::new(Headers::new()),
        clones: Arc::clone(&clones),
    };
    let deps = mock(Arc::new(AtomicUsize::new(0)), move || Ok(Box::new(raw.clone())));

    let value = fetch(&deps, URL, None)
        .chain(|response| response.clone().json())
        .await
        .unwrap();
    assert_eq!(value, json!("somejson"));
    assert_eq!(clones.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_clones_stay_proxied() {
    let clones = Arc::new(AtomicUsize::new(0));
    let raw = SelfCloning {
        headers: Arc::new(Headers::new()),
        clones: Arc::clone(&clones),
    };
    let deps = mock(Arc::new(AtomicUsize::new(0)), move || Ok(Box::new(raw.clone())));

    let response = fetch(&deps, URL, None).await.unwrap();
    let deepest = (0..100).fold(response.clone(), |current, _| current.clone());
    assert_eq!(clones.load(Ordering::SeqCst), 101);
    assert_eq!(deepest.text().await.unwrap(), "somejson");
    assert_eq!(deepest.bytes().await.unwrap(), Bytes::from_static(b"somejson"));
}

#[tokio::test]
async fn every_member_fails_in_lockstep() {
    fn unknown() -> BoxError { "body exploded".into() }

    let response = rejecting(unknown);
    let failures = vec![
        response.text().await.map(|_| ()),
        response.json().await.map(|_| ()),
        response.bytes().await.map(|_| ()),
        response.array_buffer().await.map(|_| ()),
        response.blob().await.map(|_| ()),
        response.form_data().await.map(|_| ()),
        response.trailer().await.map(|_| ()),
    ];
    for failure in failures {
        let err = failure.unwrap_err();
        assert!(err.is_unknown(), "expected UnknownError, got {err:?}");
        assert_eq!(err.to_string(), "UnknownError: body exploded");
    }
}

#[tokio::test]
async fn member_abort_is_classified_as_abort() {
    fn aborted() -> BoxError { Box::new(AbortError::default()) }

    let response = rejecting(aborted);
    let err = response.clone().text().await.unwrap_err();
    assert!(err.is_abort());
    assert!(is_abort_error(&err));
}

#[tokio::test]
async fn abort_signal_rejects_with_abort_error() {
    let deps = Dependencies::new(|_request: Request, init: RequestInit| async move {
        match init.signal {
            Some(signal) => Err::<Box<dyn RawResponse>, BoxError>(Box::new(AbortError::new(
                signal.aborted().await,
            ))),
            None => Err("no signal".into()),
        }
    });
    let controller = AbortController::new();
    let task = TaskFetch::new(deps).fetch(URL, Some(RequestInit::default().signal(controller.signal())));

    let pending = tokio::spawn(task.run());
    controller.abort_with("user navigated away");

    let err = pending.await.unwrap().unwrap_err();
    assert!(is_abort_error(&err));
    let FetchError::Abort(abort) = err else {
        panic!("expected AbortError");
    };
    assert_eq!(abort.message(), "user navigated away");
}

#[tokio::test]
async fn each_fork_is_one_network_attempt() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deps = mock(Arc::clone(&calls), || Ok(Box::new(MemoryResponse::ok(""))));

    let tasks: Vec<_> = (0..3).map(|_| fetch(&deps, URL, None)).collect();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    for task in tasks {
        task.run().await.unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
