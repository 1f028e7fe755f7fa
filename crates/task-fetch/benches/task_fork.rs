use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use task_fetch::{BoxError, Dependencies, MemoryResponse, RawResponse, Request, RequestInit, fetch};

fn in_memory() -> Dependencies {
    Dependencies::new(|_request: Request, _init: RequestInit| async {
        let response: Box<dyn RawResponse> = Box::new(MemoryResponse::ok(r#"{"id":1}"#));
        Ok::<_, BoxError>(response)
    })
}

fn bench_construct(c: &mut Criterion) {
    let deps = in_memory();
    c.bench_function("construct_fetch_task", |b| {
        b.iter(|| black_box(fetch(&deps, black_box("https://example.test/todos/1"), None)));
    });
}

fn bench_fork(c: &mut Criterion) {
    let mut group = c.benchmark_group("fork_fetch_then_json");
    let deps = in_memory();
    let rt = tokio::runtime::Runtime::new().unwrap();

    for clones in [0_usize, 1, 8].iter() {
        group.bench_with_input(BenchmarkId::new("clones", clones), clones, |b, &clones| {
            b.iter(|| {
                rt.block_on(async {
                    let value = fetch(&deps, "https://example.test/todos/1", None)
                        .chain(move |response| {
                            let mut response = response;
                            for _ in 0..clones {
                                response = response.clone();
                            }
                            response.json()
                        })
                        .await;
                    black_box(value).unwrap();
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construct, bench_fork);
criterion_main!(benches);
