use anyhow::Context;
use clap::Parser;
use task_fetch::{
    AbortController, Dependencies, FetchError, ReqwestClient, Response, TaskFetch, is_abort_error,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    init_tracing(app.verbose);
    run(app).await
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(app: App) -> anyhow::Result<()> {
    let client = ReqwestClient::with_config(&app.client_config())?;
    let fetcher = TaskFetch::new(Dependencies::new(client));

    let controller = AbortController::new();
    let init = app.request_init()?.signal(controller.signal());
    let on_interrupt = controller.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.abort_with("interrupted");
        }
    });

    let json = app.json;
    let include = app.include;
    let read_through_clone = app.clone;
    let outcome = fetcher
        .fetch(app.url.as_str(), Some(init))
        .chain(move |response| {
            if include {
                print_head(&response);
            }
            let response = if read_through_clone {
                debug!("reading body through a cloned response");
                response.clone()
            } else {
                response
            };
            if json {
                response
                    .json()
                    .map(|value| serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
            } else {
                response.text()
            }
        })
        .run()
        .await;

    match outcome {
        Ok(body) => {
            println!("{body}");
            Ok(())
        }
        Err(err) if is_abort_error(&err) => {
            info!("request aborted");
            Err(err).context("request aborted")
        }
        Err(FetchError::Unknown(err)) => Err(err).context("unexpected failure"),
        Err(err) => Err(err).with_context(|| format!("fetching {} failed", app.url)),
    }
}

fn print_head(response: &Response) {
    eprintln!("{} {}", response.status(), response.status_text());
    for (name, value) in response.headers().iter() {
        eprintln!("{name}: {value}");
    }
    eprintln!();
}
