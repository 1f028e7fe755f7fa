use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use task_fetch::{ClientConfig, Headers, RedirectMode, RequestInit};

#[derive(Clone, Debug, Parser)]
#[command(name = "task-fetch", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// URL to fetch.
    pub url: String,

    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request header as `name: value`. May be repeated.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Request body.
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    #[arg(long, value_enum, default_value_t = Redirect::Follow)]
    pub redirect: Redirect,

    /// Whole-request timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Pretty-print the body as JSON.
    #[arg(long)]
    pub json: bool,

    /// Read the body through a cloned response.
    #[arg(long)]
    pub clone: bool,

    /// Print the status line and response headers.
    #[arg(short = 'i', long)]
    pub include: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Redirect {
    Follow,
    Error,
    Manual,
}

impl From<Redirect> for RedirectMode {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Follow => RedirectMode::Follow,
            Redirect::Error => RedirectMode::Error,
            Redirect::Manual => RedirectMode::Manual,
        }
    }
}

impl App {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default();
        match self.timeout_ms {
            Some(ms) => config.timeout(Duration::from_millis(ms)),
            None => config,
        }
    }

    pub fn request_init(&self) -> anyhow::Result<RequestInit> {
        let headers = self
            .headers
            .iter()
            .map(|raw| parse_header(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let mut init = RequestInit::default()
            .method(self.method.as_str())
            .headers(headers.into_iter().collect::<Headers>())
            .redirect(self.redirect.into());
        if let Some(data) = &self.data {
            init = init.body(data.clone());
        }
        Ok(init)
    }
}

fn parse_header(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("header `{raw}` is not of the form `name: value`"))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("header `{raw}` has an empty name");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_method() {
        let app = App::parse_from([
            "task-fetch",
            "https://example.test",
            "-X",
            "post",
            "-H",
            "Accept: application/json",
            "-d",
            "{}",
            "--redirect",
            "manual",
        ]);
        let init = app.request_init().unwrap();
        assert_eq!(init.method.as_deref(), Some("post"));
        assert_eq!(init.headers.get("accept"), Some("application/json"));
        assert_eq!(init.body.as_deref(), Some(&b"{}"[..]));
        assert_eq!(init.redirect, RedirectMode::Manual);
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn timeout_flows_into_client_config() {
        let app = App::parse_from(["task-fetch", "https://example.test", "--timeout-ms", "250"]);
        assert_eq!(app.client_config().timeout, Some(Duration::from_millis(250)));
    }
}
