//! # Multi-Protocol Liveness Probe
//!
//! Finds out which of HTTPS, HTTP and FTP a host or URL answers on.
//!
//! The three protocol checks run concurrently and are **joined**, never raced:
//! the probe returns once every check has answered or hit its own timeout.
//! Results are reported in fixed priority order (HTTPS, HTTP, FTP) whatever
//! order the checks finished in, and each URL goes through
//! [`sanitize_url`](rekon_common::url::sanitize_url).
//!
//! A failing check (refused, timed out, DNS, TLS, garbage reply) only removes
//! its own protocol from the result. Only an unusable input or HTTP method
//! fails the whole probe.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Method;
use rekon_common::config::ProbeConfig;
use rekon_common::url::{explicit_scheme, sanitize_url};
use rekon_protocols::ftp::FtpError;
use rekon_protocols::scheme::Scheme;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

mod ftp;
mod http;
pub mod proxy;

use ftp::FtpCheck;
use http::HttpCheck;
use proxy::ProxyPool;

pub const DEFAULT_METHOD: &str = "HEAD";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot probe {input:?}: {reason}")]
    InputMalformed { input: String, reason: String },
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),
    #[error("invalid proxy {proxy:?}: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Why a single protocol check did not succeed.
#[derive(Debug, Error)]
pub enum CheckFailure {
    #[error("input scheme {found:?} does not match probed scheme {expected}")]
    SchemeMismatch { expected: Scheme, found: String },
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("url has no host")]
    MissingHost,
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("ftp handshake failed: {0}")]
    Ftp(#[from] FtpError),
}

#[derive(Debug)]
pub enum CheckOutcome {
    /// The protocol answered; carries the URL to report.
    Alive(String),
    Failed(CheckFailure),
}

#[derive(Debug)]
pub struct ProtocolReport {
    pub scheme: Scheme,
    pub outcome: CheckOutcome,
}

impl ProtocolReport {
    pub fn alive_url(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::Alive(url) => Some(url),
            CheckOutcome::Failed(_) => None,
        }
    }
}

/// Probe outcome for one input of [`LivenessProbe::probe_many`].
#[derive(Debug)]
pub struct HostProbe {
    pub input: String,
    pub result: Result<Vec<String>, ProbeError>,
}

/// A single protocol check.
///
/// `url` already carries the scheme under test; `constructed` is the same URL
/// as the text the probe built, before any parser normalization.
#[async_trait]
pub trait ProtocolCheck: Send + Sync {
    fn scheme(&self) -> Scheme;

    async fn run(&self, url: &Url, constructed: &str, method: &Method)
    -> Result<String, CheckFailure>;
}

/// The three checks, wired to one proxy or to a direct connection.
struct Route {
    proxy: Option<String>,
    checks: [Box<dyn ProtocolCheck>; 3],
}

impl Route {
    fn new(cfg: &ProbeConfig, proxy: Option<&str>) -> Result<Self, ProbeError> {
        let client: reqwest::Client = http::build_client(cfg, proxy)?;
        Ok(Self {
            proxy: proxy.map(String::from),
            checks: [
                Box::new(HttpCheck::new(Scheme::Https, client.clone())),
                Box::new(HttpCheck::new(Scheme::Http, client)),
                Box::new(FtpCheck),
            ],
        })
    }
}

/// Liveness checker. Every proxy client is built up front; each call to
/// [`check_all`](Self::check_all) picks one of them at random.
#[derive(Clone)]
pub struct LivenessProbe {
    routes: Arc<[Route]>,
    timeout: Duration,
}

impl LivenessProbe {
    pub fn new(cfg: &ProbeConfig) -> Result<Self, ProbeError> {
        let routes: Vec<Route> = ProxyPool::from_config(cfg)
            .routes()
            .into_iter()
            .map(|proxy| Route::new(cfg, proxy))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            routes: routes.into(),
            timeout: cfg.timeout,
        })
    }

    /// Every URL the input answers on, HTTPS first, then HTTP, then FTP.
    pub async fn probe(&self, input: &str, method: &str) -> Result<Vec<String>, ProbeError> {
        let reports: [ProtocolReport; 3] = self.check_all(input, method).await?;
        let urls: Vec<String> = assemble(&reports);
        info!("Probed {input:?} and found {} alive URLs: {urls:?}", urls.len());
        Ok(urls)
    }

    /// The highest-priority URL the input answers on.
    ///
    /// All three checks still run to completion.
    pub async fn probe_first(&self, input: &str, method: &str) -> Result<Option<String>, ProbeError> {
        Ok(self.probe(input, method).await?.into_iter().next())
    }

    /// Runs the three checks concurrently and returns one report per protocol,
    /// in priority order.
    pub async fn check_all(
        &self,
        input: &str,
        method: &str,
    ) -> Result<[ProtocolReport; 3], ProbeError> {
        let input: &str = input.trim();
        validate_input(input)?;
        let method: Method = parse_method(method)?;

        let [https, http, ftp] = &self.pick_route().checks;
        let (https, http, ftp) = tokio::join!(
            self.run_check(https.as_ref(), input, &method),
            self.run_check(http.as_ref(), input, &method),
            self.run_check(ftp.as_ref(), input, &method),
        );
        Ok([https, http, ftp])
    }

    /// Probes many inputs, at most `concurrency` at a time.
    ///
    /// `on_probed` sees each result as it completes; the returned list keeps the
    /// order of `inputs`.
    pub async fn probe_many<F>(
        &self,
        inputs: Vec<String>,
        method: &str,
        concurrency: usize,
        mut on_probed: F,
    ) -> Vec<HostProbe>
    where
        F: FnMut(&HostProbe),
    {
        let permits: Arc<Semaphore> = Arc::new(Semaphore::new(concurrency.max(1)));
        let mut tasks: JoinSet<(usize, HostProbe)> = JoinSet::new();

        for (idx, input) in inputs.into_iter().enumerate() {
            let probe: LivenessProbe = self.clone();
            let method: String = method.to_string();
            let permits: Arc<Semaphore> = permits.clone();
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let result = probe.probe(&input, &method).await;
                (idx, HostProbe { input, result })
            });
        }

        let mut done: Vec<(usize, HostProbe)> = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, host)) => {
                    on_probed(&host);
                    done.push((idx, host));
                }
                Err(e) => debug!("probe task aborted: {e}"),
            }
        }

        done.sort_by_key(|(idx, _)| *idx);
        done.into_iter().map(|(_, host)| host).collect()
    }

    fn pick_route(&self) -> &Route {
        // `new` always builds at least one route
        let idx: usize = rand::rng().random_range(0..self.routes.len());
        let route: &Route = &self.routes[idx];
        if let Some(proxy) = &route.proxy {
            debug!("Using proxy: {proxy}");
        }
        route
    }

    async fn run_check(&self, check: &dyn ProtocolCheck, input: &str, method: &Method) -> ProtocolReport {
        let scheme: Scheme = check.scheme();
        let outcome: CheckOutcome = match self.attempt(check, input, method).await {
            Ok(url) => CheckOutcome::Alive(url),
            Err(failure) => {
                debug!("{scheme} check of {input:?} failed: {failure}");
                CheckOutcome::Failed(failure)
            }
        };
        ProtocolReport { scheme, outcome }
    }

    async fn attempt(
        &self,
        check: &dyn ProtocolCheck,
        input: &str,
        method: &Method,
    ) -> Result<String, CheckFailure> {
        let scheme: Scheme = check.scheme();
        if let Some(found) = explicit_scheme(input) {
            if !found.eq_ignore_ascii_case(scheme.as_str()) {
                return Err(CheckFailure::SchemeMismatch {
                    expected: scheme,
                    found: found.to_string(),
                });
            }
        }

        let constructed: String = scheme.assume_for(input);
        let url: Url = Url::parse(&constructed)?;

        tokio::time::timeout(self.timeout, check.run(&url, &constructed, method))
            .await
            .map_err(|_| CheckFailure::Timeout(self.timeout))?
    }
}

/// Collects the alive URLs in priority order and normalizes them.
pub fn assemble(reports: &[ProtocolReport]) -> Vec<String> {
    Scheme::PRIORITY
        .iter()
        .flat_map(|scheme| reports.iter().filter(move |r| r.scheme == *scheme))
        .filter_map(ProtocolReport::alive_url)
        .map(sanitize_url)
        .collect()
}

fn validate_input(input: &str) -> Result<(), ProbeError> {
    let malformed = |reason: String| ProbeError::InputMalformed {
        input: input.to_string(),
        reason,
    };

    if input.is_empty() {
        return Err(malformed("empty input".into()));
    }
    let url: Url = Url::parse(&Scheme::Https.assume_for(input)).map_err(|e| malformed(e.to_string()))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(malformed("no host".into())),
    }
}

fn parse_method(method: &str) -> Result<Method, ProbeError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| ProbeError::InvalidMethod(method.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
