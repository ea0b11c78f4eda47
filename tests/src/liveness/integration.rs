#![cfg(test)]
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::fixtures;
use rekon_core::probe::{CheckFailure, CheckOutcome, HostProbe, LivenessProbe, ProbeError};
use rekon_protocols::scheme::Scheme;

fn prober() -> LivenessProbe {
    LivenessProbe::new(&fixtures::local_probe_config()).expect("client builds")
}

#[tokio::test]
async fn bare_host_answers_over_http_only() {
    let addr: SocketAddr = fixtures::http_server().await.unwrap();

    let urls: Vec<String> = prober().probe(&addr.to_string(), "HEAD").await.unwrap();

    assert_eq!(urls, [format!("http://{addr}")]);
}

#[tokio::test]
async fn both_web_schemes_are_reported_https_first() {
    let addr: SocketAddr = fixtures::https_and_http_server().await.unwrap();

    let urls: Vec<String> = prober().probe(&addr.to_string(), "HEAD").await.unwrap();
    assert_eq!(urls, [format!("https://{addr}"), format!("http://{addr}")]);

    assert_eq!(
        prober().probe_first(&addr.to_string(), "HEAD").await.unwrap(),
        Some(format!("https://{addr}"))
    );
}

#[tokio::test]
async fn url_in_query_is_treated_as_a_path() {
    let addr: SocketAddr = fixtures::http_server().await.unwrap();
    let input: String = format!("{addr}/redirect?next=http://a.example");

    let urls: Vec<String> = prober().probe(&input, "GET").await.unwrap();

    assert_eq!(urls, [format!("http://{input}")]);
}

#[tokio::test]
async fn explicit_scheme_restricts_the_checks() {
    let addr: SocketAddr = fixtures::http_server().await.unwrap();
    let input: String = format!("http://{addr}");

    let reports = prober().check_all(&input, "get").await.unwrap();

    let https = reports.iter().find(|r| r.scheme == Scheme::Https).unwrap();
    assert!(matches!(
        https.outcome,
        CheckOutcome::Failed(CheckFailure::SchemeMismatch { .. })
    ));
    let ftp = reports.iter().find(|r| r.scheme == Scheme::Ftp).unwrap();
    assert!(matches!(
        ftp.outcome,
        CheckOutcome::Failed(CheckFailure::SchemeMismatch { .. })
    ));
    assert_eq!(prober().probe(&input, "GET").await.unwrap(), [input]);
}

#[tokio::test]
async fn ftp_service_is_detected() {
    let addr: SocketAddr = fixtures::ftp_server().await.unwrap();

    let urls: Vec<String> = prober().probe(&addr.to_string(), "HEAD").await.unwrap();
    assert_eq!(urls, [format!("ftp://{addr}")]);

    let explicit: String = format!("ftp://{addr}/");
    assert_eq!(
        prober().probe_first(&explicit, "HEAD").await.unwrap(),
        Some(format!("ftp://{addr}"))
    );
}

#[tokio::test]
async fn closed_port_is_not_alive() {
    let addr: SocketAddr = fixtures::closed_port().await.unwrap();

    assert!(prober().probe(&addr.to_string(), "HEAD").await.unwrap().is_empty());
    assert_eq!(prober().probe_first(&addr.to_string(), "HEAD").await.unwrap(), None);
}

#[tokio::test]
async fn silent_host_is_bounded_by_the_timeout() {
    let addr: SocketAddr = fixtures::silent_server().await.unwrap();
    let started: Instant = Instant::now();

    let reports = prober().check_all(&addr.to_string(), "HEAD").await.unwrap();

    assert!(reports.iter().all(|r| r.alive_url().is_none()));
    // the three checks run side by side, each with its own deadline
    assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn bad_input_is_rejected_before_any_check() {
    let probe = prober();

    assert!(matches!(
        probe.probe("   ", "HEAD").await,
        Err(ProbeError::InputMalformed { .. })
    ));
    assert!(matches!(
        probe.probe("127.0.0.1", "NOT A METHOD").await,
        Err(ProbeError::InvalidMethod(_))
    ));
}

#[tokio::test]
async fn concurrent_probes_keep_their_own_results() {
    let web_a: SocketAddr = fixtures::http_server().await.unwrap();
    let web_b: SocketAddr = fixtures::http_server().await.unwrap();
    let files: SocketAddr = fixtures::ftp_server().await.unwrap();
    let closed: SocketAddr = fixtures::closed_port().await.unwrap();

    let inputs: Vec<String> = [web_a, files, closed, web_b]
        .iter()
        .map(SocketAddr::to_string)
        .collect();
    let mut seen: usize = 0;

    let hosts: Vec<HostProbe> = prober()
        .probe_many(inputs.clone(), "HEAD", 2, |_| seen += 1)
        .await;

    assert_eq!(seen, 4);
    let inputs_back: Vec<&str> = hosts.iter().map(|h| h.input.as_str()).collect();
    assert_eq!(inputs_back, inputs);

    let urls: Vec<Vec<String>> = hosts.into_iter().map(|h| h.result.unwrap()).collect();
    assert_eq!(urls[0], [format!("http://{web_a}")]);
    assert_eq!(urls[1], [format!("ftp://{files}")]);
    assert!(urls[2].is_empty());
    assert_eq!(urls[3], [format!("http://{web_b}")]);
}
