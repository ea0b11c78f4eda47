use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::{Instrument, debug, info, info_span};

use crate::commands::ProbeArgs;
use crate::mprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print, spinner};
use rekon_common::config::Config;
use rekon_core::digest::probe_summary;
use rekon_core::probe::{HostProbe, LivenessProbe};

pub async fn probe(args: ProbeArgs, cfg: &Config) -> anyhow::Result<()> {
    let inputs: Vec<String> = collect_inputs(&args)?;
    let prober: LivenessProbe = LivenessProbe::new(&cfg.probe)?;

    let span = info_span!("probe", indicatif.pb_show = true);
    spinner::start_progress(&span, inputs.len(), "Probing hosts");

    let start_time: Instant = Instant::now();
    let hosts: Vec<HostProbe> = prober
        .probe_many(inputs, &args.method, args.concurrency, |_| spinner::advance(&span))
        .instrument(span.clone())
        .await;
    drop(span);

    probe_ends(&hosts, args.first, start_time.elapsed(), cfg);
    Ok(())
}

fn collect_inputs(args: &ProbeArgs) -> anyhow::Result<Vec<String>> {
    let mut inputs: Vec<String> = args.targets.clone();
    if let Some(path) = &args.input {
        let content: String = std::fs::read_to_string(path)
            .with_context(|| format!("could not read targets from {}", path.display()))?;
        inputs.extend(content.lines().map(str::to_string));
    }
    inputs.retain(|input| !input.trim().is_empty());
    Ok(inputs)
}

fn probe_ends(hosts: &[HostProbe], first_only: bool, total_time: Duration, cfg: &Config) {
    let alive: usize = hosts
        .iter()
        .filter(|h| h.result.as_ref().is_ok_and(|urls| !urls.is_empty()))
        .count();

    if alive == 0 && cfg.quiet < 2 {
        print::header("nothing answered", cfg.quiet);
        print::no_results();
    } else {
        print::header("liveness probe", cfg.quiet);
    }

    for (idx, host) in hosts.iter().enumerate() {
        match cfg.quiet {
            2 => print_urls_only(host, first_only),
            _ => print_host_tree(host, idx, first_only),
        }
    }

    print_summary(alive, hosts.len(), total_time, cfg);
}

fn shown_urls(urls: &[String], first_only: bool) -> &[String] {
    match first_only {
        true => &urls[..urls.len().min(1)],
        false => urls,
    }
}

fn print_urls_only(host: &HostProbe, first_only: bool) {
    if let Ok(urls) = &host.result {
        for url in shown_urls(urls, first_only) {
            mprint!(url);
        }
    }
}

fn print_host_tree(host: &HostProbe, idx: usize, first_only: bool) {
    let details: Vec<Detail> = match &host.result {
        Ok(urls) if urls.is_empty() => {
            vec![("Alive".to_string(), "no".color(colors::REMOVED))]
        }
        Ok(urls) => shown_urls(urls, first_only)
            .iter()
            .map(|url| format::url_to_detail(url))
            .collect(),
        Err(e) => vec![("Error".to_string(), e.to_string().color(colors::REMOVED))],
    };
    print::tree(idx, &host.input, &details);

    if let Ok(urls) = &host.result {
        debug!("{}", probe_summary(&host.input, urls));
    }
}

fn print_summary(alive: usize, total: usize, total_time: Duration, cfg: &Config) {
    let alive: ColoredString = format!("{alive} of {total} hosts").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString = &format!("Probe Complete: {alive} alive in {total_time}")
        .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::summary(&output.to_string());
        }
        1 => info!("{}", output),
        _ => {}
    }
}
