use anyhow::Context;
use colored::*;
use tracing::info;

use crate::commands::DiffArgs;
use crate::mprint;
use crate::terminal::{colors, print};
use rekon_common::asset::{Endpoint, Scope, Subdomain};
use rekon_common::catalog::memory::InMemoryCatalog;
use rekon_common::config::Config;
use rekon_common::policy::KeywordPolicy;
use rekon_core::digest::{ScanDigest, format_notification_message, scan_title};
use rekon_core::interest::InterestingAssetMatcher;
use rekon_core::reconcile::{Delta, ReconciliationEngine};

pub fn diff(args: DiffArgs, cfg: &Config) -> anyhow::Result<()> {
    let catalog: InMemoryCatalog = InMemoryCatalog::from_path(&args.catalog.catalog)
        .with_context(|| format!("could not load {}", args.catalog.catalog.display()))?;
    let (target, scan) = args.ids();
    let engine = ReconciliationEngine::new(&catalog);

    let subdomains: Delta<Subdomain> = engine.delta(target, scan)?;
    let mut digest: ScanDigest = ScanDigest {
        added_subdomains: subdomains.added.len(),
        removed_subdomains: subdomains.removed.len(),
        ..ScanDigest::default()
    };

    print::header(&scan_title(scan, None), cfg.quiet);
    match subdomains.previous {
        Some(previous) => info!("Comparing {scan} with {previous}"),
        None => info!("No earlier subdomain discovery to compare {scan} with"),
    }
    print_side("Subdomains", &names(&subdomains), cfg);

    if args.endpoints {
        let endpoints: Delta<Endpoint> = engine.delta(target, scan)?;
        print_side("Endpoints", &urls(&endpoints), cfg);
    }

    if args.lookup {
        let policy: KeywordPolicy = cfg.lookup.policy();
        let matcher = InterestingAssetMatcher::new(&catalog);
        digest.interesting_subdomains = matcher.subdomains(Some(&policy), Scope::Scan(scan))?.len();
        digest.interesting_endpoints = matcher.endpoints(Some(&policy), Scope::Scan(scan))?.len();
    }

    let message: String = format_notification_message(&digest.to_string(), Some(scan), None);
    match cfg.quiet {
        2 => {}
        0 => {
            print::summary(&message.color(colors::TEXT_DEFAULT).bold().to_string());
        }
        _ => info!("{message}"),
    }
    Ok(())
}

fn names(delta: &Delta<Subdomain>) -> (Vec<String>, Vec<String>) {
    (
        delta.added.iter().map(|s| s.name.clone()).collect(),
        delta.removed.iter().map(|s| s.name.clone()).collect(),
    )
}

fn urls(delta: &Delta<Endpoint>) -> (Vec<String>, Vec<String>) {
    (
        delta.added.iter().map(|e| e.http_url.clone()).collect(),
        delta.removed.iter().map(|e| e.http_url.clone()).collect(),
    )
}

fn print_side(title: &str, (added, removed): &(Vec<String>, Vec<String>), cfg: &Config) {
    if cfg.quiet == 2 {
        for entry in added {
            mprint!(&format!("+{entry}"));
        }
        for entry in removed {
            mprint!(&format!("-{entry}"));
        }
        return;
    }

    print::aligned_line(title, &format!("{} new, {} gone", added.len(), removed.len()));
    print::change_list('+', added);
    print::change_list('-', removed);
    mprint!();
}
