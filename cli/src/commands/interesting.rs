use anyhow::Context;
use colored::*;
use tracing::{info, warn};

use crate::commands::{AssetKind, InterestingArgs};
use crate::mprint;
use crate::terminal::{colors, format, print};
use rekon_common::asset::{Endpoint, Scope, Subdomain};
use rekon_common::catalog::memory::InMemoryCatalog;
use rekon_common::config::Config;
use rekon_common::policy::KeywordPolicy;
use rekon_core::interest::InterestingAssetMatcher;

pub fn interesting(args: InterestingArgs, cfg: &Config) -> anyhow::Result<()> {
    let catalog: InMemoryCatalog = InMemoryCatalog::from_path(&args.catalog.catalog)
        .with_context(|| format!("could not load {}", args.catalog.catalog.display()))?;
    let scope: Scope = args.scope();
    let policy: KeywordPolicy = cfg.lookup.policy();

    if policy.keywords().is_empty() {
        warn!("No lookup keywords configured, nothing can be flagged");
    }
    info!("Looking up {} keywords in {scope}", policy.keywords().len());

    let matcher = InterestingAssetMatcher::new(&catalog);
    let subdomains: Vec<Subdomain> = match args.kind {
        AssetKind::Endpoints => Vec::new(),
        _ => matcher.subdomains(Some(&policy), scope)?,
    };
    let endpoints: Vec<Endpoint> = match args.kind {
        AssetKind::Subdomains => Vec::new(),
        _ => matcher.endpoints(Some(&policy), scope)?,
    };

    if subdomains.is_empty() && endpoints.is_empty() {
        if cfg.quiet < 2 {
            print::header("nothing interesting", cfg.quiet);
            print::no_results();
        }
        return Ok(());
    }

    if !subdomains.is_empty() {
        print::header("interesting subdomains", cfg.quiet);
        for (idx, subdomain) in subdomains.iter().enumerate() {
            match cfg.quiet {
                2 => {
                    mprint!(&subdomain.name);
                }
                _ => {
                    print::tree(idx, &subdomain.name, &format::subdomain_details(subdomain));
                }
            }
        }
    }

    if !endpoints.is_empty() {
        print::header("interesting endpoints", cfg.quiet);
        for (idx, endpoint) in endpoints.iter().enumerate() {
            match cfg.quiet {
                2 => {
                    mprint!(&endpoint.http_url);
                }
                _ => {
                    print::tree(idx, &endpoint.http_url, &format::endpoint_details(endpoint));
                }
            }
        }
    }

    if cfg.quiet == 0 {
        let output: ColoredString = format!(
            "{} subdomains and {} endpoints flagged",
            subdomains.len(),
            endpoints.len()
        )
        .color(colors::TEXT_DEFAULT)
        .bold();
        print::summary(&output.to_string());
    }
    Ok(())
}
