use std::fs;

use anyhow::Context;
use tracing::info;

use crate::commands::{ListArgs, ListKind};
use crate::mprint;
use crate::terminal::print;
use rekon_common::asset::TargetId;
use rekon_common::catalog::memory::InMemoryCatalog;
use rekon_common::config::Config;
use rekon_core::inventory::{self, SubdomainQuery, UrlQuery};

pub fn list(args: ListArgs, cfg: &Config) -> anyhow::Result<()> {
    let catalog: InMemoryCatalog = InMemoryCatalog::from_path(&args.catalog.catalog)
        .with_context(|| format!("could not load {}", args.catalog.catalog.display()))?;
    let target: TargetId = TargetId(args.target);

    let entries: Vec<String> = match args.kind {
        ListKind::Subdomains => {
            let query = SubdomainQuery {
                scan: args.scan_id(),
                subdomain: args.subdomain_id(),
                root_only: args.root_only,
                url_path: args.path.clone(),
            };
            inventory::subdomain_names(&catalog, target, &query)?
        }
        ListKind::Urls => {
            let query = UrlQuery {
                scan: args.scan_id(),
                subdomain: args.subdomain_id(),
                root_only: args.root_only,
                url_path: args.path.clone(),
                alive_only: args.alive,
                ignore_extensions: args.ignore_extensions.clone(),
            };
            inventory::http_urls(&catalog, target, &query)?
        }
    };

    if let Some(path) = &args.output {
        let mut content: String = entries.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(path, content).with_context(|| format!("could not write {}", path.display()))?;
        info!("Wrote {} entries to {}", entries.len(), path.display());
        return Ok(());
    }

    print::header("inventory", cfg.quiet);
    for entry in &entries {
        mprint!(entry);
    }
    Ok(())
}
