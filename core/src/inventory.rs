//! Flat hostname and URL listings of a target, the input format most external
//! recon tools expect (one entry per line).

use std::collections::BTreeSet;

use rekon_common::asset::{AssetId, Endpoint, ScanId, Scope, Subdomain, Target, TargetId};
use rekon_common::catalog::AssetCatalog;
use rekon_common::error::AssetError;
use rekon_common::url::{split_netloc, subdomain_from_url};
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct SubdomainQuery {
    /// Restrict to one scan instead of the whole history.
    pub scan: Option<ScanId>,
    /// Restrict to a single subdomain record.
    pub subdomain: Option<AssetId>,
    /// Only the root domain itself. Ignored when `subdomain` is set.
    pub root_only: bool,
    /// Appended to every hostname as `host/path`.
    pub url_path: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UrlQuery {
    pub scan: Option<ScanId>,
    /// Only URLs containing this subdomain's hostname.
    pub subdomain: Option<AssetId>,
    /// Only URLs on the root domain. Ignored when `subdomain` is set.
    pub root_only: bool,
    /// Only URLs containing `root/path`.
    pub url_path: Option<String>,
    pub alive_only: bool,
    /// Drops URLs whose path ends with one of these, e.g. `.png`.
    pub ignore_extensions: Vec<String>,
}

/// Distinct hostnames of `target`, sorted.
pub fn subdomain_names<C: AssetCatalog>(
    catalog: &C,
    target: TargetId,
    query: &SubdomainQuery,
) -> Result<Vec<String>, AssetError> {
    let root: Target = catalog
        .target(target)?
        .ok_or(AssetError::TargetNotFound(target))?;
    let scope: Scope = scope_of(target, query.scan);

    let subdomains: Vec<Subdomain> = match query.subdomain {
        Some(id) => {
            let found: Subdomain = catalog
                .subdomain(id)?
                .ok_or(AssetError::SubdomainNotFound(id))?;
            let in_scope: bool = found.target == target && query.scan.is_none_or(|s| s == found.scan);
            if in_scope { vec![found] } else { Vec::new() }
        }
        None => catalog.subdomains(scope)?,
    };

    let names: BTreeSet<String> = subdomains
        .into_iter()
        .filter(|s| query.subdomain.is_some() || !query.root_only || s.name == root.name)
        .map(|s| s.name)
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        warn!("No subdomains were found in query for {}", root.name);
    }

    Ok(names
        .into_iter()
        .map(|name| match &query.url_path {
            Some(path) => format!("{name}/{}", path.trim_start_matches('/')),
            None => name,
        })
        .collect())
}

/// Distinct endpoint URLs of `target`, sorted.
pub fn http_urls<C: AssetCatalog>(
    catalog: &C,
    target: TargetId,
    query: &UrlQuery,
) -> Result<Vec<String>, AssetError> {
    let root: Target = catalog
        .target(target)?
        .ok_or(AssetError::TargetNotFound(target))?;
    let endpoints: Vec<Endpoint> = catalog.endpoints(scope_of(target, query.scan))?;

    let host_filter: Option<String> = match query.subdomain {
        Some(id) => Some(
            catalog
                .subdomain(id)?
                .ok_or(AssetError::SubdomainNotFound(id))?
                .name,
        ),
        None => None,
    };
    let path_filter: Option<String> = query
        .url_path
        .as_ref()
        .map(|path| format!("{}/{}", root.name, path.trim_start_matches('/')));

    let urls: BTreeSet<String> = endpoints
        .into_iter()
        .filter(|e| match &host_filter {
            Some(host) => e.http_url.contains(host.as_str()),
            None => !query.root_only || subdomain_from_url(&e.http_url) == root.name,
        })
        .filter(|e| path_filter.as_ref().is_none_or(|p| e.http_url.contains(p.as_str())))
        .filter(|e| !query.alive_only || e.is_alive)
        .map(|e| e.http_url)
        .filter(|url| !has_ignored_extension(url, &query.ignore_extensions))
        .collect();

    if urls.is_empty() {
        warn!("No endpoints were found in query for {}", root.name);
    }

    Ok(urls.into_iter().collect())
}

fn scope_of(target: TargetId, scan: Option<ScanId>) -> Scope {
    scan.map_or(Scope::Target(target), Scope::Scan)
}

fn has_ignored_extension(url: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return false;
    }
    let path: String = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let (_, _, rest) = split_netloc(url);
            rest.split(['?', '#']).next().unwrap_or_default().to_string()
        }
    };
    extensions
        .iter()
        .map(|ext| ext.trim())
        .filter(|ext| !ext.is_empty())
        .any(|ext| path.ends_with(ext))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
