//! # Temporal Reconciliation
//!
//! Compares a scan with the scan that came right before it for the same target
//! and reports which assets are new and which are gone.
//!
//! Asset identity is the hostname for subdomains and the URL for endpoints,
//! never the record id: the same host found by two runs yields two records.
//!
//! **Ordering assumption:** "previous" means the qualifying scan with the
//! greatest id strictly below the reference scan. Scan ids are expected to
//! grow with the start time. When they do not, a warning is logged and id
//! order still wins, so backfilled scans produce diffs against whatever has
//! the next-lower id.

use std::collections::HashSet;

use rekon_common::asset::{Endpoint, Scan, ScanId, ScanTask, Scope, Subdomain, TargetId};
use rekon_common::catalog::{AssetCatalog, CatalogResult};
use rekon_common::error::AssetError;
use tracing::{debug, warn};

/// Asset kinds that can be diffed between two scans.
pub trait Snapshot: Sized {
    /// Scans that did not run this task hold no snapshot of this kind.
    const TASK: ScanTask;

    fn key(&self) -> &str;

    fn fetch<C: AssetCatalog>(catalog: &C, scan: ScanId) -> CatalogResult<Vec<Self>>;

    fn fetch_keyed<C: AssetCatalog>(
        catalog: &C,
        scan: ScanId,
        keys: &HashSet<String>,
    ) -> CatalogResult<Vec<Self>>;
}

impl Snapshot for Subdomain {
    const TASK: ScanTask = ScanTask::SubdomainDiscovery;

    fn key(&self) -> &str {
        &self.name
    }

    fn fetch<C: AssetCatalog>(catalog: &C, scan: ScanId) -> CatalogResult<Vec<Self>> {
        catalog.subdomains(Scope::Scan(scan))
    }

    fn fetch_keyed<C: AssetCatalog>(
        catalog: &C,
        scan: ScanId,
        keys: &HashSet<String>,
    ) -> CatalogResult<Vec<Self>> {
        catalog.subdomains_named(scan, keys)
    }
}

impl Snapshot for Endpoint {
    const TASK: ScanTask = ScanTask::FetchUrl;

    fn key(&self) -> &str {
        &self.http_url
    }

    fn fetch<C: AssetCatalog>(catalog: &C, scan: ScanId) -> CatalogResult<Vec<Self>> {
        catalog.endpoints(Scope::Scan(scan))
    }

    fn fetch_keyed<C: AssetCatalog>(
        catalog: &C,
        scan: ScanId,
        keys: &HashSet<String>,
    ) -> CatalogResult<Vec<Self>> {
        catalog.endpoints_with_urls(scan, keys)
    }
}

/// Added and removed assets of one scan compared with its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta<A> {
    /// `None` when there was nothing to compare against.
    pub previous: Option<ScanId>,
    /// Records of the reference scan.
    pub added: Vec<A>,
    /// Records of the previous scan, the last known data about them.
    pub removed: Vec<A>,
}

impl<A> Delta<A> {
    fn nothing_to_compare() -> Self {
        Self {
            previous: None,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Added,
    Removed,
}

pub struct ReconciliationEngine<C> {
    catalog: C,
}

impl<C: AssetCatalog> ReconciliationEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Subdomains of `scan` whose hostname the previous scan did not have.
    pub fn added_subdomains(
        &self,
        target: TargetId,
        scan: ScanId,
    ) -> Result<Vec<Subdomain>, AssetError> {
        self.one_side(target, scan, Direction::Added)
    }

    /// Subdomains of the previous scan whose hostname `scan` no longer has.
    pub fn removed_subdomains(
        &self,
        target: TargetId,
        scan: ScanId,
    ) -> Result<Vec<Subdomain>, AssetError> {
        self.one_side(target, scan, Direction::Removed)
    }

    pub fn added_endpoints(
        &self,
        target: TargetId,
        scan: ScanId,
    ) -> Result<Vec<Endpoint>, AssetError> {
        self.one_side(target, scan, Direction::Added)
    }

    pub fn removed_endpoints(
        &self,
        target: TargetId,
        scan: ScanId,
    ) -> Result<Vec<Endpoint>, AssetError> {
        self.one_side(target, scan, Direction::Removed)
    }

    /// Both sides of the comparison in one pass over the catalog.
    pub fn delta<A: Snapshot>(&self, target: TargetId, scan: ScanId) -> Result<Delta<A>, AssetError> {
        let Some((current, previous)) = self.scan_pair::<A>(target, scan)? else {
            return Ok(Delta::nothing_to_compare());
        };

        let current_keys: HashSet<String> = self.keys_of::<A>(current.id)?;
        let previous_keys: HashSet<String> = self.keys_of::<A>(previous.id)?;

        let added: Vec<A> = self.records_for(current.id, &current_keys, &previous_keys)?;
        let removed: Vec<A> = self.records_for(previous.id, &previous_keys, &current_keys)?;

        debug!(
            "{} vs {}: {} added, {} removed",
            current.id,
            previous.id,
            added.len(),
            removed.len()
        );

        Ok(Delta {
            previous: Some(previous.id),
            added,
            removed,
        })
    }

    fn one_side<A: Snapshot>(
        &self,
        target: TargetId,
        scan: ScanId,
        direction: Direction,
    ) -> Result<Vec<A>, AssetError> {
        let Some((current, previous)) = self.scan_pair::<A>(target, scan)? else {
            return Ok(Vec::new());
        };

        let current_keys: HashSet<String> = self.keys_of::<A>(current.id)?;
        let previous_keys: HashSet<String> = self.keys_of::<A>(previous.id)?;

        match direction {
            Direction::Added => self.records_for(current.id, &current_keys, &previous_keys),
            Direction::Removed => self.records_for(previous.id, &previous_keys, &current_keys),
        }
    }

    /// Records of `source` whose key is in `present` but not in `absent`.
    fn records_for<A: Snapshot>(
        &self,
        source: ScanId,
        present: &HashSet<String>,
        absent: &HashSet<String>,
    ) -> Result<Vec<A>, AssetError> {
        let keys: HashSet<String> = present.difference(absent).cloned().collect();
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        Ok(A::fetch_keyed(&self.catalog, source, &keys)?)
    }

    fn keys_of<A: Snapshot>(&self, scan: ScanId) -> Result<HashSet<String>, AssetError> {
        let records: Vec<A> = A::fetch(&self.catalog, scan)?;
        Ok(records.iter().map(|r| r.key().to_string()).collect())
    }

    /// Resolves the reference scan and its predecessor, or `None` when there is
    /// nothing to compare against.
    fn scan_pair<A: Snapshot>(
        &self,
        target: TargetId,
        scan: ScanId,
    ) -> Result<Option<(Scan, Scan)>, AssetError> {
        let current: Scan = self.resolve_scan(target, scan)?;

        if !current.ran(&A::TASK) {
            debug!("{} did not run {:?}, nothing to compare", current.id, A::TASK);
            return Ok(None);
        }

        let previous: Option<Scan> = self
            .catalog
            .scans_of(target)?
            .into_iter()
            .filter(|s| s.id < current.id && s.ran(&A::TASK))
            .max_by_key(|s| s.id);

        let Some(previous) = previous else {
            debug!("{} is the first {:?} run of {}", current.id, A::TASK, target);
            return Ok(None);
        };

        if previous.started_at > current.started_at {
            warn!(
                "{} started after {} although its id is lower, diffing in id order",
                previous.id, current.id
            );
        }

        Ok(Some((current, previous)))
    }

    fn resolve_scan(&self, target: TargetId, scan: ScanId) -> Result<Scan, AssetError> {
        if self.catalog.target(target)?.is_none() {
            return Err(AssetError::TargetNotFound(target));
        }
        let found: Scan = self
            .catalog
            .scan(scan)?
            .ok_or(AssetError::ScanNotFound(scan))?;
        if found.target != target {
            return Err(AssetError::ScanOutsideTarget { scan, target });
        }
        Ok(found)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
