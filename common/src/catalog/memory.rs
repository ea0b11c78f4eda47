//! In-memory [`AssetCatalog`] adapter.
//!
//! Holds every record in plain vectors, in insertion order. Can be loaded from
//! a JSON document shaped like:
//!
//! ```json
//! {
//!   "targets":    [{ "id": 1, "name": "example.com" }],
//!   "scans":      [{ "id": 1, "target": 1, "started_at": 1700000000, "tasks": ["subdomain_discovery"] }],
//!   "subdomains": [{ "id": 1, "name": "a.example.com", "scan": 1, "target": 1 }],
//!   "endpoints":  [{ "id": 2, "http_url": "https://a.example.com/admin", "scan": 1, "target": 1 }]
//! }
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AssetCatalog, CatalogResult};
use crate::asset::{AssetId, Endpoint, Scan, ScanId, Scope, Subdomain, Target, TargetId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    targets: Vec<Target>,
    #[serde(default)]
    scans: Vec<Scan>,
    #[serde(default)]
    subdomains: Vec<Subdomain>,
    #[serde(default)]
    endpoints: Vec<Endpoint>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> CatalogResult<Self> {
        let catalog: Self = serde_json::from_reader(reader)?;
        debug!(
            targets = catalog.targets.len(),
            scans = catalog.scans.len(),
            subdomains = catalog.subdomains.len(),
            endpoints = catalog.endpoints.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let file: File = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn add_target(&mut self, target: Target) -> &mut Self {
        self.targets.push(target);
        self
    }

    pub fn add_scan(&mut self, scan: Scan) -> &mut Self {
        self.scans.push(scan);
        self
    }

    pub fn add_subdomain(&mut self, subdomain: Subdomain) -> &mut Self {
        self.subdomains.push(subdomain);
        self
    }

    pub fn add_endpoint(&mut self, endpoint: Endpoint) -> &mut Self {
        self.endpoints.push(endpoint);
        self
    }
}

fn in_scope(scope: Scope, scan: ScanId, target: TargetId) -> bool {
    match scope {
        Scope::Target(id) => id == target,
        Scope::Scan(id) => id == scan,
    }
}

impl AssetCatalog for InMemoryCatalog {
    fn target(&self, id: TargetId) -> CatalogResult<Option<Target>> {
        Ok(self.targets.iter().find(|t| t.id == id).cloned())
    }

    fn scan(&self, id: ScanId) -> CatalogResult<Option<Scan>> {
        Ok(self.scans.iter().find(|s| s.id == id).cloned())
    }

    fn scans_of(&self, target: TargetId) -> CatalogResult<Vec<Scan>> {
        Ok(self
            .scans
            .iter()
            .filter(|s| s.target == target)
            .cloned()
            .collect())
    }

    fn subdomain(&self, id: AssetId) -> CatalogResult<Option<Subdomain>> {
        Ok(self.subdomains.iter().find(|s| s.id == id).cloned())
    }

    fn subdomains(&self, scope: Scope) -> CatalogResult<Vec<Subdomain>> {
        Ok(self
            .subdomains
            .iter()
            .filter(|s| in_scope(scope, s.scan, s.target))
            .cloned()
            .collect())
    }

    fn subdomains_named(
        &self,
        scan: ScanId,
        names: &HashSet<String>,
    ) -> CatalogResult<Vec<Subdomain>> {
        Ok(self
            .subdomains
            .iter()
            .filter(|s| s.scan == scan && names.contains(&s.name))
            .cloned()
            .collect())
    }

    fn endpoints(&self, scope: Scope) -> CatalogResult<Vec<Endpoint>> {
        Ok(self
            .endpoints
            .iter()
            .filter(|e| in_scope(scope, e.scan, e.target))
            .cloned()
            .collect())
    }

    fn endpoints_with_urls(
        &self,
        scan: ScanId,
        urls: &HashSet<String>,
    ) -> CatalogResult<Vec<Endpoint>> {
        Ok(self
            .endpoints
            .iter()
            .filter(|e| e.scan == scan && urls.contains(&e.http_url))
            .cloned()
            .collect())
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
