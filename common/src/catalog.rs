//! # Asset Catalog Port
//!
//! The read interface the engines need from whatever stores the scan history.
//!
//! Storage and query execution belong to the implementor. The engines only
//! issue the handful of queries below and compute differences and matches in
//! memory, so any backend able to answer them can be plugged in. The
//! [`memory`] adapter backs the CLI and the tests.

use std::collections::HashSet;

use crate::asset::{AssetId, Endpoint, Scan, ScanId, Scope, Subdomain, Target, TargetId};
use crate::error::CatalogError;

pub mod memory;

pub type CatalogResult<T> = Result<T, CatalogError>;

pub trait AssetCatalog: Send + Sync {
    fn target(&self, id: TargetId) -> CatalogResult<Option<Target>>;

    fn scan(&self, id: ScanId) -> CatalogResult<Option<Scan>>;

    /// All scans of a target, in any order.
    fn scans_of(&self, target: TargetId) -> CatalogResult<Vec<Scan>>;

    fn subdomain(&self, id: AssetId) -> CatalogResult<Option<Subdomain>>;

    fn subdomains(&self, scope: Scope) -> CatalogResult<Vec<Subdomain>>;

    /// Subdomains of `scan` whose hostname is one of `names`.
    fn subdomains_named(
        &self,
        scan: ScanId,
        names: &HashSet<String>,
    ) -> CatalogResult<Vec<Subdomain>>;

    fn endpoints(&self, scope: Scope) -> CatalogResult<Vec<Endpoint>>;

    /// Endpoints of `scan` whose URL is one of `urls`.
    fn endpoints_with_urls(
        &self,
        scan: ScanId,
        urls: &HashSet<String>,
    ) -> CatalogResult<Vec<Endpoint>>;
}

impl<C: AssetCatalog + ?Sized> AssetCatalog for &C {
    fn target(&self, id: TargetId) -> CatalogResult<Option<Target>> {
        (**self).target(id)
    }

    fn scan(&self, id: ScanId) -> CatalogResult<Option<Scan>> {
        (**self).scan(id)
    }

    fn scans_of(&self, target: TargetId) -> CatalogResult<Vec<Scan>> {
        (**self).scans_of(target)
    }

    fn subdomain(&self, id: AssetId) -> CatalogResult<Option<Subdomain>> {
        (**self).subdomain(id)
    }

    fn subdomains(&self, scope: Scope) -> CatalogResult<Vec<Subdomain>> {
        (**self).subdomains(scope)
    }

    fn subdomains_named(
        &self,
        scan: ScanId,
        names: &HashSet<String>,
    ) -> CatalogResult<Vec<Subdomain>> {
        (**self).subdomains_named(scan, names)
    }

    fn endpoints(&self, scope: Scope) -> CatalogResult<Vec<Endpoint>> {
        (**self).endpoints(scope)
    }

    fn endpoints_with_urls(
        &self,
        scan: ScanId,
        urls: &HashSet<String>,
    ) -> CatalogResult<Vec<Endpoint>> {
        (**self).endpoints_with_urls(scan, urls)
    }
}
