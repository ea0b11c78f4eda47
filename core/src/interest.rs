//! # Interesting Asset Detection
//!
//! Flags subdomains and endpoints matching the user's [`KeywordPolicy`].
//!
//! A record is interesting when its hostname / URL contains a keyword
//! (substring, any case) **or** its page title contains a keyword as a whole
//! word. Titles use the stricter test because short keywords hide inside
//! ordinary words far more often there. With `http_200_only` set, only
//! records that answered `200` are considered at all.
//!
//! An absent policy is the normal state of a fresh install and yields no
//! matches rather than an error.

use std::collections::HashSet;

use rayon::prelude::*;
use rekon_common::asset::{Asset, AssetId, Endpoint, Scope, Subdomain};
use rekon_common::catalog::AssetCatalog;
use rekon_common::error::AssetError;
use rekon_common::policy::KeywordPolicy;
use tracing::debug;

pub mod lookup;

use lookup::{Lookup, Subject};

pub struct InterestingAssetMatcher<C> {
    catalog: C,
}

impl<C: AssetCatalog> InterestingAssetMatcher<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn subdomains(
        &self,
        policy: Option<&KeywordPolicy>,
        scope: Scope,
    ) -> Result<Vec<Subdomain>, AssetError> {
        let Some(policy) = policy else {
            debug!("No keyword policy configured, no interesting subdomains");
            return Ok(Vec::new());
        };
        self.ensure_scope(scope)?;
        let candidates: Vec<Subdomain> = self.catalog.subdomains(scope)?;
        Ok(filter_interesting(policy, candidates))
    }

    pub fn endpoints(
        &self,
        policy: Option<&KeywordPolicy>,
        scope: Scope,
    ) -> Result<Vec<Endpoint>, AssetError> {
        let Some(policy) = policy else {
            debug!("No keyword policy configured, no interesting endpoints");
            return Ok(Vec::new());
        };
        self.ensure_scope(scope)?;
        let candidates: Vec<Endpoint> = self.catalog.endpoints(scope)?;
        Ok(filter_interesting(policy, candidates))
    }

    fn ensure_scope(&self, scope: Scope) -> Result<(), AssetError> {
        match scope {
            Scope::Target(id) => {
                self.catalog.target(id)?.ok_or(AssetError::TargetNotFound(id))?;
            }
            Scope::Scan(id) => {
                self.catalog.scan(id)?.ok_or(AssetError::ScanNotFound(id))?;
            }
        }
        Ok(())
    }
}

/// Applies `policy` to an already fetched candidate list.
///
/// Keeps the candidates' order and drops repeated record ids.
pub fn filter_interesting<A>(policy: &KeywordPolicy, mut candidates: Vec<A>) -> Vec<A>
where
    A: Asset + Send + Sync,
{
    let lookup: Lookup = Lookup::from_policy(policy);
    if lookup.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<AssetId> = HashSet::with_capacity(candidates.len());
    candidates.retain(|c| seen.insert(c.id()));

    if policy.http_200_only {
        candidates.retain(|c| c.http_status() == Some(200));
    }

    let total: usize = candidates.len();
    let matches: Vec<A> = candidates
        .into_par_iter()
        .filter(|c| lookup.matches(&Subject::of(c)))
        .collect();

    debug!("{} of {} candidates are interesting", matches.len(), total);
    matches
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
