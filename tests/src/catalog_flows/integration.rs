#![cfg(test)]
use crate::fixtures;
use rekon_common::asset::{Endpoint, Scope, ScanId, Subdomain, TargetId};
use rekon_common::catalog::memory::InMemoryCatalog;
use rekon_common::config::LookupConfig;
use rekon_common::error::AssetError;
use rekon_common::policy::KeywordPolicy;
use rekon_core::digest::{ScanDigest, format_notification_message};
use rekon_core::interest::InterestingAssetMatcher;
use rekon_core::inventory::{self, SubdomainQuery, UrlQuery};
use rekon_core::reconcile::{Delta, ReconciliationEngine};

const EXAMPLE: TargetId = TargetId(1);

fn names(subdomains: &[Subdomain]) -> Vec<&str> {
    let mut names: Vec<&str> = subdomains.iter().map(|s| s.name.as_str()).collect();
    names.sort();
    names
}

#[test]
fn diff_skips_scans_without_subdomain_discovery() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();
    let engine = ReconciliationEngine::new(&catalog);

    let delta: Delta<Subdomain> = engine.delta(EXAMPLE, ScanId(3)).unwrap();

    assert_eq!(delta.previous, Some(ScanId(1)));
    assert_eq!(names(&delta.added), ["admin.example.com", "d.example.com"]);
    assert_eq!(names(&delta.removed), ["a.example.com"]);
    assert!(delta.added.iter().all(|s| s.scan == ScanId(3)));
    assert!(delta.removed.iter().all(|s| s.scan == ScanId(1)));
}

#[test]
fn first_scan_and_foreign_scan() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();
    let engine = ReconciliationEngine::new(&catalog);

    assert!(engine.added_subdomains(EXAMPLE, ScanId(1)).unwrap().is_empty());
    assert!(engine.removed_subdomains(EXAMPLE, ScanId(1)).unwrap().is_empty());

    let err: AssetError = engine.added_subdomains(EXAMPLE, ScanId(4)).unwrap_err();
    assert!(err.is_not_found());
    let err: AssetError = engine.added_subdomains(TargetId(9), ScanId(3)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn endpoint_diff_uses_urls() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();
    let engine = ReconciliationEngine::new(&catalog);

    let added: Vec<Endpoint> = engine.added_endpoints(EXAMPLE, ScanId(3)).unwrap();
    let removed: Vec<Endpoint> = engine.removed_endpoints(EXAMPLE, ScanId(3)).unwrap();

    assert_eq!(added.len(), 1);
    assert_eq!(added[0].http_url, "https://d.example.com/backup.zip");
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].http_url, "https://a.example.com/login");
}

#[test]
fn default_keywords_flag_the_new_admin_host() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();
    let matcher = InterestingAssetMatcher::new(&catalog);
    let policy: KeywordPolicy = LookupConfig::default().policy();

    let subdomains: Vec<Subdomain> = matcher.subdomains(Some(&policy), Scope::Scan(ScanId(3))).unwrap();
    let endpoints: Vec<Endpoint> = matcher.endpoints(Some(&policy), Scope::Scan(ScanId(3))).unwrap();

    assert_eq!(names(&subdomains), ["admin.example.com"]);
    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].http_url, "https://d.example.com/backup.zip");

    let strict: KeywordPolicy = policy.with_http_200_only(true);
    assert!(matcher.subdomains(Some(&strict), Scope::Scan(ScanId(3))).unwrap().is_empty());
}

#[test]
fn title_keywords_match_whole_words_across_the_target() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();
    let matcher = InterestingAssetMatcher::new(&catalog);
    let policy: KeywordPolicy = KeywordPolicy::new(["art"]).with_name_lookup(false);

    let found: Vec<Subdomain> = matcher.subdomains(Some(&policy), Scope::Target(EXAMPLE)).unwrap();

    assert_eq!(names(&found), ["d.example.com"]);
}

#[test]
fn digest_of_a_scan() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();
    let engine = ReconciliationEngine::new(&catalog);
    let matcher = InterestingAssetMatcher::new(&catalog);
    let policy: KeywordPolicy = LookupConfig::default().policy();
    let scan: ScanId = ScanId(3);

    let delta: Delta<Subdomain> = engine.delta(EXAMPLE, scan).unwrap();
    let digest = ScanDigest {
        added_subdomains: delta.added.len(),
        removed_subdomains: delta.removed.len(),
        interesting_subdomains: matcher.subdomains(Some(&policy), Scope::Scan(scan)).unwrap().len(),
        interesting_endpoints: matcher.endpoints(Some(&policy), Scope::Scan(scan)).unwrap().len(),
    };

    assert_eq!(
        format_notification_message(&digest.to_string(), Some(scan), None),
        "`#3`: 2 new subdomains, 1 removed subdomains, 1 interesting subdomains, 1 interesting endpoints"
    );
}

#[test]
fn inventory_listings() {
    let catalog: InMemoryCatalog = fixtures::catalog().unwrap();

    let hosts: Vec<String> = inventory::subdomain_names(&catalog, EXAMPLE, &SubdomainQuery::default()).unwrap();
    assert_eq!(
        hosts,
        ["a.example.com", "admin.example.com", "b.example.com", "c.example.com", "d.example.com"]
    );

    let alive = UrlQuery { alive_only: true, ..Default::default() };
    let urls: Vec<String> = inventory::http_urls(&catalog, EXAMPLE, &alive).unwrap();
    assert_eq!(urls, ["https://a.example.com/login", "https://b.example.com/"]);
}
