//! Keyword predicates as a small combinator tree.
//!
//! A [`KeywordPolicy`] folds into one [`Lookup`]: an `Any` node whose leaves
//! are one substring test per keyword (hostname / URL) and one whole-word test
//! per keyword (page title). Evaluation short-circuits on the first hit.

use regex::{Regex, RegexBuilder};
use rekon_common::asset::Asset;
use rekon_common::policy::KeywordPolicy;
use tracing::warn;

#[derive(Debug, Clone)]
pub enum Lookup {
    /// Case-insensitive substring of the hostname / URL. Stored lowercased.
    LocatorContains(String),
    /// Case-insensitive whole-word match inside the page title.
    TitleWord(Regex),
    /// True when any child is true. An empty `Any` is false.
    Any(Vec<Lookup>),
}

/// Pre-lowered view of an asset, so the locator is lowercased once per record.
pub struct Subject<'a> {
    locator: String,
    title: Option<&'a str>,
}

impl<'a> Subject<'a> {
    pub fn of<A: Asset>(asset: &'a A) -> Self {
        Self {
            locator: asset.locator().to_lowercase(),
            title: asset.page_title(),
        }
    }
}

impl Lookup {
    pub fn from_policy(policy: &KeywordPolicy) -> Self {
        let mut name_lookups: Vec<Lookup> = Vec::new();
        let mut title_lookups: Vec<Lookup> = Vec::new();

        for key in policy.keywords() {
            if policy.match_name {
                name_lookups.push(Lookup::LocatorContains(key.to_lowercase()));
            }
            if policy.match_title {
                match title_word(key) {
                    Ok(regex) => title_lookups.push(Lookup::TitleWord(regex)),
                    Err(e) => warn!("Skipping title lookup for {key:?}: {e}"),
                }
            }
        }

        Lookup::Any(vec![Lookup::Any(name_lookups), Lookup::Any(title_lookups)])
    }

    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        match self {
            Lookup::LocatorContains(needle) => subject.locator.contains(needle.as_str()),
            Lookup::TitleWord(regex) => subject.title.is_some_and(|t| regex.is_match(t)),
            Lookup::Any(children) => children.iter().any(|c| c.matches(subject)),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Lookup::Any(children) => children.iter().all(Lookup::is_empty),
            _ => false,
        }
    }
}

/// `\bkeyword\b`, case-insensitive, with the keyword taken literally.
fn title_word(key: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(key)))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekon_common::asset::{AssetId, ScanId, Subdomain, TargetId};

    fn subdomain(name: &str, title: Option<&str>) -> Subdomain {
        Subdomain {
            id: AssetId(1),
            name: name.into(),
            scan: ScanId(1),
            target: TargetId(1),
            page_title: title.map(String::from),
            http_status: None,
        }
    }

    fn title_only(keys: &[&str]) -> Lookup {
        Lookup::from_policy(&KeywordPolicy::new(keys.iter().copied()).with_name_lookup(false))
    }

    #[test]
    fn title_respects_word_boundaries() {
        let lookup = title_only(&["art"]);

        let smart = subdomain("a.x.com", Some("Smart Homepage"));
        let museum = subdomain("b.x.com", Some("Local Art Museum"));
        assert!(!lookup.matches(&Subject::of(&smart)));
        assert!(lookup.matches(&Subject::of(&museum)));
    }

    #[test]
    fn title_keywords_are_literal() {
        let lookup = title_only(&["c++", "a.b"]);

        assert!(!lookup.matches(&Subject::of(&subdomain("x", Some("axb")))));
        assert!(lookup.matches(&Subject::of(&subdomain("x", Some("the A.B portal")))));
    }

    #[test]
    fn locator_is_case_insensitive_substring() {
        let lookup = Lookup::from_policy(&KeywordPolicy::new(["Admin"]).with_title_lookup(false));

        assert!(lookup.matches(&Subject::of(&subdomain("SUPERADMIN.x.com", None))));
        assert!(!lookup.matches(&Subject::of(&subdomain("www.x.com", Some("admin")))));
    }

    #[test]
    fn disabled_lookups_match_nothing() {
        let policy = KeywordPolicy::new(["admin"])
            .with_name_lookup(false)
            .with_title_lookup(false);
        let lookup = Lookup::from_policy(&policy);

        assert!(lookup.is_empty());
        assert!(!lookup.matches(&Subject::of(&subdomain("admin.x.com", Some("admin")))));
    }

    #[test]
    fn missing_title_never_matches_title_lookup() {
        let lookup = title_only(&["admin"]);
        assert!(!lookup.matches(&Subject::of(&subdomain("admin.x.com", None))));
    }
}
