//! # Keyword Policy
//!
//! The user-supplied configuration that decides which assets are "interesting".
//!
//! A policy merges a default keyword list with an optional custom list and
//! carries three switches:
//! * `match_name`: look for keywords inside hostnames / URLs.
//! * `match_title`: look for keywords as whole words inside page titles.
//! * `http_200_only`: only consider assets that answered with HTTP 200.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPolicy {
    keywords: Vec<String>,
    pub match_name: bool,
    pub match_title: bool,
    pub http_200_only: bool,
}

impl KeywordPolicy {
    /// Builds a policy from the default list followed by the custom list.
    ///
    /// Keywords are trimmed, blanks and duplicates are dropped, the first
    /// occurrence keeps its position. Both lookups are enabled and the status
    /// restriction is off.
    pub fn merge<D, C>(defaults: D, custom: Option<C>) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut keywords: Vec<String> = Vec::new();

        let custom = custom.into_iter().flatten();
        for key in defaults.into_iter().map(as_keyword).chain(custom.map(as_keyword)) {
            if let Some(key) = key {
                if seen.insert(key.clone()) {
                    keywords.push(key);
                }
            }
        }

        Self {
            keywords,
            match_name: true,
            match_title: true,
            http_200_only: false,
        }
    }

    /// Builds a policy from a single keyword list.
    pub fn new<I>(keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::merge(keywords, None::<Vec<String>>)
    }

    pub fn with_name_lookup(mut self, enabled: bool) -> Self {
        self.match_name = enabled;
        self
    }

    pub fn with_title_lookup(mut self, enabled: bool) -> Self {
        self.match_title = enabled;
        self
    }

    pub fn with_http_200_only(mut self, enabled: bool) -> Self {
        self.http_200_only = enabled;
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Splits a comma-separated keyword string, e.g. `"admin, jira,,vpn"`.
pub fn parse_keywords(csv: &str) -> Vec<String> {
    csv.split(',').filter_map(as_keyword).collect()
}

fn as_keyword<S: AsRef<str>>(raw: S) -> Option<String> {
    let key = raw.as_ref().trim();
    (!key.is_empty()).then(|| key.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_appends_custom_after_defaults() {
        let policy = KeywordPolicy::merge(["admin", "vpn"], Some(["jira", "admin", " ", "dev "]));
        assert_eq!(policy.keywords(), ["admin", "vpn", "jira", "dev"]);
    }

    #[test]
    fn merge_without_custom_keeps_defaults() {
        let policy = KeywordPolicy::merge(["admin", "", "admin"], None::<Vec<&str>>);
        assert_eq!(policy.keywords(), ["admin"]);
        assert!(policy.match_name);
        assert!(policy.match_title);
        assert!(!policy.http_200_only);
    }

    #[test]
    fn parse_keywords_drops_blanks() {
        assert_eq!(parse_keywords("admin, jira,, vpn ,"), vec!["admin", "jira", "vpn"]);
        assert!(parse_keywords(" , ,").is_empty());
    }

    #[test]
    fn builder_switches() {
        let policy = KeywordPolicy::new(["x"])
            .with_name_lookup(false)
            .with_title_lookup(false)
            .with_http_200_only(true);
        assert!(!policy.match_name);
        assert!(!policy.match_title);
        assert!(policy.http_200_only);
    }
}
