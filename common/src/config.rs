use std::time::Duration;

use crate::policy::KeywordPolicy;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Keywords flagged as interesting when the user has not configured any.
pub const DEFAULT_LOOKUP_KEYWORDS: &[&str] = &[
    "admin", "api", "backup", "beta", "cpanel", "dashboard", "debug", "dev", "internal", "jenkins",
    "jira", "git", "gitlab", "grafana", "kibana", "login", "phpmyadmin", "portal", "staging",
    "test", "uat", "vpn",
];

pub struct Config {
    /// Suppresses the banner.
    pub no_banner: bool,
    /// 0 prints everything, 1 drops decorations, 2 prints results only.
    pub quiet: u8,
    pub probe: ProbeConfig,
    pub lookup: LookupConfig,
}

/// Settings shared by every protocol check of a liveness probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Upper bound for each protocol check on its own.
    pub timeout: Duration,
    /// Lets the HTTP client follow redirects before reporting the final URL.
    pub follow_redirects: bool,
    /// Treats a TLS handshake with an untrusted certificate as a live HTTPS service.
    pub accept_invalid_certs: bool,
    pub user_agent: String,
    /// Routes HTTP(S) checks through one of `proxies`, picked at random.
    pub use_proxy: bool,
    pub proxies: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            follow_redirects: false,
            accept_invalid_certs: true,
            user_agent: format!("rekon/{}", env!("CARGO_PKG_VERSION")),
            use_proxy: false,
            proxies: Vec::new(),
        }
    }
}

/// Source material for the [`KeywordPolicy`].
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub default_keywords: Vec<String>,
    pub custom_keywords: Option<Vec<String>>,
    pub match_name: bool,
    pub match_title: bool,
    pub http_200_only: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            default_keywords: DEFAULT_LOOKUP_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            custom_keywords: None,
            match_name: true,
            match_title: true,
            http_200_only: false,
        }
    }
}

impl LookupConfig {
    pub fn policy(&self) -> KeywordPolicy {
        KeywordPolicy::merge(&self.default_keywords, self.custom_keywords.as_ref())
            .with_name_lookup(self.match_name)
            .with_title_lookup(self.match_title)
            .with_http_200_only(self.http_200_only)
    }
}
