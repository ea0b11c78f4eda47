//! Plain-text summaries for whoever delivers notifications.
//!
//! Everything here works on counts and ids only, so a summary can be built
//! without reaching back into the catalog.

use std::fmt;

use rekon_common::asset::ScanId;

/// What one finished scan changed and flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanDigest {
    pub added_subdomains: usize,
    pub removed_subdomains: usize,
    pub interesting_subdomains: usize,
    pub interesting_endpoints: usize,
}

impl ScanDigest {
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ScanDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_quiet() {
            return f.write_str("No changes and no interesting assets");
        }
        write!(
            f,
            "{} new subdomains, {} removed subdomains, {} interesting subdomains, {} interesting endpoints",
            self.added_subdomains,
            self.removed_subdomains,
            self.interesting_subdomains,
            self.interesting_endpoints
        )
    }
}

/// One-line outcome of a liveness probe.
pub fn probe_summary(input: &str, urls: &[String]) -> String {
    match urls {
        [] => format!("{input} did not answer on any protocol"),
        _ => format!("{input} is alive on {}", urls.join(", ")),
    }
}

/// Prefixes `message` with `#scan` or `#scan_subscan` when a scan is known.
pub fn format_notification_message(
    message: &str,
    scan: Option<ScanId>,
    subscan: Option<u64>,
) -> String {
    match (scan, subscan) {
        (Some(scan), Some(sub)) => format!("`#{}_{sub}`: {message}", scan.0),
        (Some(scan), None) => format!("`#{}`: {message}", scan.0),
        (None, _) => message.to_string(),
    }
}

pub fn scan_title(scan: ScanId, subscan: Option<u64>) -> String {
    match subscan {
        Some(sub) => format!("SUBSCAN #{sub}"),
        None => format!("SCAN #{}", scan.0),
    }
}

pub fn task_title(task: &str, scan: ScanId, subscan: Option<u64>) -> String {
    match subscan {
        Some(sub) => format!("`#{}-#{sub}` - `{task}`", scan.0),
        None => format!("`#{}` - `{task}`", scan.0),
    }
}

/// File name for a scan artifact, e.g. `#12-3_subdomains.txt`.
pub fn output_file_name(scan: ScanId, subscan: Option<u64>, filename: &str) -> String {
    match subscan {
        Some(sub) => format!("#{}-{sub}_{filename}", scan.0),
        None => format!("#{}_{filename}", scan.0),
    }
}
