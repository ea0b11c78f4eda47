//! # Asset Model
//!
//! Records produced by the recon pipeline and stored in the
//! [`AssetCatalog`](crate::catalog::AssetCatalog).
//!
//! A [`Target`] owns many [`Scan`]s, and each scan owns the [`Subdomain`] and
//! [`Endpoint`] records it discovered. Records are never mutated here; the
//! engines only derive views from them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Target`].
    TargetId, "target #"
);
record_id!(
    /// Identifier of a [`Scan`]. Assumed to grow with the scan start time.
    ScanId, "scan #"
);
record_id!(
    /// Identifier of a [`Subdomain`] or [`Endpoint`] record.
    AssetId, "asset #"
);

/// A logical scan subject, identified by its root domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
}

/// Stages a scan run may execute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanTask {
    SubdomainDiscovery,
    PortScan,
    Screenshot,
    DirFileFuzz,
    FetchUrl,
    VulnerabilityScan,
    Osint,
    #[serde(untagged)]
    Other(String),
}

/// One execution of the recon pipeline against a [`Target`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    pub id: ScanId,
    pub target: TargetId,
    /// Start of the run, in seconds since the unix epoch.
    pub started_at: u64,
    #[serde(default)]
    pub tasks: BTreeSet<ScanTask>,
}

impl Scan {
    pub fn ran(&self, task: &ScanTask) -> bool {
        self.tasks.contains(task)
    }
}

/// A discovered hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    pub id: AssetId,
    pub name: String,
    pub scan: ScanId,
    pub target: TargetId,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub http_status: Option<u16>,
}

/// A discovered URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: AssetId,
    pub http_url: String,
    pub scan: ScanId,
    pub target: TargetId,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub http_status: Option<u16>,
    #[serde(default)]
    pub is_alive: bool,
}

/// Selects which slice of the catalog a query runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every record ever discovered for a target.
    Target(TargetId),
    /// Only the records of one scan run.
    Scan(ScanId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Target(id) => id.fmt(f),
            Scope::Scan(id) => id.fmt(f),
        }
    }
}

/// Common view over [`Subdomain`] and [`Endpoint`] used by lookups.
pub trait Asset {
    fn id(&self) -> AssetId;
    /// Hostname for subdomains, URL for endpoints.
    fn locator(&self) -> &str;
    fn page_title(&self) -> Option<&str>;
    fn http_status(&self) -> Option<u16>;
}

impl Asset for Subdomain {
    fn id(&self) -> AssetId {
        self.id
    }

    fn locator(&self) -> &str {
        &self.name
    }

    fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    fn http_status(&self) -> Option<u16> {
        self.http_status
    }
}

impl Asset for Endpoint {
    fn id(&self) -> AssetId {
        self.id
    }

    fn locator(&self) -> &str {
        &self.http_url
    }

    fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    fn http_status(&self) -> Option<u16> {
        self.http_status
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
