pub mod diff;
pub mod interesting;
pub mod list;
pub mod probe;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rekon_common::asset::{AssetId, Scope, ScanId, TargetId};
use rekon_common::config::{LookupConfig, ProbeConfig};
use rekon_common::policy::parse_keywords;
use rekon_core::probe::DEFAULT_METHOD;

#[derive(Parser)]
#[command(name = "rekon")]
#[command(about = "Asset intelligence over recon scan history.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: once drops decorations, twice prints results only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// More log output, repeat for trace level
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the protocols one or more hosts answer on
    #[command(alias = "p")]
    Probe(ProbeArgs),
    /// Show what a scan added and removed compared with the previous one
    #[command(alias = "d")]
    Diff(DiffArgs),
    /// Flag subdomains and endpoints matching the lookup keywords
    #[command(alias = "i")]
    Interesting(InterestingArgs),
    /// List hostnames or URLs of a target, one per line
    #[command(alias = "l")]
    List(ListArgs),
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Hosts or URLs, e.g. `example.com`, `10.0.0.1:8080`, `ftp://files.example.com`
    #[arg(required_unless_present = "input")]
    pub targets: Vec<String>,

    /// Read additional targets from a file, one per line
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// HTTP method of the HTTP(S) checks
    #[arg(short, long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Report only the highest-priority URL per host
    #[arg(long)]
    pub first: bool,

    /// Seconds each protocol check may take
    #[arg(short, long, default_value = "10", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Hosts probed at the same time
    #[arg(short, long, default_value_t = 16)]
    pub concurrency: usize,

    #[arg(long)]
    pub follow_redirects: bool,

    /// Treat untrusted TLS certificates as a failed HTTPS check
    #[arg(long)]
    pub strict_tls: bool,

    /// Route HTTP(S) checks through a proxy; repeat to rotate randomly per host
    #[arg(long = "proxy")]
    pub proxies: Vec<String>,
}

impl ProbeArgs {
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            timeout: self.timeout,
            follow_redirects: self.follow_redirects,
            accept_invalid_certs: !self.strict_tls,
            use_proxy: !self.proxies.is_empty(),
            proxies: self.proxies.clone(),
            ..ProbeConfig::default()
        }
    }
}

/// Positive, finite number of seconds.
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if secs <= 0.0 {
        return Err(format!("{value} is not a positive number of seconds"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{value}: {e}"))
}

#[derive(Args)]
pub struct CatalogArgs {
    /// JSON export of the asset catalog
    #[arg(long)]
    pub catalog: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[arg(long)]
    pub target: u64,

    /// Reference scan, compared with the scan before it
    #[arg(long)]
    pub scan: u64,

    /// Also compare the endpoints of both scans
    #[arg(long)]
    pub endpoints: bool,

    /// Include interesting assets of the reference scan in the summary
    #[arg(long)]
    pub lookup: bool,

    #[command(flatten)]
    pub keywords: LookupArgs,
}

impl DiffArgs {
    pub fn ids(&self) -> (TargetId, ScanId) {
        (TargetId(self.target), ScanId(self.scan))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetKind {
    Subdomains,
    Endpoints,
    All,
}

#[derive(Args)]
pub struct InterestingArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[arg(long, conflicts_with = "scan", required_unless_present = "scan")]
    pub target: Option<u64>,

    #[arg(long)]
    pub scan: Option<u64>,

    #[command(flatten)]
    pub keywords: LookupArgs,

    #[arg(long, value_enum, default_value_t = AssetKind::All)]
    pub kind: AssetKind,
}

/// Keyword lookup flags shared by `interesting` and `diff --lookup`.
#[derive(Args)]
pub struct LookupArgs {
    /// Comma separated keywords added to the defaults
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Use only the keywords given with --keywords
    #[arg(long)]
    pub no_defaults: bool,

    /// Do not match keywords against hostnames and URLs
    #[arg(long)]
    pub no_name: bool,

    /// Do not match keywords against page titles
    #[arg(long)]
    pub no_title: bool,

    /// Only consider assets that answered 200
    #[arg(long)]
    pub only_200: bool,
}

impl InterestingArgs {
    pub fn scope(&self) -> Scope {
        match self.scan {
            Some(scan) => Scope::Scan(ScanId(scan)),
            None => Scope::Target(TargetId(self.target.unwrap_or_default())),
        }
    }
}

impl LookupArgs {
    pub fn lookup_config(&self) -> LookupConfig {
        let defaults: LookupConfig = LookupConfig::default();
        LookupConfig {
            default_keywords: match self.no_defaults {
                true => Vec::new(),
                false => defaults.default_keywords,
            },
            custom_keywords: self.keywords.as_deref().map(parse_keywords),
            match_name: !self.no_name,
            match_title: !self.no_title,
            http_200_only: self.only_200,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Subdomains,
    Urls,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[arg(long)]
    pub target: u64,

    /// Restrict to one scan
    #[arg(long)]
    pub scan: Option<u64>,

    #[arg(long, value_enum, default_value_t = ListKind::Subdomains)]
    pub kind: ListKind,

    /// Restrict to one subdomain record
    #[arg(long)]
    pub subdomain: Option<u64>,

    /// Only the root domain of the target
    #[arg(long)]
    pub root_only: bool,

    /// Path appended to hostnames, or required in URLs
    #[arg(long)]
    pub path: Option<String>,

    /// Only URLs of endpoints that were alive
    #[arg(long)]
    pub alive: bool,

    /// Skip URLs ending with this extension, e.g. `.png`
    #[arg(long = "ignore-ext")]
    pub ignore_extensions: Vec<String>,

    /// Write the list to a file instead of the terminal
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ListArgs {
    pub fn scan_id(&self) -> Option<ScanId> {
        self.scan.map(ScanId)
    }

    pub fn subdomain_id(&self) -> Option<AssetId> {
        self.subdomain.map(AssetId)
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
