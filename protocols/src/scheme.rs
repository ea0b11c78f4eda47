use std::fmt;
use std::str::FromStr;

use rekon_common::url::explicit_scheme;

/// Application protocols a liveness probe checks, in reporting priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scheme {
    Https,
    Http,
    Ftp,
}

impl Scheme {
    /// Every scheme, highest priority first.
    pub const PRIORITY: [Scheme; 3] = [Scheme::Https, Scheme::Http, Scheme::Ftp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
            Scheme::Ftp => "ftp",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Https => 443,
            Scheme::Http => 80,
            Scheme::Ftp => 21,
        }
    }

    /// Prefixes `input` with this scheme unless it already carries one.
    pub fn assume_for(&self, input: &str) -> String {
        if explicit_scheme(input).is_some() {
            input.to_string()
        } else {
            format!("{}://{}", self.as_str(), input)
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "https" => Ok(Scheme::Https),
            "http" => Ok(Scheme::Http),
            "ftp" => Ok(Scheme::Ftp),
            other => Err(format!("unsupported scheme: {other}")),
        }
    }
}
