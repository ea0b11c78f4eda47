use rekon_common::config::ProbeConfig;

/// Proxies the user allowed the probe to go through.
#[derive(Debug, Clone, Default)]
pub struct ProxyPool {
    proxies: Vec<String>,
}

impl ProxyPool {
    /// An empty pool unless proxying is switched on. Blank entries are dropped.
    pub fn from_config(cfg: &ProbeConfig) -> Self {
        if !cfg.use_proxy {
            return Self::default();
        }
        Self {
            proxies: cfg
                .proxies
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// What each probe may be routed through: every proxy in the pool, or a
    /// single direct connection (`None`) when the pool is empty.
    pub fn routes(&self) -> Vec<Option<&str>> {
        if self.proxies.is_empty() {
            return vec![None];
        }
        self.proxies.iter().map(|p| Some(p.as_str())).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
