use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, Proxy, Response};
use rekon_common::config::ProbeConfig;
use rekon_protocols::scheme::Scheme;
use url::Url;

use super::{CheckFailure, ProbeError, ProtocolCheck};

const MAX_REDIRECTS: usize = 10;

/// HTTP or HTTPS check. Any completed response counts, whatever its status.
pub struct HttpCheck {
    scheme: Scheme,
    client: Client,
}

impl HttpCheck {
    pub fn new(scheme: Scheme, client: Client) -> Self {
        Self { scheme, client }
    }
}

#[async_trait]
impl ProtocolCheck for HttpCheck {
    fn scheme(&self) -> Scheme {
        self.scheme
    }

    async fn run(
        &self,
        url: &Url,
        _constructed: &str,
        method: &Method,
    ) -> Result<String, CheckFailure> {
        let response: Response = self
            .client
            .request(method.clone(), url.clone())
            .send()
            .await?;
        Ok(response.url().to_string())
    }
}

pub fn build_client(cfg: &ProbeConfig, proxy: Option<&str>) -> Result<Client, ProbeError> {
    let redirect: Policy = if cfg.follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    let builder = Client::builder()
        .timeout(cfg.timeout)
        .connect_timeout(cfg.timeout)
        .danger_accept_invalid_certs(cfg.accept_invalid_certs)
        .user_agent(cfg.user_agent.as_str())
        .redirect(redirect);

    let builder = match proxy {
        Some(proxy) => {
            let proxy_cfg: Proxy = Proxy::all(proxy).map_err(|source| ProbeError::InvalidProxy {
                proxy: proxy.to_string(),
                source,
            })?;
            builder.proxy(proxy_cfg)
        }
        None => builder.no_proxy(),
    };

    builder.build().map_err(ProbeError::Client)
}
