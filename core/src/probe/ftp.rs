use async_trait::async_trait;
use reqwest::Method;
use rekon_protocols::ftp::ControlChannel;
use rekon_protocols::scheme::Scheme;
use tokio::net::TcpStream;
use tracing::trace;
use url::{Host, Url};

use super::{CheckFailure, ProtocolCheck};

/// FTP check: a positive greeting followed by a successful `NOOP`.
pub struct FtpCheck;

#[async_trait]
impl ProtocolCheck for FtpCheck {
    fn scheme(&self) -> Scheme {
        Scheme::Ftp
    }

    async fn run(
        &self,
        url: &Url,
        constructed: &str,
        _method: &Method,
    ) -> Result<String, CheckFailure> {
        let host: String = match url.host().ok_or(CheckFailure::MissingHost)? {
            Host::Domain(domain) => domain.to_string(),
            Host::Ipv4(ip) => ip.to_string(),
            Host::Ipv6(ip) => ip.to_string(),
        };
        let port: u16 = url.port().unwrap_or(Scheme::Ftp.default_port());

        let mut channel: ControlChannel<TcpStream> =
            ControlChannel::connect((host.as_str(), port)).await?;
        let greeting = channel.greeting().await?;
        let noop = channel.noop().await?;
        trace!(%greeting, %noop, "ftp handshake with {host}:{port}");
        channel.quit().await;

        Ok(constructed.to_string())
    }
}
