use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rekon_common::catalog::memory::InMemoryCatalog;
use rekon_common::config::ProbeConfig;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::{self, ServerConfig};
use tokio_rustls::rustls::pki_types::pem::PemObject;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};

/// Self-signed certificate for `localhost` / `127.0.0.1`.
const LOCALHOST_CERT: &str = include_str!("../certs/localhost.crt");
const LOCALHOST_KEY: &str = include_str!("../certs/localhost.key");

/// First byte of a TLS handshake record.
const TLS_HANDSHAKE: u8 = 0x16;

/// Probe settings for local fakes: short timeout, no proxies.
pub fn local_probe_config() -> ProbeConfig {
    ProbeConfig {
        timeout: Duration::from_millis(1500),
        ..ProbeConfig::default()
    }
}

async fn bind_local() -> anyhow::Result<(TcpListener, SocketAddr)> {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    Ok((listener, addr))
}

/// Plain HTTP server answering every request with an empty `200 OK`.
pub async fn http_server() -> anyhow::Result<SocketAddr> {
    let (listener, addr) = bind_local().await?;
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(answer_http(stream));
        }
    });
    Ok(addr)
}

async fn answer_http<S: AsyncRead + AsyncWrite + Unpin>(mut stream: S) {
    let mut buf = [0u8; 4096];
    if stream.read(&mut buf).await.is_err() {
        return;
    }
    let _ = stream
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
        .await;
    let _ = stream.shutdown().await;
}

/// Serves HTTPS and plain HTTP on the same port, told apart by the first byte
/// the client sends.
pub async fn https_and_http_server() -> anyhow::Result<SocketAddr> {
    let acceptor: TlsAcceptor = localhost_acceptor()?;
    let (listener, addr) = bind_local().await?;
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor: TlsAcceptor = acceptor.clone();
            tokio::spawn(async move {
                let mut first = [0u8; 1];
                match stream.peek(&mut first).await {
                    Ok(1) if first[0] == TLS_HANDSHAKE => {
                        if let Ok(tls) = acceptor.accept(stream).await {
                            answer_http(tls).await;
                        }
                    }
                    Ok(1) => answer_http(stream).await,
                    _ => {}
                }
            });
        }
    });
    Ok(addr)
}

fn localhost_acceptor() -> anyhow::Result<TlsAcceptor> {
    let cert = CertificateDer::from_pem_slice(LOCALHOST_CERT.as_bytes())
        .map_err(|e| anyhow::anyhow!("bad test certificate: {e:?}"))?;
    let key = PrivateKeyDer::from_pem_slice(LOCALHOST_KEY.as_bytes())
        .map_err(|e| anyhow::anyhow!("bad test key: {e:?}"))?;

    let config: ServerConfig =
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()?
            .with_no_client_auth()
            .with_single_cert(vec![cert], key)?;
    Ok(TlsAcceptor::from(Arc::new(config)))
}

/// Minimal FTP control channel: greets, accepts `NOOP` and `QUIT`.
pub async fn ftp_server() -> anyhow::Result<SocketAddr> {
    let (listener, addr) = bind_local().await?;
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(answer_ftp(stream));
        }
    });
    Ok(addr)
}

async fn answer_ftp(stream: TcpStream) {
    let (read, mut write) = stream.into_split();
    if write.write_all(b"220 rekon test server ready\r\n").await.is_err() {
        return;
    }

    let mut lines = BufReader::new(read).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let reply: &[u8] = match line.trim().to_ascii_uppercase().as_str() {
            "NOOP" => b"200 NOOP ok\r\n",
            "QUIT" => b"221 Goodbye\r\n",
            _ => b"502 Command not implemented\r\n",
        };
        if write.write_all(reply).await.is_err() || reply.starts_with(b"221") {
            return;
        }
    }
}

/// Accepts connections and never sends a byte.
pub async fn silent_server() -> anyhow::Result<SocketAddr> {
    let (listener, addr) = bind_local().await?;
    tokio::spawn(async move {
        let mut held: Vec<TcpStream> = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    Ok(addr)
}

/// An address nothing listens on.
pub async fn closed_port() -> anyhow::Result<SocketAddr> {
    let (listener, addr) = bind_local().await?;
    drop(listener);
    Ok(addr)
}

/// Scan history of `example.com`:
///
/// | scan | tasks                            | subdomains             |
/// |------|----------------------------------|------------------------|
/// | 1    | subdomain_discovery, fetch_url   | a, b, c                |
/// | 2    | port_scan                        | (none)                 |
/// | 3    | subdomain_discovery, fetch_url   | b, c, d, admin         |
///
/// Target 2 (`other.org`) has a single scan 4.
pub const CATALOG_JSON: &str = r#"{
  "targets": [
    { "id": 1, "name": "example.com" },
    { "id": 2, "name": "other.org" }
  ],
  "scans": [
    { "id": 1, "target": 1, "started_at": 1700000000, "tasks": ["subdomain_discovery", "fetch_url"] },
    { "id": 2, "target": 1, "started_at": 1700100000, "tasks": ["port_scan"] },
    { "id": 3, "target": 1, "started_at": 1700200000, "tasks": ["subdomain_discovery", "fetch_url"] },
    { "id": 4, "target": 2, "started_at": 1700300000, "tasks": ["subdomain_discovery"] }
  ],
  "subdomains": [
    { "id": 1, "name": "a.example.com", "scan": 1, "target": 1 },
    { "id": 2, "name": "b.example.com", "scan": 1, "target": 1 },
    { "id": 3, "name": "c.example.com", "scan": 1, "target": 1, "page_title": "Smart Homepage", "http_status": 200 },
    { "id": 4, "name": "b.example.com", "scan": 3, "target": 1 },
    { "id": 5, "name": "c.example.com", "scan": 3, "target": 1, "page_title": "Smart Homepage", "http_status": 200 },
    { "id": 6, "name": "d.example.com", "scan": 3, "target": 1, "page_title": "Local Art Museum", "http_status": 200 },
    { "id": 7, "name": "admin.example.com", "scan": 3, "target": 1, "http_status": 403 },
    { "id": 8, "name": "vpn.other.org", "scan": 4, "target": 2 }
  ],
  "endpoints": [
    { "id": 20, "http_url": "https://a.example.com/login", "scan": 1, "target": 1, "http_status": 200, "is_alive": true },
    { "id": 21, "http_url": "https://b.example.com/", "scan": 1, "target": 1, "http_status": 200, "is_alive": true },
    { "id": 22, "http_url": "https://b.example.com/", "scan": 3, "target": 1, "http_status": 200, "is_alive": true },
    { "id": 23, "http_url": "https://d.example.com/backup.zip", "scan": 3, "target": 1, "http_status": 404, "is_alive": false }
  ]
}"#;

pub fn catalog() -> anyhow::Result<InMemoryCatalog> {
    Ok(InMemoryCatalog::from_reader(CATALOG_JSON.as_bytes())?)
}
