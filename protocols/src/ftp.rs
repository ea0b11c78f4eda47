//! # FTP Control Channel
//!
//! Just enough of RFC 959 to tell whether something speaks FTP: read the
//! greeting, exchange `NOOP`, say `QUIT`. No login, no data connections.
//!
//! Replies are `<code><sep><text>` lines. A `-` separator opens a multi-line
//! reply that ends at the first line starting with the same code and a space.

use std::fmt;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::trace;

const MAX_REPLY_LINES: usize = 256;

#[derive(Debug, Error)]
pub enum FtpError {
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed by server")]
    Closed,
    #[error("malformed reply line: {0:?}")]
    Malformed(String),
    #[error("reply too long")]
    Oversized,
    #[error("server rejected the request: {0}")]
    Rejected(FtpReply),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpReply {
    pub code: u16,
    pub text: String,
}

impl FtpReply {
    /// First digit of the reply code (1 = preliminary, 2 = completion, ...).
    pub fn class(&self) -> u16 {
        self.code / 100
    }
}

impl fmt::Display for FtpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

/// Splits a reply line into its code, whether it continues, and the text.
pub fn parse_reply_line(line: &str) -> Result<(u16, bool, &str), FtpError> {
    let line: &str = line.trim_end_matches(['\r', '\n']);
    let malformed = || FtpError::Malformed(line.to_string());

    let code_str: &str = line.get(..3).ok_or_else(malformed)?;
    if !code_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let code: u16 = code_str.parse().map_err(|_| malformed())?;

    match line.as_bytes().get(3) {
        None => Ok((code, false, "")),
        Some(b' ') => Ok((code, false, &line[4..])),
        Some(b'-') => Ok((code, true, &line[4..])),
        Some(_) => Err(malformed()),
    }
}

pub struct ControlChannel<S> {
    stream: BufReader<S>,
}

impl ControlChannel<TcpStream> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, FtpError> {
        let stream: TcpStream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

impl<S> ControlChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Reads the welcome banner. Anything but a 1xx-3xx reply is a rejection.
    pub async fn greeting(&mut self) -> Result<FtpReply, FtpError> {
        let reply: FtpReply = self.read_reply().await?;
        match reply.class() {
            1..=3 => Ok(reply),
            _ => Err(FtpError::Rejected(reply)),
        }
    }

    /// Sends `NOOP` and expects a 2xx completion.
    pub async fn noop(&mut self) -> Result<FtpReply, FtpError> {
        let reply: FtpReply = self.command("NOOP").await?;
        match reply.class() {
            2 => Ok(reply),
            _ => Err(FtpError::Rejected(reply)),
        }
    }

    /// Sends `QUIT` and drops the connection whatever the answer.
    pub async fn quit(mut self) {
        let _ = self.command("QUIT").await;
    }

    pub async fn command(&mut self, cmd: &str) -> Result<FtpReply, FtpError> {
        trace!(cmd, "ftp >");
        let stream: &mut S = self.stream.get_mut();
        stream.write_all(format!("{cmd}\r\n").as_bytes()).await?;
        stream.flush().await?;
        self.read_reply().await
    }

    pub async fn read_reply(&mut self) -> Result<FtpReply, FtpError> {
        let first: String = self.read_line().await?;
        let (code, continues, text) = parse_reply_line(&first)?;
        let mut lines: Vec<String> = vec![text.to_string()];

        if continues {
            let terminator: String = format!("{code} ");
            loop {
                if lines.len() >= MAX_REPLY_LINES {
                    return Err(FtpError::Oversized);
                }
                let line: String = self.read_line().await?;
                let line: &str = line.trim_end_matches(['\r', '\n']);
                if let Some(last) = line.strip_prefix(&terminator) {
                    lines.push(last.to_string());
                    break;
                }
                if line == code.to_string() {
                    break;
                }
                lines.push(line.to_string());
            }
        }

        let reply = FtpReply {
            code,
            text: lines.join("\n"),
        };
        trace!(%reply, "ftp <");
        Ok(reply)
    }

    async fn read_line(&mut self) -> Result<String, FtpError> {
        let mut line: String = String::new();
        if self.stream.read_line(&mut line).await? == 0 {
            return Err(FtpError::Closed);
        }
        Ok(line)
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
