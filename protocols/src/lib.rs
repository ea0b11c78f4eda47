//! Protocol plumbing used by the liveness probe.
//!
//! * [`scheme`]: the application protocols a target may answer on.
//! * [`ftp`]: a minimal FTP control-channel client.

pub mod ftp;
pub mod scheme;
