//! # rekon core
//!
//! Asset-intelligence operations over a recon scan history.
//!
//! * **[`reconcile`]**: what appeared or vanished since the previous scan.
//! * **[`interest`]**: which assets match the user's keyword policy.
//! * **[`probe`]**: which of HTTPS, HTTP and FTP a host answers on.
//!
//! ## Helper Modules
//! * **[`inventory`]**: flat hostname / URL listings for feeding external tools.
//! * **[`digest`]**: plain-text summaries for the notification layer.

pub mod digest;
pub mod interest;
pub mod inventory;
pub mod probe;
pub mod reconcile;
