//! Shared models and boundaries for `rekon`.
//!
//! * [`asset`]: targets, scans and the assets they discover.
//! * [`catalog`]: the [`AssetCatalog`](catalog::AssetCatalog) port and an in-memory adapter.
//! * [`policy`]: the keyword policy driving interesting-asset detection.
//! * [`url`]: URL normalization helpers.

pub mod asset;
pub mod catalog;
pub mod config;
pub mod error;
pub mod policy;
pub mod url;
