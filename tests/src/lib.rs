//! End-to-end checks of the rekon engines against local fake services and
//! JSON catalog exports.

pub mod fixtures;

#[cfg(test)]
mod liveness {
    mod integration;
}

#[cfg(test)]
mod catalog_flows {
    mod integration;
}
