//! Domain types and ports shared by the order service crates.

pub mod domain;
pub mod ports;
