//! Configuration for brackt.
//!
//! See [`global`] for the file format and lookup order.

pub mod global;

pub use global::{CONFIG_ENV_VAR, CacheConfig, Config};
