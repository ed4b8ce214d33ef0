//! Embedded catalog data.
//!
//! The default study catalog is compiled in with `include_str!()` so the tool
//! works without any configuration files.

/// Default study catalog (TOML).
pub const DEFAULT_CATALOG: &str = include_str!("../data/studies.toml");

/// Origin label used in error messages for the embedded catalog.
pub const DEFAULT_CATALOG_ORIGIN: &str = "<embedded>";
