//! Study schema catalog for the eCRF column mapper.
//!
//! The catalog is static configuration: a TOML document listing studies and
//! their ordered schema fields, plus optional value-correction dictionaries.
//! A default catalog is embedded at compile time; alternatives can be loaded
//! from disk with [`Catalog::load`].
//!
//! # Example
//!
//! ```
//! use ecrf_standards::Catalog;
//!
//! let catalog = Catalog::embedded().unwrap();
//! let study = catalog.list_studies()[0];
//! let schema = catalog.select_study(study).unwrap();
//! assert!(schema.iter().any(|field| field.required));
//! ```

mod catalog;
mod corrections;
mod embedded;
mod error;

pub use catalog::{Catalog, Study};
pub use corrections::{CorrectionSet, ValueCorrection, ValueCorrections};
pub use embedded::{DEFAULT_CATALOG, DEFAULT_CATALOG_ORIGIN};
pub use error::{Result, StandardsError};
