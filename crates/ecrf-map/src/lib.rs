//! Column-to-schema mapping for the eCRF column mapper.
//!
//! # Features
//!
//! - **Auto-match**: Resolve input headers to schema fields by normalized name
//! - **Overrides**: Set or clear the target of any column
//! - **Completeness**: Check that every required field is mapped
//! - **Schema Editing**: Add and remove fields on the working schema
//! - **Value Corrections**: Replace vendor vocabulary with study terms
//!
//! The mapping itself is an ordered `Vec<ColumnMapping>` with one entry per
//! input header. [`SchemaLookup`] is the read-only dictionary used to match
//! headers, and [`MappingState`] keeps both in sync for a session.

mod corrections;
mod error;
mod lookup;
mod matcher;
mod state;

// === Error Types ===
pub use error::{MappingError, Result};

// === Matching ===
pub use lookup::{SchemaLookup, normalize};
pub use matcher::{auto_match, is_complete, missing_required, set_mapping};

// === Session State ===
pub use state::{CUSTOM_FIELD_DESCRIPTION, MappingState, MappingSummary};

// === Value Corrections ===
pub use corrections::apply_value_corrections;
