//! Mapping session for the eCRF column mapper.
//!
//! Ties the pipeline crates together behind one owned state machine:
//!
//! ```text
//! file ─▶ ecrf-ingest ─▶ Table ─▶ ecrf-map ─▶ mapping ─▶ ecrf-validate ─▶ result
//!                                                    └──▶ ecrf-output ─▶ CSV
//! ```
//!
//! File reading is the only asynchronous step. A generation counter makes
//! sure only the most recently started load can commit.

mod error;
mod policy;
mod session;

// === Error Types ===
pub use error::{Result, SessionError};

// === Session ===
pub use policy::ExportPolicy;
pub use session::{ExportOptions, LoadOutcome, LoadTicket, PreparedExport, Session};
