//! Validation of mapped rows for the eCRF column mapper.
//!
//! Two rule families run per row:
//!
//! - **Required**: every required field must be mapped and non-empty
//! - **Type**: non-empty values of `date` and `number` fields must coerce
//!
//! Findings are data, returned in a [`ValidationResult`]; the validator
//! never fails. All string-to-type coercion lives in [`coerce`].

pub mod coerce;
mod validator;

pub use validator::{validate, validate_row};
