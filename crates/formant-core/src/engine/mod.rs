//! The evaluation engine: derivation and validation.
//!
//! Both halves are pure and synchronous. Derivation refreshes computed
//! fields from their sources; validation checks a value against its field's
//! declared rules. Neither ever throws: failures are data, reported as
//! sentinel values or messages.

mod derive;
mod patterns;
mod validate;

pub use derive::{derive_all, derive_all_at, INVALID_DATE};
pub use validate::{validate_field, validate_form};
