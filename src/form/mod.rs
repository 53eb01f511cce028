//! Raw form state and its coercion into a [`FormSnapshot`](crate::models::FormSnapshot).
//!
//! [`FormInput`] holds the static fields exactly as typed; the
//! [`ExtraCompensationList`] holds the variable set of monthly entries.
//! Collecting merges the two with type coercion only, leaving semantic
//! checks to the validator.

mod extra_fields;
mod input;

pub use extra_fields::{ExtraCompensationField, ExtraCompensationList, RecordHandle};
pub use input::{is_checked, FormInput};

use rust_decimal::Decimal;

/// Parses a numeric field, falling back to zero for blank or malformed text.
///
/// Zero is then rejected by whichever validation rule covers the field.
pub(crate) fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}
