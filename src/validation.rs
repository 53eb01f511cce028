//! Form snapshot validation.
//!
//! [`validate`] checks a [`FormSnapshot`] against the rules the form enforces
//! before anything is sent to the calculation service. Every rule is
//! evaluated; violations are collected rather than short-circuited.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{RescisaoError, RescisaoResult};
use crate::models::FormSnapshot;

/// Salary is zero or negative.
pub const SALARY_NOT_POSITIVE: &str = "salary must be greater than zero";

/// Admission date falls after the termination date.
pub const ADMISSION_AFTER_TERMINATION: &str = "admission date cannot be after termination date";

/// Termination date is later than today.
pub const TERMINATION_IN_FUTURE: &str = "termination date cannot be in the future";

/// An extra-compensation amount is zero or negative.
pub const EXTRA_AMOUNT_NOT_POSITIVE: &str = "extra-compensation amount must be greater than zero";

/// An extra-compensation quantity is zero or negative.
pub const EXTRA_QUANTITY_NOT_POSITIVE: &str =
    "extra-compensation quantity must be greater than zero";

/// An extra-compensation month is outside 1..=12.
pub const EXTRA_MONTH_OUT_OF_RANGE: &str = "extra-compensation month must be between 1 and 12";

/// Two extra-compensation records share a month.
pub const DUPLICATE_EXTRA_MONTH: &str =
    "duplicate extra-compensation entries for the same month are not allowed";

/// Validates `snapshot` as of `today`.
///
/// Returns every rule violation in evaluation order; an empty vector means
/// the snapshot may be submitted. Per-record rules report once per offending
/// record, the duplicate-month rule reports once in total.
///
/// # Example
///
/// ```
/// use rescisao_client::models::{FormSnapshot, NoticeType, TerminationReason};
/// use rescisao_client::validation::{validate, ADMISSION_AFTER_TERMINATION};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = FormSnapshot {
///     salary: Decimal::new(3000, 0),
///     admission_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     termination_reason: TerminationReason::DismissalWithoutCause,
///     notice_type: NoticeType::Indemnified,
///     is_disability_protected: false,
///     extra_compensation: vec![],
/// };
/// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// assert_eq!(validate(&snapshot, today), vec![ADMISSION_AFTER_TERMINATION.to_string()]);
/// ```
pub fn validate(snapshot: &FormSnapshot, today: NaiveDate) -> Vec<String> {
    let mut errors = Vec::new();

    if snapshot.salary <= Decimal::ZERO {
        errors.push(SALARY_NOT_POSITIVE.to_string());
    }

    if snapshot.admission_date > snapshot.termination_date {
        errors.push(ADMISSION_AFTER_TERMINATION.to_string());
    }

    if snapshot.termination_date > today {
        errors.push(TERMINATION_IN_FUTURE.to_string());
    }

    let records = &snapshot.extra_compensation;
    if records.is_empty() {
        return errors;
    }

    let mut months = HashSet::with_capacity(records.len());
    for record in records {
        if record.amount <= Decimal::ZERO {
            errors.push(EXTRA_AMOUNT_NOT_POSITIVE.to_string());
        }
        if record.quantity <= Decimal::ZERO {
            errors.push(EXTRA_QUANTITY_NOT_POSITIVE.to_string());
        }
        if !(1..=12).contains(&record.month) {
            errors.push(EXTRA_MONTH_OUT_OF_RANGE.to_string());
        }
        months.insert(record.month);
    }

    if months.len() < records.len() {
        errors.push(DUPLICATE_EXTRA_MONTH.to_string());
    }

    errors
}

/// Like [`validate`], but as a `Result`: every violation is carried in a
/// single `Validation` error.
pub fn ensure_valid(snapshot: &FormSnapshot, today: NaiveDate) -> RescisaoResult<()> {
    let errors = validate(snapshot, today);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RescisaoError::Validation { errors })
    }
}
