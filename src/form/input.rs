//! Static form fields and snapshot collection.

use chrono::NaiveDate;

use crate::error::{RescisaoError, RescisaoResult};
use crate::models::{FormSnapshot, NoticeType, TerminationReason};

use super::{parse_amount, ExtraCompensationList};

/// Date format used by the form's date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The static form fields, exactly as the user left them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Monthly salary.
    pub salary: String,
    /// Admission date, `YYYY-MM-DD`.
    pub admission_date: String,
    /// Termination date, `YYYY-MM-DD`.
    pub termination_date: String,
    /// Termination reason code from the selector.
    pub termination_reason: String,
    /// Notice type code from the selector.
    pub notice_type: String,
    /// Raw disability checkbox value; `None` when unchecked.
    pub disability_checkbox: Option<String>,
}

/// Normalizes a checkbox value to a boolean.
///
/// ```
/// use rescisao_client::form::is_checked;
///
/// assert!(is_checked(Some("on")));
/// assert!(!is_checked(Some("off")));
/// assert!(!is_checked(None));
/// ```
pub fn is_checked(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        )
    })
}

impl FormInput {
    /// Merges the static fields with the current extra-compensation entries
    /// into a typed snapshot.
    ///
    /// Only type coercion happens here. Malformed numbers become zero and are
    /// rejected later by validation; dates and selector codes that cannot be
    /// represented at all return `InvalidInput`.
    pub fn collect(&self, extras: &ExtraCompensationList) -> RescisaoResult<FormSnapshot> {
        Ok(FormSnapshot {
            salary: parse_amount(&self.salary),
            admission_date: parse_date("admission_date", &self.admission_date)?,
            termination_date: parse_date("termination_date", &self.termination_date)?,
            termination_reason: self.termination_reason.parse::<TerminationReason>()?,
            notice_type: self.notice_type.parse::<NoticeType>()?,
            is_disability_protected: is_checked(self.disability_checkbox.as_deref()),
            extra_compensation: extras.collect(),
        })
    }
}

fn parse_date(field: &str, raw: &str) -> RescisaoResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| RescisaoError::InvalidInput {
        field: field.to_string(),
        message: format!("{} must be a date in YYYY-MM-DD format", field.replace('_', " ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ExtraCompensationField;
    use rust_decimal::Decimal;

    fn filled_input() -> FormInput {
        FormInput {
            salary: "3000".to_string(),
            admission_date: "2023-01-10".to_string(),
            termination_date: "2024-01-10".to_string(),
            termination_reason: "demissao-sem-justa-causa".to_string(),
            notice_type: "indenizado".to_string(),
            disability_checkbox: None,
        }
    }

    #[test]
    fn test_collect_builds_typed_snapshot() {
        let mut extras = ExtraCompensationList::new();
        extras.push(ExtraCompensationField::new("5", "10", "500"));

        let mut input = filled_input();
        input.disability_checkbox = Some("on".to_string());

        let snapshot = input.collect(&extras).unwrap();
        assert_eq!(snapshot.salary, Decimal::new(3000, 0));
        assert_eq!(
            snapshot.admission_date,
            NaiveDate::from_ymd_opt(2023, 1, 10).unwrap()
        );
        assert_eq!(
            snapshot.termination_reason,
            TerminationReason::DismissalWithoutCause
        );
        assert_eq!(snapshot.notice_type, NoticeType::Indemnified);
        assert!(snapshot.is_disability_protected);
        assert_eq!(snapshot.extra_compensation.len(), 1);
        assert_eq!(snapshot.extra_compensation[0].month, 5);
    }

    #[test]
    fn test_blank_salary_coerces_to_zero() {
        let mut input = filled_input();
        input.salary = "  ".to_string();

        let snapshot = input.collect(&ExtraCompensationList::new()).unwrap();
        assert_eq!(snapshot.salary, Decimal::ZERO);
    }

    #[test]
    fn test_malformed_date_is_invalid_input() {
        let mut input = filled_input();
        input.termination_date = "10/01/2024".to_string();

        match input.collect(&ExtraCompensationList::new()) {
            Err(RescisaoError::InvalidInput { field, message }) => {
                assert_eq!(field, "termination_date");
                assert_eq!(message, "termination date must be a date in YYYY-MM-DD format");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_reason_is_invalid_input() {
        let mut input = filled_input();
        input.termination_reason = String::new();

        assert!(matches!(
            input.collect(&ExtraCompensationList::new()),
            Err(RescisaoError::InvalidInput { ref field, .. }) if field == "termination_reason"
        ));
    }

    #[test]
    fn test_unchecked_checkbox_values() {
        assert!(!is_checked(Some("")));
        assert!(is_checked(Some(" TRUE ")));
        assert!(is_checked(Some("1")));
    }
}
