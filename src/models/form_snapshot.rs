//! Form snapshot model and the enumerations it carries.
//!
//! A [`FormSnapshot`] is the typed unit the pipeline validates, fingerprints
//! and sends to the calculation service. Its serde shape is the service's
//! wire format, so field names follow the service rather than Rust naming.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RescisaoError, RescisaoResult};

use super::stored::StoredSnapshot;
use super::ExtraCompensationRecord;

/// Why the employment contract ended.
///
/// Each category carries different legal consequences (FGTS fine
/// percentage, disability indemnity eligibility), so the set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Dismissal without just cause.
    #[serde(rename = "demissao-sem-justa-causa")]
    DismissalWithoutCause,
    /// Dismissal for just cause.
    #[serde(rename = "demissao-com-justa-causa")]
    DismissalForCause,
    /// Resignation requested by the employee.
    #[serde(rename = "pedido-demissao")]
    Resignation,
    /// Constructive dismissal (employer fault).
    #[serde(rename = "rescisao-indireta")]
    ConstructiveDismissal,
    /// Both parties at fault.
    #[serde(rename = "culpa-reciproca")]
    MutualFault,
    /// End of a fixed-term contract.
    #[serde(rename = "termino-contrato")]
    ContractEnd,
}

impl TerminationReason {
    /// All reasons, in selector order.
    pub const ALL: [TerminationReason; 6] = [
        TerminationReason::DismissalWithoutCause,
        TerminationReason::DismissalForCause,
        TerminationReason::Resignation,
        TerminationReason::ConstructiveDismissal,
        TerminationReason::MutualFault,
        TerminationReason::ContractEnd,
    ];

    /// The code the calculation service expects.
    pub fn code(self) -> &'static str {
        match self {
            Self::DismissalWithoutCause => "demissao-sem-justa-causa",
            Self::DismissalForCause => "demissao-com-justa-causa",
            Self::Resignation => "pedido-demissao",
            Self::ConstructiveDismissal => "rescisao-indireta",
            Self::MutualFault => "culpa-reciproca",
            Self::ContractEnd => "termino-contrato",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TerminationReason {
    type Err = RescisaoError;

    fn from_str(s: &str) -> RescisaoResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|reason| reason.code() == wanted)
            .ok_or_else(|| RescisaoError::InvalidInput {
                field: "termination_reason".to_string(),
                message: format!("unknown termination reason '{}'", wanted),
            })
    }
}

/// How the notice period is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoticeType {
    /// Paid in lieu of notice.
    #[default]
    #[serde(rename = "indenizado")]
    Indemnified,
    /// Notice period worked.
    #[serde(rename = "trabalhado")]
    Worked,
    /// Reduced notice.
    #[serde(rename = "reduzido")]
    Reduced,
}

impl NoticeType {
    /// The code the calculation service expects.
    pub fn code(self) -> &'static str {
        match self {
            Self::Indemnified => "indenizado",
            Self::Worked => "trabalhado",
            Self::Reduced => "reduzido",
        }
    }
}

impl fmt::Display for NoticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NoticeType {
    type Err = RescisaoError;

    fn from_str(s: &str) -> RescisaoResult<Self> {
        match s.trim() {
            // The service treats a missing notice type as paid in lieu.
            "" | "indenizado" => Ok(Self::Indemnified),
            "trabalhado" => Ok(Self::Worked),
            "reduzido" => Ok(Self::Reduced),
            other => Err(RescisaoError::InvalidInput {
                field: "notice_type".to_string(),
                message: format!("unknown notice type '{}'", other),
            }),
        }
    }
}

/// The typed form contents submitted for one calculation.
///
/// Field order is significant: it fixes the request body and, through
/// [`canonical_json`](FormSnapshot::canonical_json), the cache fingerprint.
///
/// # Example
///
/// ```
/// use rescisao_client::models::{FormSnapshot, NoticeType, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = FormSnapshot {
///     salary: Decimal::new(3000, 0),
///     admission_date: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     termination_reason: TerminationReason::DismissalWithoutCause,
///     notice_type: NoticeType::Indemnified,
///     is_disability_protected: false,
///     extra_compensation: vec![],
/// };
/// assert!(snapshot.canonical_json().unwrap().starts_with("{\"salary\":\"3000\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// Monthly salary.
    #[serde(rename = "salario", with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    /// First day of employment.
    #[serde(rename = "data_admissao")]
    pub admission_date: NaiveDate,
    /// Last day of employment.
    #[serde(rename = "data_demissao")]
    pub termination_date: NaiveDate,
    /// Why the contract ended.
    #[serde(rename = "motivo")]
    pub termination_reason: TerminationReason,
    /// How the notice period is honored.
    #[serde(rename = "aviso_previo")]
    pub notice_type: NoticeType,
    /// Whether the employee is a person with a disability (PCD).
    #[serde(rename = "is_pcd")]
    pub is_disability_protected: bool,
    /// Monthly extra-compensation entries, in the order the user sees them.
    #[serde(rename = "horas_extras", default)]
    pub extra_compensation: Vec<ExtraCompensationRecord>,
}

impl FormSnapshot {
    /// Serializes the snapshot into its stable JSON form.
    ///
    /// Amounts are written as normalized decimal strings rather than the
    /// wire's floats, so distinct values never collide and equal values
    /// written with a different scale (`3000` and `3000.00`) match.
    pub fn canonical_json(&self) -> RescisaoResult<String> {
        serde_json::to_string(&StoredSnapshot::from(self).normalized()).map_err(|e| RescisaoError::InvalidInput {
            field: "form".to_string(),
            message: format!("snapshot cannot be serialized: {}", e),
        })
    }
}
