//! Calculation result models.
//!
//! This module contains the [`ResultRecord`] returned by the calculation
//! service and the [`CalculationResponse`] envelope it arrives in. Both use
//! the service's field names on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RescisaoError, RescisaoResult};

/// Supporting figures the service reports alongside the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationDetails {
    /// Whole months between admission and termination.
    #[serde(rename = "meses_trabalhados")]
    pub months_worked: u32,
    /// Days counted in the termination month.
    #[serde(rename = "dias_trabalhados_mes")]
    pub days_worked_in_month: u32,
}

/// The severance breakdown computed by the remote service.
///
/// Treated as immutable once received. Optional components are omitted
/// from rendering entirely when absent.
///
/// # Example
///
/// ```
/// use rescisao_client::models::ResultRecord;
///
/// let record: ResultRecord = serde_json::from_str(r#"{
///     "saldo_salario": 1000.0,
///     "ferias_proporcionais": 2666.67,
///     "decimo_terceiro": 2500.0,
///     "aviso_previo": 3000.0,
///     "multa_fgts": 0.0,
///     "media_horas_extras": 0.0,
///     "total_geral": 9166.67
/// }"#).unwrap();
/// assert!(record.disability_indemnity.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Salary owed for the days worked in the final month.
    #[serde(rename = "saldo_salario", with = "rust_decimal::serde::float")]
    pub balance_of_salary: Decimal,
    /// Proportional vacation plus the constitutional third.
    #[serde(rename = "ferias_proporcionais", with = "rust_decimal::serde::float")]
    pub proportional_vacation: Decimal,
    /// Vacation periods already acquired but not taken, plus one third.
    #[serde(
        rename = "ferias_vencidas",
        with = "rust_decimal::serde::float_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub overdue_vacation: Option<Decimal>,
    /// Proportional 13th salary.
    #[serde(rename = "decimo_terceiro", with = "rust_decimal::serde::float")]
    pub thirteenth_salary: Decimal,
    /// Notice period pay.
    #[serde(rename = "aviso_previo", with = "rust_decimal::serde::float")]
    pub notice_pay: Decimal,
    /// FGTS fine.
    #[serde(rename = "multa_fgts", with = "rust_decimal::serde::float")]
    pub fgts_fine: Decimal,
    /// Indemnity owed to employees with a disability, when applicable.
    #[serde(
        rename = "indenizacao_pcd",
        with = "rust_decimal::serde::float_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disability_indemnity: Option<Decimal>,
    /// Monthly average of the extra compensation.
    #[serde(rename = "media_horas_extras", with = "rust_decimal::serde::float")]
    pub average_extra_compensation: Decimal,
    /// Deductions, rendered as a negative line.
    #[serde(
        rename = "total_descontos",
        with = "rust_decimal::serde::float_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_deductions: Option<Decimal>,
    /// Sum of every component.
    #[serde(rename = "total_geral", with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    /// Supporting figures, copied from the response envelope.
    #[serde(rename = "detalhes", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CalculationDetails>,
}

/// The envelope the calculation service answers with.
///
/// Success: `{"sucesso": true, "verbas": {...}, "detalhes": {...}}`.
/// Failure: `{"sucesso": false, "erro": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The success indicator; absence counts as failure.
    #[serde(rename = "sucesso", default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// The breakdown, present on success.
    #[serde(rename = "verbas", default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ResultRecord>,
    /// Supporting figures, present on success.
    #[serde(rename = "detalhes", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CalculationDetails>,
    /// Explanatory message, present on failure.
    #[serde(rename = "erro", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    /// Builds a success envelope around `record`.
    pub fn success(record: ResultRecord) -> Self {
        let details = record.details.clone();
        Self {
            success: Some(true),
            breakdown: Some(ResultRecord {
                details: None,
                ..record
            }),
            details,
            error: None,
        }
    }

    /// Builds a failure envelope carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            breakdown: None,
            details: None,
            error: Some(message.into()),
        }
    }

    /// Converts the envelope into the result it carries.
    ///
    /// A logical failure with a message becomes `ServerReported`; a payload
    /// without the success indicator or breakdown becomes a generic
    /// communication error.
    pub fn into_result(self) -> RescisaoResult<ResultRecord> {
        match (self.success, self.breakdown) {
            (Some(true), Some(mut record)) => {
                if self.details.is_some() {
                    record.details = self.details;
                }
                Ok(record)
            }
            _ => match self.error {
                Some(message) if !message.trim().is_empty() => {
                    Err(RescisaoError::ServerReported { message })
                }
                _ => Err(RescisaoError::communication(None)),
            },
        }
    }
}
