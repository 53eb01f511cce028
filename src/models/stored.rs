//! Exact-decimal forms of the models, for cache keys and cache storage.
//!
//! The wire format sends amounts as JSON floats, which cannot hold every
//! `Decimal`. Everything the cache keeps or compares goes through these
//! shapes instead, with amounts written as decimal strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    CacheEntry, CalculationDetails, ExtraCompensationRecord, FormSnapshot, NoticeType,
    ResultRecord, TerminationReason,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredExtra {
    month: u32,
    #[serde(with = "rust_decimal::serde::str")]
    quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredSnapshot {
    #[serde(with = "rust_decimal::serde::str")]
    salary: Decimal,
    admission_date: NaiveDate,
    termination_date: NaiveDate,
    termination_reason: TerminationReason,
    notice_type: NoticeType,
    is_disability_protected: bool,
    extra_compensation: Vec<StoredExtra>,
}

impl StoredSnapshot {
    /// Drops trailing zeros so equal amounts print identically.
    pub(crate) fn normalized(mut self) -> Self {
        self.salary = self.salary.normalize();
        for extra in &mut self.extra_compensation {
            extra.quantity = extra.quantity.normalize();
            extra.amount = extra.amount.normalize();
        }
        self
    }
}

impl From<&FormSnapshot> for StoredSnapshot {
    fn from(snapshot: &FormSnapshot) -> Self {
        Self {
            salary: snapshot.salary,
            admission_date: snapshot.admission_date,
            termination_date: snapshot.termination_date,
            termination_reason: snapshot.termination_reason,
            notice_type: snapshot.notice_type,
            is_disability_protected: snapshot.is_disability_protected,
            extra_compensation: snapshot
                .extra_compensation
                .iter()
                .map(|record| StoredExtra {
                    month: record.month,
                    quantity: record.quantity,
                    amount: record.amount,
                })
                .collect(),
        }
    }
}

impl From<StoredSnapshot> for FormSnapshot {
    fn from(stored: StoredSnapshot) -> Self {
        Self {
            salary: stored.salary,
            admission_date: stored.admission_date,
            termination_date: stored.termination_date,
            termination_reason: stored.termination_reason,
            notice_type: stored.notice_type,
            is_disability_protected: stored.is_disability_protected,
            extra_compensation: stored
                .extra_compensation
                .into_iter()
                .map(|extra| ExtraCompensationRecord {
                    month: extra.month,
                    quantity: extra.quantity,
                    amount: extra.amount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredResult {
    #[serde(with = "rust_decimal::serde::str")]
    balance_of_salary: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    proportional_vacation: Decimal,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    overdue_vacation: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    thirteenth_salary: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    notice_pay: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    fgts_fine: Decimal,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    disability_indemnity: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    average_extra_compensation: Decimal,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    total_deductions: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    grand_total: Decimal,
    #[serde(default)]
    details: Option<CalculationDetails>,
}

impl From<&ResultRecord> for StoredResult {
    fn from(record: &ResultRecord) -> Self {
        Self {
            balance_of_salary: record.balance_of_salary,
            proportional_vacation: record.proportional_vacation,
            overdue_vacation: record.overdue_vacation,
            thirteenth_salary: record.thirteenth_salary,
            notice_pay: record.notice_pay,
            fgts_fine: record.fgts_fine,
            disability_indemnity: record.disability_indemnity,
            average_extra_compensation: record.average_extra_compensation,
            total_deductions: record.total_deductions,
            grand_total: record.grand_total,
            details: record.details.clone(),
        }
    }
}

impl From<StoredResult> for ResultRecord {
    fn from(stored: StoredResult) -> Self {
        Self {
            balance_of_salary: stored.balance_of_salary,
            proportional_vacation: stored.proportional_vacation,
            overdue_vacation: stored.overdue_vacation,
            thirteenth_salary: stored.thirteenth_salary,
            notice_pay: stored.notice_pay,
            fgts_fine: stored.fgts_fine,
            disability_indemnity: stored.disability_indemnity,
            average_extra_compensation: stored.average_extra_compensation,
            total_deductions: stored.total_deductions,
            grand_total: stored.grand_total,
            details: stored.details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredEntry {
    fingerprint: String,
    stored_at: DateTime<Utc>,
    source_snapshot: StoredSnapshot,
    result: StoredResult,
}

impl From<CacheEntry> for StoredEntry {
    fn from(entry: CacheEntry) -> Self {
        Self {
            source_snapshot: StoredSnapshot::from(&entry.source_snapshot),
            result: StoredResult::from(&entry.result),
            fingerprint: entry.fingerprint,
            stored_at: entry.stored_at,
        }
    }
}

impl From<StoredEntry> for CacheEntry {
    fn from(stored: StoredEntry) -> Self {
        Self {
            fingerprint: stored.fingerprint,
            stored_at: stored.stored_at,
            source_snapshot: stored.source_snapshot.into(),
            result: stored.result.into(),
        }
    }
}
