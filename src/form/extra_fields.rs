//! The dynamic list of extra-compensation entries.

use chrono::{Datelike, NaiveDate};

use crate::models::ExtraCompensationRecord;

use super::parse_amount;

/// Stable identity of one entry in an [`ExtraCompensationList`].
///
/// Handles are never reused, so removing an entry does not change the
/// identity of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordHandle(u64);

/// One editable extra-compensation entry, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraCompensationField {
    /// Month number.
    pub month: String,
    /// Hours (or units).
    pub quantity: String,
    /// Total amount for the month.
    pub amount: String,
}

impl ExtraCompensationField {
    /// Creates an entry from its three raw values.
    pub fn new(month: impl Into<String>, quantity: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            quantity: quantity.into(),
            amount: amount.into(),
        }
    }

    /// Coerces the entry into a record. Malformed numbers become zero.
    pub fn to_record(&self) -> ExtraCompensationRecord {
        ExtraCompensationRecord {
            month: self.month.trim().parse().unwrap_or(0),
            quantity: parse_amount(&self.quantity),
            amount: parse_amount(&self.amount),
        }
    }
}

/// The variable-length set of extra-compensation entries the user edits.
///
/// # Example
///
/// ```
/// use rescisao_client::form::ExtraCompensationList;
/// use chrono::NaiveDate;
///
/// let mut list = ExtraCompensationList::new();
/// let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
/// let first = list.add_record(today);
/// let second = list.add_record(today);
/// assert!(list.remove_record(first));
/// assert_eq!(list.handles(), vec![second]);
/// assert_eq!(list.field(second).unwrap().month, "5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtraCompensationList {
    next_id: u64,
    entries: Vec<(RecordHandle, ExtraCompensationField)>,
}

impl ExtraCompensationList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry pre-filled with `today`'s month and blank quantity
    /// and amount, returning its handle.
    pub fn add_record(&mut self, today: NaiveDate) -> RecordHandle {
        self.push(ExtraCompensationField::new(today.month().to_string(), "", ""))
    }

    /// Appends an entry with the given raw values.
    pub fn push(&mut self, field: ExtraCompensationField) -> RecordHandle {
        let handle = RecordHandle(self.next_id);
        self.next_id += 1;
        self.entries.push((handle, field));
        handle
    }

    /// Removes exactly the entry behind `handle`. Returns false if it was
    /// already gone.
    pub fn remove_record(&mut self, handle: RecordHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    /// The entry behind `handle`.
    pub fn field(&self, handle: RecordHandle) -> Option<&ExtraCompensationField> {
        self.entries
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, field)| field)
    }

    /// Mutable access to the entry behind `handle`.
    pub fn field_mut(&mut self, handle: RecordHandle) -> Option<&mut ExtraCompensationField> {
        self.entries
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, field)| field)
    }

    /// Handles of all entries, in display order.
    pub fn handles(&self) -> Vec<RecordHandle> {
        self.entries.iter().map(|(h, _)| *h).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coerces every entry into a record, in display order.
    pub fn collect(&self) -> Vec<ExtraCompensationRecord> {
        self.entries.iter().map(|(_, field)| field.to_record()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
    }

    #[test]
    fn test_add_record_prefills_current_month() {
        let mut list = ExtraCompensationList::new();
        let handle = list.add_record(today());

        assert_eq!(
            list.field(handle),
            Some(&ExtraCompensationField::new("11", "", ""))
        );
    }

    #[test]
    fn test_remove_keeps_other_handles_stable() {
        let mut list = ExtraCompensationList::new();
        let a = list.add_record(today());
        let b = list.add_record(today());
        let c = list.add_record(today());

        list.field_mut(c).unwrap().amount = "300".to_string();
        assert!(list.remove_record(b));
        assert!(!list.remove_record(b));

        assert_eq!(list.handles(), vec![a, c]);
        assert_eq!(list.field(c).unwrap().amount, "300");

        let d = list.add_record(today());
        assert_ne!(d, b, "handles are never reused");
    }

    #[test]
    fn test_collect_coerces_in_display_order() {
        let mut list = ExtraCompensationList::new();
        list.push(ExtraCompensationField::new("2", "15", "750.50"));
        list.push(ExtraCompensationField::new("1", "10", "500"));
        let blank = list.add_record(today());

        let records = list.collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].month, 2);
        assert_eq!(records[0].amount, Decimal::new(75050, 2));
        assert_eq!(records[1].month, 1);

        // A freshly added entry is blank: zero quantity and amount.
        assert_eq!(list.field(blank).unwrap().quantity, "");
        assert_eq!(records[2].month, 11);
        assert_eq!(records[2].quantity, Decimal::ZERO);
        assert_eq!(records[2].amount, Decimal::ZERO);
    }

    #[test]
    fn test_malformed_month_coerces_to_zero() {
        let record = ExtraCompensationField::new("maio", "1", "1").to_record();
        assert_eq!(record.month, 0);
    }
}
