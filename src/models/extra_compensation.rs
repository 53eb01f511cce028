//! Extra-compensation record model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One calendar month of supplementary pay (e.g. overtime).
///
/// Within one [`FormSnapshot`](super::FormSnapshot) no two records may share
/// a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCompensationRecord {
    /// Calendar month, 1 to 12.
    #[serde(rename = "mes")]
    pub month: u32,
    /// Number of hours (or units) paid that month.
    #[serde(rename = "quantidade", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Total amount paid that month.
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fractional_amount() {
        let record: ExtraCompensationRecord =
            serde_json::from_str(r#"{"mes": 5, "quantidade": 12, "valor": 480.5}"#).unwrap();

        assert_eq!(record.month, 5);
        assert_eq!(record.quantity, Decimal::new(12, 0));
        assert_eq!(record.amount, Decimal::new(4805, 1));
    }

    #[test]
    fn test_amounts_travel_as_json_numbers() {
        let record = ExtraCompensationRecord {
            month: 3,
            quantity: Decimal::new(8, 0),
            amount: Decimal::new(32050, 2),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"mes":3,"quantidade":8.0,"valor":320.5}"#);
    }
}
