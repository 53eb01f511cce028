//! Currency formatting.
//!
//! Amounts are shown the way a pt-BR locale formats Brazilian reais:
//! `R$`, a no-break space, `.` between thousands and `,` before the cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol for Brazilian reais.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Separator between the symbol and the digits (no-break space).
pub const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Marker prepended to deduction amounts.
pub const DEDUCTION_MARKER: &str = "(-)";

/// Formats `value` as BRL currency.
///
/// Rounds half away from zero to cents. Negative amounts get a leading `-`.
///
/// # Example
///
/// ```
/// use rescisao_client::format::format_brl;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_brl(Decimal::new(123456789, 2)), "R$\u{a0}1.234.567,89");
/// assert_eq!(format_brl(Decimal::new(-5, 1)), "-R$\u{a0}0,50");
/// ```
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}{}{}",
        sign,
        CURRENCY_SYMBOL,
        SYMBOL_SEPARATOR,
        group_digits(rounded.abs())
    )
}

/// Formats a deduction: the marker followed by the amount's magnitude.
///
/// The sign of `value` is ignored, so services reporting deductions as
/// either positive or negative numbers render the same way.
///
/// ```
/// use rescisao_client::format::format_deduction;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_deduction(Decimal::new(-15000, 2)), "(-) R$\u{a0}150,00");
/// ```
pub fn format_deduction(value: Decimal) -> String {
    format!("{} {}", DEDUCTION_MARKER, format_brl(value.abs()))
}

fn group_digits(magnitude: Decimal) -> String {
    let plain = format!("{:.2}", magnitude);
    let (integer, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped.push(',');
    grouped.push_str(cents);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_small_amounts_have_no_grouping() {
        assert_eq!(format_brl(dec("0")), "R$\u{a0}0,00");
        assert_eq!(format_brl(dec("7.5")), "R$\u{a0}7,50");
        assert_eq!(format_brl(dec("999.99")), "R$\u{a0}999,99");
    }

    #[test]
    fn test_thousands_are_grouped_with_dots() {
        assert_eq!(format_brl(dec("1000")), "R$\u{a0}1.000,00");
        assert_eq!(format_brl(dec("12791.67")), "R$\u{a0}12.791,67");
        assert_eq!(format_brl(dec("1000000")), "R$\u{a0}1.000.000,00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_brl(dec("2666.665")), "R$\u{a0}2.666,67");
        assert_eq!(format_brl(dec("-2666.665")), "-R$\u{a0}2.666,67");
        assert_eq!(format_brl(dec("0.004")), "R$\u{a0}0,00");
    }

    #[test]
    fn test_negative_that_rounds_to_zero_has_no_sign() {
        assert_eq!(format_brl(dec("-0.001")), "R$\u{a0}0,00");
    }

    #[test]
    fn test_deduction_strips_sign() {
        assert_eq!(format_deduction(dec("150")), "(-) R$\u{a0}150,00");
        assert_eq!(format_deduction(dec("-1234.5")), "(-) R$\u{a0}1.234,50");
    }
}
