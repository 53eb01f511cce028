//! Result rendering.
//!
//! [`render`] turns a [`ResultRecord`] into the ordered lines of the results
//! view; [`to_plain_text`] lays those lines out as a printable statement.

use rust_decimal::Decimal;

use crate::format::{format_brl, format_deduction};
use crate::models::ResultRecord;

/// How a display line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCategory {
    /// An ordinary amount owed.
    Normal,
    /// An amount subtracted, shown with the deduction marker.
    Deduction,
    /// The grand total.
    Total,
}

/// One labelled amount in the results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Human-readable component name.
    pub label: String,
    /// The formatted amount.
    pub value: String,
    /// Presentation category.
    pub category: LineCategory,
}

impl DisplayLine {
    fn new(label: &str, value: String, category: LineCategory) -> Self {
        Self {
            label: label.to_string(),
            value,
            category,
        }
    }
}

/// Renders `result` into display lines.
///
/// Optional components that are absent are left out entirely rather than
/// shown as zero. The grand total is always last.
///
/// # Example
///
/// ```
/// use rescisao_client::models::ResultRecord;
/// use rescisao_client::render::{render, LineCategory};
///
/// let record: ResultRecord = serde_json::from_str(r#"{
///     "saldo_salario": 1000, "ferias_proporcionais": 0, "decimo_terceiro": 0,
///     "aviso_previo": 0, "multa_fgts": 0, "media_horas_extras": 0,
///     "total_descontos": 150, "total_geral": 850
/// }"#).unwrap();
/// let lines = render(&record);
/// assert_eq!(lines.len(), 8);
/// assert_eq!(lines[6].category, LineCategory::Deduction);
/// assert_eq!(lines[6].value, "(-) R$\u{a0}150,00");
/// ```
pub fn render(result: &ResultRecord) -> Vec<DisplayLine> {
    let normal = |label: &str, amount: Decimal| {
        DisplayLine::new(label, format_brl(amount), LineCategory::Normal)
    };

    let mut lines = vec![
        normal("Balance of salary", result.balance_of_salary),
        normal("Proportional vacation + 1/3", result.proportional_vacation),
    ];
    if let Some(amount) = result.overdue_vacation {
        lines.push(normal("Overdue vacation + 1/3", amount));
    }
    lines.push(normal("13th salary", result.thirteenth_salary));
    lines.push(normal("Notice pay", result.notice_pay));
    lines.push(normal("FGTS fine", result.fgts_fine));
    if let Some(amount) = result.disability_indemnity {
        lines.push(normal("Disability indemnity", amount));
    }
    lines.push(normal(
        "Average extra compensation",
        result.average_extra_compensation,
    ));
    if let Some(amount) = result.total_deductions {
        lines.push(DisplayLine::new(
            "Total deductions",
            format_deduction(amount),
            LineCategory::Deduction,
        ));
    }
    lines.push(DisplayLine::new(
        "Grand total",
        format_brl(result.grand_total),
        LineCategory::Total,
    ));
    lines
}

/// Lays `lines` out as an aligned statement, one line per component, with a
/// rule above the total.
pub fn to_plain_text(lines: &[DisplayLine]) -> String {
    let label_width = lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    let value_width = lines.iter().map(|l| l.value.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for line in lines {
        if line.category == LineCategory::Total {
            out.push_str(&"-".repeat(label_width + 2 + value_width));
            out.push('\n');
        }
        out.push_str(&format!(
            "{:<lw$}  {:>vw$}\n",
            line.label,
            line.value,
            lw = label_width,
            vw = value_width
        ));
    }
    out
}
