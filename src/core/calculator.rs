//! Estimate calculation engine.
//!
//! Pure functions that derive a row's money figure from its raw inputs and
//! roll the rows up into totals. Nothing here touches I/O or shared state, and
//! nothing here can fail: malformed numbers read as zero.

use super::format::{amount_to_field, parse_amount};
use super::line::{SaleLine, TradeInLine};

/// Derives a sale line's amount from its weight, rate and surcharge.
///
/// When weight or misc is positive the amount is `weight * rate + misc`.
/// Otherwise `current_amount` is returned untouched, which preserves an amount
/// the clerk typed directly into a row with no weight and no surcharge.
#[must_use]
pub fn derive_sale_amount(weight: &str, rate: &str, misc: &str, current_amount: &str) -> String {
    let weight = parse_amount(weight);
    let rate = parse_amount(rate);
    let misc = parse_amount(misc);

    if weight > 0.0 || misc > 0.0 {
        amount_to_field(weight * rate + misc)
    } else {
        current_amount.to_string()
    }
}

/// Derives a trade-in line's deduction from its weight, rate and purity.
///
/// When weight or rate is positive the value is `weight * rate * (purity / 100)`.
/// Otherwise `current_value` is returned untouched. Purity is not clamped: a
/// purity above 100 or below 0 flows straight into the arithmetic.
#[must_use]
pub fn derive_trade_in_value(weight: &str, rate: &str, purity: &str, current_value: &str) -> String {
    let weight = parse_amount(weight);
    let rate = parse_amount(rate);
    let purity = parse_amount(purity);

    if weight > 0.0 || rate > 0.0 {
        amount_to_field(weight * rate * (purity / 100.0))
    } else {
        current_value.to_string()
    }
}

/// Roll-up of an estimate's rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of sale line amounts
    pub subtotal: f64,
    /// Sum of trade-in values
    pub deduction: f64,
    /// `subtotal - deduction`; negative when trade-ins exceed sales
    pub grand_total: f64,
    /// Whether any trade-in row carries content worth showing
    pub has_trade_ins: bool,
}

/// Aggregates both row lists into totals.
///
/// Blank and non-numeric amounts count as zero. `has_trade_ins` is purely
/// presentational: a trade-in row with weight but no description still counts
/// towards the deduction either way.
#[must_use]
pub fn aggregate(sale_lines: &[SaleLine], trade_in_lines: &[TradeInLine]) -> Totals {
    let subtotal: f64 = sale_lines
        .iter()
        .map(|line| parse_amount(&line.amount))
        .sum();
    let deduction: f64 = trade_in_lines
        .iter()
        .map(|line| parse_amount(&line.value))
        .sum();

    Totals {
        subtotal,
        deduction,
        grand_total: subtotal - deduction,
        has_trade_ins: trade_in_lines.iter().any(trade_in_has_content),
    }
}

/// A trade-in row has content when it has a description, a positive weight,
/// or a positive value.
#[must_use]
pub fn trade_in_has_content(line: &TradeInLine) -> bool {
    !line.description.trim().is_empty()
        || parse_amount(&line.weight) > 0.0
        || parse_amount(&line.value) > 0.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sale_line_with_amount, trade_in_line};

    #[test]
    fn test_sale_amount_preserved_when_weight_and_misc_zero() {
        assert_eq!(derive_sale_amount("0", "5", "0", "7"), "7");
        assert_eq!(derive_sale_amount("", "", "", "1200"), "1200");
        assert_eq!(derive_sale_amount("abc", "5", "", ""), "");
    }

    #[test]
    fn test_sale_amount_derived_from_drivers() {
        assert_eq!(derive_sale_amount("2", "100", "50", "anything"), "250");
        assert_eq!(derive_sale_amount("10.5", "6200", "", ""), "65100");
    }

    #[test]
    fn test_sale_amount_misc_alone_overwrites() {
        assert_eq!(derive_sale_amount("", "6200", "350", "999"), "350");
    }

    #[test]
    fn test_sale_amount_negative_weight_does_not_drive() {
        assert_eq!(derive_sale_amount("-2", "100", "0", "42"), "42");
    }

    #[test]
    fn test_trade_in_value_derived() {
        let value = parse_amount(&derive_trade_in_value("10", "6000", "91.6", "anything"));
        assert!((value - 54_960.0).abs() < 1e-6);
    }

    #[test]
    fn test_trade_in_value_rate_alone_drives() {
        assert_eq!(derive_trade_in_value("", "6000", "100", "500"), "0");
    }

    #[test]
    fn test_trade_in_value_preserved_without_weight_and_rate() {
        assert_eq!(derive_trade_in_value("0", "", "91.6", "800"), "800");
    }

    #[test]
    fn test_trade_in_purity_not_clamped() {
        assert_eq!(derive_trade_in_value("1", "100", "150", ""), "150");
        assert_eq!(derive_trade_in_value("1", "100", "-50", ""), "-50");
    }

    #[test]
    fn test_trade_in_blank_purity_reads_as_zero() {
        assert_eq!(derive_trade_in_value("1", "100", "", "77"), "0");
    }

    #[test]
    fn test_aggregate_tolerates_bad_amounts_and_allows_negative_total() {
        let sales = vec![
            sale_line_with_amount(1, "250"),
            sale_line_with_amount(2, ""),
            sale_line_with_amount(3, "abc"),
        ];
        let trade_ins = vec![trade_in_line(4, "", "", "5496")];

        let totals = aggregate(&sales, &trade_ins);
        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.deduction, 5496.0);
        assert_eq!(totals.grand_total, -5246.0);
        assert!(totals.has_trade_ins);
    }

    #[test]
    fn test_aggregate_empty_lists() {
        let totals = aggregate(&[], &[]);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.deduction, 0.0);
        assert_eq!(totals.grand_total, 0.0);
        assert!(!totals.has_trade_ins);
    }

    #[test]
    fn test_has_trade_ins_from_description_only() {
        let trade_ins = vec![trade_in_line(1, "old ring", "0", "0")];
        assert!(aggregate(&[], &trade_ins).has_trade_ins);
    }

    #[test]
    fn test_has_trade_ins_false_for_empty_row() {
        let trade_ins = vec![trade_in_line(1, "   ", "", "0")];
        let totals = aggregate(&[], &trade_ins);
        assert!(!totals.has_trade_ins);
        assert_eq!(totals.deduction, 0.0);
    }

    #[test]
    fn test_deduction_counts_rows_hidden_from_display() {
        // Negative value: no content flag, but still deducted.
        let trade_ins = vec![trade_in_line(1, "", "", "-100")];
        let totals = aggregate(&[sale_line_with_amount(2, "1000")], &trade_ins);
        assert!(!totals.has_trade_ins);
        assert_eq!(totals.grand_total, 1100.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let sales = vec![sale_line_with_amount(1, "1234.5"), sale_line_with_amount(2, "10")];
        let trade_ins = vec![trade_in_line(3, "chain", "2", "300")];

        let first = aggregate(&sales, &trade_ins);
        let second = aggregate(&sales, &trade_ins);
        assert_eq!(first, second);
    }
}
