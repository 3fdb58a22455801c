//! Printable estimate generation.
//!
//! This module snapshots a form into an [`EstimateDocument`] and lays it out as
//! plain text for printing. Layout is the only concern here; every figure comes
//! from the calculator.

use super::calculator::Totals;
use super::form::EstimateForm;
use super::format::{format_currency, parse_amount};
use super::line::{SaleLine, TradeInLine};
use super::words::amount_in_words;
use crate::config::shop::ShopConfig;

const TITLE: &str = "Rough Estimate";
const BLANK_CUSTOMER: &str = "_______________";

/// Finalized snapshot of an estimate, ready to print.
#[derive(Debug, Clone)]
pub struct EstimateDocument {
    /// Estimate number, e.g. `PJ-007`
    pub number: String,
    /// Date as printed, `DD-MM-YYYY`
    pub date: String,
    /// Customer name, possibly blank
    pub customer: String,
    /// Sale rows that carry a description or an amount
    pub sale_lines: Vec<SaleLine>,
    /// Trade-in rows that carry a description or a value
    pub trade_in_lines: Vec<TradeInLine>,
    /// Totals over every row of the form
    pub totals: Totals,
}

impl EstimateDocument {
    /// Snapshots `form`. Rows with neither a description nor a money figure are
    /// left out of the printed tables; totals still cover the whole form.
    #[must_use]
    pub fn build(form: &EstimateForm, number: String, date: String) -> Self {
        let sale_lines = form
            .sale_lines()
            .iter()
            .filter(|line| !line.description.is_empty() || !line.amount.is_empty())
            .cloned()
            .collect();
        let trade_in_lines = form
            .trade_in_lines()
            .iter()
            .filter(|line| !line.description.is_empty() || !line.value.is_empty())
            .cloned()
            .collect();

        Self {
            number,
            date,
            customer: form.customer().to_string(),
            sale_lines,
            trade_in_lines,
            totals: form.totals(),
        }
    }

    /// Lays the estimate out as printable text.
    #[must_use]
    pub fn render(&self, config: &ShopConfig) -> String {
        let symbol = &config.estimate.currency_symbol;
        let width = config.estimate.page_size.line_width();
        let rule = "=".repeat(width);
        let thin_rule = "-".repeat(width);
        let mut lines: Vec<String> = Vec::new();

        // Letterhead
        lines.push(format!("{:>width$}", format!("Mob: {}", config.shop.phone)));
        lines.push(centered(width, &config.shop.name));
        lines.push(centered(width, &config.shop.address));
        lines.push(rule.clone());
        lines.push(centered(width, TITLE));
        lines.push(rule.clone());

        let customer = if self.customer.trim().is_empty() {
            BLANK_CUSTOMER
        } else {
            self.customer.as_str()
        };
        lines.push(format!("Customer: {customer}"));
        lines.push(format!("Date: {}", self.date));
        lines.push(format!("Estimate No: {}", self.number));
        lines.push(String::new());

        lines.push("Estimate".to_string());
        lines.push(format!(
            "{:<3} {:<24} {:>10} {:>8} {:>8} {:>13}",
            "#",
            "Description",
            "Weight (g)",
            "Rate",
            "Misc",
            format!("Amount ({symbol})")
        ));
        lines.push(thin_rule.clone());
        for (index, line) in self.sale_lines.iter().enumerate() {
            lines.push(format!(
                "{:<3} {:<24} {:>10} {:>8} {:>8} {:>13}",
                index + 1,
                line.description,
                line.weight,
                line.rate,
                line.misc,
                format_currency(symbol, parse_amount(&line.amount))
            ));
        }
        lines.push(String::new());

        if self.totals.has_trade_ins {
            lines.push("Old Items Deduction".to_string());
            lines.push(format!(
                "{:<28} {:>10} {:>8} {:>8} {:>13}",
                "Description",
                "Weight (g)",
                "Purity %",
                "Rate",
                format!("Value ({symbol})")
            ));
            lines.push(thin_rule.clone());
            for line in &self.trade_in_lines {
                lines.push(format!(
                    "{:<28} {:>10} {:>8} {:>8} {:>13}",
                    line.description,
                    line.weight,
                    line.purity,
                    line.rate,
                    format_currency(symbol, parse_amount(&line.value))
                ));
            }
            lines.push(String::new());
        }

        lines.push(summary_row("Subtotal", &format_currency(symbol, self.totals.subtotal)));
        if self.totals.has_trade_ins {
            lines.push(summary_row(
                "Old Items Deduction",
                &format_currency(symbol, self.totals.deduction),
            ));
        }
        lines.push(summary_row("Total", &format_currency(symbol, self.totals.grand_total)));
        lines.push(format!(
            "In words: {}",
            amount_in_words(self.totals.grand_total, &config.estimate.words_suffix)
        ));
        lines.push(String::new());

        lines.push(format!("{:>width$}", "____________________"));
        lines.push(format!("{:>width$}", "Authorized Signature"));
        lines.push(thin_rule);
        for term in &config.estimate.terms {
            lines.push(format!("* {term}"));
        }
        lines.push(rule);
        lines.push(centered(width, &config.estimate.closing_note));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn centered(width: usize, text: &str) -> String {
    let padding = width.saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(padding))
}

fn summary_row(label: &str, amount: &str) -> String {
    format!("{label:>48}  {amount:>20}")
}
