//! Shared test utilities for the estimate crate.
//!
//! Helpers for setting up test databases and building rows and forms with
//! sensible defaults.

use crate::{
    core::{
        form::EstimateForm,
        line::{FormRow, SaleField, SaleLine, TradeInField, TradeInLine},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A sale line holding only an amount, as if typed directly.
pub fn sale_line_with_amount(id: u64, amount: &str) -> SaleLine {
    SaleLine {
        amount: amount.to_string(),
        ..SaleLine::blank(id)
    }
}

/// A trade-in line with the fields that drive the content check.
pub fn trade_in_line(id: u64, description: &str, weight: &str, value: &str) -> TradeInLine {
    TradeInLine {
        description: description.to_string(),
        weight: weight.to_string(),
        value: value.to_string(),
        ..TradeInLine::blank(id)
    }
}

/// A filled-in form built through ordinary edits.
///
/// # Contents
/// * Customer: "Ravi Kumar"
/// * Gold chain: 10 g at 6000 plus 500 misc (60,500)
/// * Polishing: amount 150 typed directly
/// * Old bangle trade-in: 5 g at 6000, 80% purity (24,000)
///
/// Grand total: 36,650.
#[allow(clippy::unwrap_used)]
pub fn sample_form() -> EstimateForm {
    let mut form = EstimateForm::default();
    form.set_customer("Ravi Kumar");

    let chain = form.sale_lines()[0].id;
    form.update_sale_line(chain, SaleField::Description, "Gold chain")
        .unwrap();
    form.update_sale_line(chain, SaleField::Weight, "10").unwrap();
    form.update_sale_line(chain, SaleField::Rate, "6000").unwrap();
    form.update_sale_line(chain, SaleField::Misc, "500").unwrap();

    let polishing = form.add_sale_line().unwrap();
    form.update_sale_line(polishing, SaleField::Description, "Polishing")
        .unwrap();
    form.update_sale_line(polishing, SaleField::Amount, "150")
        .unwrap();

    let bangle = form.trade_in_lines()[0].id;
    form.update_trade_in_line(bangle, TradeInField::Description, "Old bangle")
        .unwrap();
    form.update_trade_in_line(bangle, TradeInField::Weight, "5")
        .unwrap();
    form.update_trade_in_line(bangle, TradeInField::Purity, "80")
        .unwrap();
    form.update_trade_in_line(bangle, TradeInField::Rate, "6000")
        .unwrap();

    form
}
