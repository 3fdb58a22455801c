//! Estimate form state - Owns the customer name and both row lists.
//!
//! The form is the mutable side of an estimate. Every edit goes through it one
//! at a time, and each edit that touches a driving field re-runs the
//! calculator on that row. Row counts are bounded so the printed estimate fits
//! on one page, and each list has its own policy for removing its last row.

use super::calculator::{Totals, aggregate};
use super::draft::EstimateDraft;
use super::line::{FormRow, SaleField, SaleLine, TradeInField, TradeInLine};
use crate::errors::{Error, Result, RowKind};
use tracing::{debug, warn};

/// Default ceiling on sale lines.
pub const MAX_SALE_LINES: usize = 8;
/// Default ceiling on trade-in lines.
pub const MAX_TRADE_IN_LINES: usize = 3;

/// Row ceilings for each list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimits {
    /// Most sale lines the form accepts
    pub max_sale_lines: usize,
    /// Most trade-in lines the form accepts
    pub max_trade_in_lines: usize,
}

impl Default for RowLimits {
    fn default() -> Self {
        Self {
            max_sale_lines: MAX_SALE_LINES,
            max_trade_in_lines: MAX_TRADE_IN_LINES,
        }
    }
}

/// What happens when the only remaining row of a list is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastRowPolicy {
    /// The removal is refused and the row stays as it is
    Refuse,
    /// The row is cleared back to blank, keeping its identifier
    ResetToBlank,
}

/// Sale lines can never be emptied.
pub const SALE_LAST_ROW_POLICY: LastRowPolicy = LastRowPolicy::Refuse;
/// Trade-in lines always keep one edit row, cleared on removal.
pub const TRADE_IN_LAST_ROW_POLICY: LastRowPolicy = LastRowPolicy::ResetToBlank;

/// Result of a row removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The row was deleted from its list
    Removed,
    /// The row was the last one and its list refuses to empty
    Refused,
    /// The row was the last one and was cleared instead
    ResetToBlank,
}

/// Editable estimate: customer name plus sale and trade-in rows.
#[derive(Debug, Clone)]
pub struct EstimateForm {
    customer: String,
    sale_lines: Vec<SaleLine>,
    trade_in_lines: Vec<TradeInLine>,
    limits: RowLimits,
    next_id: u64,
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self::new(RowLimits::default())
    }
}

impl EstimateForm {
    /// Creates a form with one blank row in each list.
    #[must_use]
    pub fn new(limits: RowLimits) -> Self {
        let mut form = Self {
            customer: String::new(),
            sale_lines: Vec::new(),
            trade_in_lines: Vec::new(),
            limits,
            next_id: 1,
        };
        form.reset();
        form
    }

    /// Clears the customer and puts both lists back to a single blank row.
    pub fn reset(&mut self) {
        self.customer.clear();
        let sale_id = self.mint_id();
        let trade_in_id = self.mint_id();
        self.sale_lines = vec![SaleLine::blank(sale_id)];
        self.trade_in_lines = vec![TradeInLine::blank(trade_in_id)];
        debug!("Estimate form reset");
    }

    /// Customer name as typed.
    #[must_use]
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Sets the customer name.
    pub fn set_customer(&mut self, name: impl Into<String>) {
        self.customer = name.into();
    }

    /// Sale lines in insertion order.
    #[must_use]
    pub fn sale_lines(&self) -> &[SaleLine] {
        &self.sale_lines
    }

    /// Trade-in lines in insertion order.
    #[must_use]
    pub fn trade_in_lines(&self) -> &[TradeInLine] {
        &self.trade_in_lines
    }

    /// Row ceilings in force for this form.
    #[must_use]
    pub const fn limits(&self) -> RowLimits {
        self.limits
    }

    /// Current totals over every row.
    #[must_use]
    pub fn totals(&self) -> Totals {
        aggregate(&self.sale_lines, &self.trade_in_lines)
    }

    /// Appends a blank sale line and returns its identifier.
    ///
    /// # Errors
    /// Returns [`Error::RowLimit`] when the list is already at its ceiling.
    pub fn add_sale_line(&mut self) -> Result<u64> {
        let max = self.limits.max_sale_lines;
        let id = self.next_row_id(self.sale_lines.len(), max, RowKind::Sale)?;
        self.sale_lines.push(SaleLine::blank(id));
        debug!(id, count = self.sale_lines.len(), "Added sale line");
        Ok(id)
    }

    /// Appends a blank trade-in line and returns its identifier.
    ///
    /// # Errors
    /// Returns [`Error::RowLimit`] when the list is already at its ceiling.
    pub fn add_trade_in_line(&mut self) -> Result<u64> {
        let max = self.limits.max_trade_in_lines;
        let id = self.next_row_id(self.trade_in_lines.len(), max, RowKind::TradeIn)?;
        self.trade_in_lines.push(TradeInLine::blank(id));
        debug!(id, count = self.trade_in_lines.len(), "Added trade-in line");
        Ok(id)
    }

    /// Sets one field of a sale line, re-deriving the amount when a driving
    /// field changed.
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] when no sale line has this identifier.
    pub fn update_sale_line(
        &mut self,
        id: u64,
        field: SaleField,
        value: impl Into<String>,
    ) -> Result<&SaleLine> {
        let line = find_row_mut(&mut self.sale_lines, id, RowKind::Sale)?;
        line.apply_edit(field, value.into());
        debug!(id, ?field, amount = %line.amount, "Updated sale line");
        Ok(&*line)
    }

    /// Sets one field of a trade-in line, re-deriving the value when a
    /// driving field changed.
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] when no trade-in line has this identifier.
    pub fn update_trade_in_line(
        &mut self,
        id: u64,
        field: TradeInField,
        value: impl Into<String>,
    ) -> Result<&TradeInLine> {
        let line = find_row_mut(&mut self.trade_in_lines, id, RowKind::TradeIn)?;
        line.apply_edit(field, value.into());
        debug!(id, ?field, value = %line.value, "Updated trade-in line");
        Ok(&*line)
    }

    /// Removes a sale line. The last sale line is never removed.
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] when no sale line has this identifier.
    pub fn remove_sale_line(&mut self, id: u64) -> Result<RemoveOutcome> {
        remove_row(&mut self.sale_lines, id, RowKind::Sale, SALE_LAST_ROW_POLICY)
    }

    /// Removes a trade-in line. The last trade-in line is cleared instead.
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] when no trade-in line has this identifier.
    pub fn remove_trade_in_line(&mut self, id: u64) -> Result<RemoveOutcome> {
        remove_row(
            &mut self.trade_in_lines,
            id,
            RowKind::TradeIn,
            TRADE_IN_LAST_ROW_POLICY,
        )
    }

    /// Replays a saved draft onto a freshly reset form.
    ///
    /// Each draft row is entered field by field in the order a clerk would
    /// type it (description, amount, then weight, rate and the remaining
    /// driver), so the derivation rules apply exactly as they do on screen.
    ///
    /// # Errors
    /// Returns [`Error::RowLimit`] when the draft holds more rows than the
    /// form allows. The form is left untouched in that case.
    pub fn apply_draft(&mut self, draft: &EstimateDraft) -> Result<()> {
        if draft.sale_lines.len() > self.limits.max_sale_lines {
            return Err(Error::RowLimit {
                kind: RowKind::Sale,
                max: self.limits.max_sale_lines,
            });
        }
        if draft.trade_in_lines.len() > self.limits.max_trade_in_lines {
            return Err(Error::RowLimit {
                kind: RowKind::TradeIn,
                max: self.limits.max_trade_in_lines,
            });
        }

        self.reset();
        self.set_customer(draft.customer.clone());

        for (index, row) in draft.sale_lines.iter().enumerate() {
            let id = if index == 0 {
                self.sale_lines[0].id
            } else {
                self.add_sale_line()?
            };
            self.update_sale_line(id, SaleField::Description, row.description.clone())?;
            self.update_sale_line(id, SaleField::Amount, row.amount.clone())?;
            self.update_sale_line(id, SaleField::Weight, row.weight.clone())?;
            self.update_sale_line(id, SaleField::Rate, row.rate.clone())?;
            self.update_sale_line(id, SaleField::Misc, row.misc.clone())?;
        }

        for (index, row) in draft.trade_in_lines.iter().enumerate() {
            let id = if index == 0 {
                self.trade_in_lines[0].id
            } else {
                self.add_trade_in_line()?
            };
            self.update_trade_in_line(id, TradeInField::Description, row.description.clone())?;
            self.update_trade_in_line(id, TradeInField::Value, row.value.clone())?;
            self.update_trade_in_line(id, TradeInField::Weight, row.weight.clone())?;
            self.update_trade_in_line(id, TradeInField::Rate, row.rate.clone())?;
            self.update_trade_in_line(id, TradeInField::Purity, row.purity.clone())?;
        }

        debug!(
            sale_lines = self.sale_lines.len(),
            trade_in_lines = self.trade_in_lines.len(),
            "Applied draft"
        );
        Ok(())
    }

    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn next_row_id(&mut self, count: usize, max: usize, kind: RowKind) -> Result<u64> {
        if count >= max {
            warn!(%kind, max, "Row limit reached");
            return Err(Error::RowLimit { kind, max });
        }
        Ok(self.mint_id())
    }
}

fn find_row_mut<T: FormRow>(rows: &mut [T], id: u64, kind: RowKind) -> Result<&mut T> {
    rows.iter_mut()
        .find(|row| row.id() == id)
        .ok_or(Error::RowNotFound { kind, id })
}

fn remove_row<T: FormRow>(
    rows: &mut Vec<T>,
    id: u64,
    kind: RowKind,
    policy: LastRowPolicy,
) -> Result<RemoveOutcome> {
    let position = rows
        .iter()
        .position(|row| row.id() == id)
        .ok_or(Error::RowNotFound { kind, id })?;

    if rows.len() > 1 {
        rows.remove(position);
        debug!(%kind, id, "Removed row");
        return Ok(RemoveOutcome::Removed);
    }

    match policy {
        LastRowPolicy::Refuse => {
            warn!(%kind, id, "Refused to remove the last row");
            Ok(RemoveOutcome::Refused)
        }
        LastRowPolicy::ResetToBlank => {
            rows[position] = T::blank(id);
            debug!(%kind, id, "Cleared the last row");
            Ok(RemoveOutcome::ResetToBlank)
        }
    }
}
