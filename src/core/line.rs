//! Row types for the two lists on an estimate.
//!
//! Numeric fields are kept as the raw text the clerk typed. They are only read
//! as numbers by the calculator, which treats anything unusable as zero.

use super::calculator::{derive_sale_amount, derive_trade_in_value};

/// Purity a fresh trade-in row starts with.
pub const DEFAULT_PURITY: &str = "100";

/// An item being sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    /// Identifier, unique within the form session
    pub id: u64,
    /// Free-text item description
    pub description: String,
    /// Weight in grams
    pub weight: String,
    /// Price per gram
    pub rate: String,
    /// Flat surcharge (making charges and the like)
    pub misc: String,
    /// Monetary amount, derived or typed directly
    pub amount: String,
}

/// An old item accepted against the sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeInLine {
    /// Identifier, unique within the form session
    pub id: u64,
    /// Free-text item description
    pub description: String,
    /// Weight in grams
    pub weight: String,
    /// Fineness as a percentage
    pub purity: String,
    /// Price per gram
    pub rate: String,
    /// Deduction value, derived or typed directly
    pub value: String,
}

/// Editable fields of a [`SaleLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleField {
    /// Item description
    Description,
    /// Weight in grams
    Weight,
    /// Price per gram
    Rate,
    /// Flat surcharge
    Misc,
    /// Amount, typed directly
    Amount,
}

impl SaleField {
    /// Whether editing this field re-derives the amount.
    #[must_use]
    pub const fn drives_amount(self) -> bool {
        matches!(self, Self::Weight | Self::Rate | Self::Misc)
    }
}

/// Editable fields of a [`TradeInLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeInField {
    /// Item description
    Description,
    /// Weight in grams
    Weight,
    /// Fineness percentage
    Purity,
    /// Price per gram
    Rate,
    /// Value, typed directly
    Value,
}

impl TradeInField {
    /// Whether editing this field re-derives the value.
    #[must_use]
    pub const fn drives_value(self) -> bool {
        matches!(self, Self::Weight | Self::Rate | Self::Purity)
    }
}

/// Behaviour shared by both row kinds so the form can manage them uniformly.
pub trait FormRow {
    /// A fresh, empty row carrying `id`.
    fn blank(id: u64) -> Self;

    /// The row identifier.
    fn id(&self) -> u64;
}

impl FormRow for SaleLine {
    fn blank(id: u64) -> Self {
        Self {
            id,
            description: String::new(),
            weight: String::new(),
            rate: String::new(),
            misc: String::new(),
            amount: String::new(),
        }
    }

    fn id(&self) -> u64 {
        self.id
    }
}

impl FormRow for TradeInLine {
    fn blank(id: u64) -> Self {
        Self {
            id,
            description: String::new(),
            weight: String::new(),
            purity: DEFAULT_PURITY.to_string(),
            rate: String::new(),
            value: String::new(),
        }
    }

    fn id(&self) -> u64 {
        self.id
    }
}

impl SaleLine {
    /// Applies one edit. Weight, rate and misc edits re-derive the amount;
    /// description and amount edits never do.
    pub fn apply_edit(&mut self, field: SaleField, value: String) {
        match field {
            SaleField::Description => self.description = value,
            SaleField::Weight => self.weight = value,
            SaleField::Rate => self.rate = value,
            SaleField::Misc => self.misc = value,
            SaleField::Amount => self.amount = value,
        }

        if field.drives_amount() {
            self.amount = derive_sale_amount(&self.weight, &self.rate, &self.misc, &self.amount);
        }
    }
}

impl TradeInLine {
    /// Applies one edit. Weight, rate and purity edits re-derive the value;
    /// description and value edits never do.
    pub fn apply_edit(&mut self, field: TradeInField, value: String) {
        match field {
            TradeInField::Description => self.description = value,
            TradeInField::Weight => self.weight = value,
            TradeInField::Purity => self.purity = value,
            TradeInField::Rate => self.rate = value,
            TradeInField::Value => self.value = value,
        }

        if field.drives_value() {
            self.value =
                derive_trade_in_value(&self.weight, &self.rate, &self.purity, &self.value);
        }
    }
}
