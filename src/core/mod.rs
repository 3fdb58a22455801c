//! Core estimate logic - framework-agnostic calculation, form state and document layout.

/// Row derivation and aggregation
pub mod calculator;
/// Printable estimate snapshot and text layout
pub mod document;
/// Saved drafts replayed onto a form
pub mod draft;
/// Editable form state and row policies
pub mod form;
/// Tolerant parsing and Indian-grouped formatting
pub mod format;
/// Sale and trade-in row types
pub mod line;
/// Estimate number sequences and date formatting
pub mod numbering;
/// Amounts in words on the Indian scale
pub mod words;

pub use calculator::{Totals, aggregate, derive_sale_amount, derive_trade_in_value};
pub use format::format_amount;
pub use words::to_words;
