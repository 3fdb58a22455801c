//! Saved estimate drafts.
//!
//! A draft is a TOML file holding the customer name and the rows as a clerk
//! would type them. Numeric fields may be written either as strings or as bare
//! TOML numbers; both end up as raw form text.

use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// A saved estimate, replayed onto a form with
/// [`EstimateForm::apply_draft`](super::form::EstimateForm::apply_draft).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateDraft {
    /// Customer name
    #[serde(default)]
    pub customer: String,
    /// Sale rows in display order
    #[serde(default)]
    pub sale_lines: Vec<SaleLineDraft>,
    /// Trade-in rows in display order
    #[serde(default)]
    pub trade_in_lines: Vec<TradeInLineDraft>,
}

/// One saved sale row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleLineDraft {
    /// Item description
    pub description: String,
    /// Weight in grams
    #[serde(deserialize_with = "raw_field")]
    pub weight: String,
    /// Price per gram
    #[serde(deserialize_with = "raw_field")]
    pub rate: String,
    /// Flat surcharge
    #[serde(deserialize_with = "raw_field")]
    pub misc: String,
    /// Amount typed directly, used when weight and misc are zero
    #[serde(deserialize_with = "raw_field")]
    pub amount: String,
}

/// One saved trade-in row.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeInLineDraft {
    /// Item description
    pub description: String,
    /// Weight in grams
    #[serde(deserialize_with = "raw_field")]
    pub weight: String,
    /// Fineness percentage, `"100"` when omitted
    #[serde(deserialize_with = "raw_field")]
    pub purity: String,
    /// Price per gram
    #[serde(deserialize_with = "raw_field")]
    pub rate: String,
    /// Value typed directly, used when weight and rate are zero
    #[serde(deserialize_with = "raw_field")]
    pub value: String,
}

impl Default for TradeInLineDraft {
    fn default() -> Self {
        Self {
            description: String::new(),
            weight: String::new(),
            purity: super::line::DEFAULT_PURITY.to_string(),
            rate: String::new(),
            value: String::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn raw_field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawField::deserialize(deserializer)? {
        RawField::Text(text) => text,
        RawField::Integer(n) => n.to_string(),
        RawField::Float(n) => n.to_string(),
    })
}

/// Parses a draft from TOML text.
///
/// # Errors
/// Returns [`Error::Draft`] when the TOML is malformed or a field has the wrong shape.
pub fn parse_draft(contents: &str) -> Result<EstimateDraft> {
    toml::from_str(contents).map_err(|e| Error::Draft {
        message: format!("Failed to parse draft: {e}"),
    })
}

/// Loads a draft from a TOML file.
///
/// # Errors
/// Returns [`Error::Draft`] when the file cannot be read or parsed.
pub fn load_draft<P: AsRef<Path>>(path: P) -> Result<EstimateDraft> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading estimate draft from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Draft {
        message: format!("Failed to read draft file {}: {e}", path_ref.display()),
    })?;
    parse_draft(&contents)
}
