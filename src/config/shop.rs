//! Shop and estimate settings loaded from `estimate.toml`.
//!
//! Every field has a default, so a partial file only overrides what it names
//! and a missing file yields the stock settings.

use crate::core::form::{MAX_SALE_LINES, MAX_TRADE_IN_LINES, RowLimits};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Used when `ESTIMATE_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "estimate.toml";

/// The whole `estimate.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Shop letterhead
    pub shop: ShopDetails,
    /// Estimate numbering, limits and printed text
    pub estimate: EstimateSettings,
}

/// Letterhead printed at the top of every estimate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopDetails {
    /// Shop name
    pub name: String,
    /// Street address
    pub address: String,
    /// Contact number
    pub phone: String,
}

impl Default for ShopDetails {
    fn default() -> Self {
        Self {
            name: "Prakash Jewellers".to_string(),
            address: "Near Thakur Dwara Mandir, Main Market, Deoband".to_string(),
            phone: "+91-9897452528".to_string(),
        }
    }
}

/// Numbering, row limits and fixed text for the estimate body.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EstimateSettings {
    /// Prefix in front of the estimate number (e.g. `PJ-`)
    pub number_prefix: String,
    /// Minimum digits in the estimate number
    pub number_width: usize,
    /// Most sale lines per estimate
    pub max_sale_lines: usize,
    /// Most trade-in lines per estimate
    pub max_trade_in_lines: usize,
    /// Symbol printed before amounts
    pub currency_symbol: String,
    /// Appended to the total in words
    pub words_suffix: String,
    /// Terms printed under the signature line
    pub terms: Vec<String>,
    /// Last line of the estimate
    pub closing_note: String,
    /// Paper the estimate is printed on
    pub page_size: PageSize,
}

/// Paper size for the printed estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PageSize {
    /// Full sheet
    #[default]
    #[serde(alias = "a4")]
    A4,
    /// Half sheet
    #[serde(alias = "a5")]
    A5,
}

impl PageSize {
    /// Characters per printed line; rules, centred text and the signature
    /// block are laid out to this width.
    #[must_use]
    pub const fn line_width(self) -> usize {
        match self {
            Self::A4 => 72,
            Self::A5 => 56,
        }
    }
}

impl Default for EstimateSettings {
    fn default() -> Self {
        Self {
            number_prefix: "PJ-".to_string(),
            number_width: 3,
            max_sale_lines: MAX_SALE_LINES,
            max_trade_in_lines: MAX_TRADE_IN_LINES,
            currency_symbol: "₹".to_string(),
            words_suffix: "Rupees Only".to_string(),
            terms: vec![
                "सामान बदलने की सुविधा केवल 3 दिनों तक ही उपलब्ध है।".to_string(),
                "इसके बाद वापसी केवल 85% मूल्य पर स्वीकार की जाएगी।".to_string(),
                "लोंग एवं छोटी बाली 75% की ही आती है।".to_string(),
            ],
            closing_note: "Thank you for visiting 🙏".to_string(),
            page_size: PageSize::A4,
        }
    }
}

impl ShopConfig {
    /// Row ceilings for a form built under these settings.
    #[must_use]
    pub const fn row_limits(&self) -> RowLimits {
        RowLimits {
            max_sale_lines: self.estimate.max_sale_lines,
            max_trade_in_lines: self.estimate.max_trade_in_lines,
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is invalid.
pub fn parse_config(contents: &str) -> Result<ShopConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse estimate config: {e}"),
    })
}

/// Loads settings from `ESTIMATE_CONFIG` (default `estimate.toml`).
///
/// A missing file falls back to the stock settings; a file that exists but
/// cannot be parsed is an error.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_app_config() -> Result<ShopConfig> {
    let path =
        std::env::var("ESTIMATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if Path::new(&path).exists() {
        let config = load_config(&path)?;
        tracing::info!("Loaded estimate configuration from {}", path);
        Ok(config)
    } else {
        tracing::warn!("No configuration at {}, using defaults", path);
        Ok(ShopConfig::default())
    }
}
