//! Sequence entity - Persists named counters across sessions.
//!
//! Each row is one counter, such as the running estimate number. Rows are
//! created on first use and only ever move forward.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sequence database model - one named, monotonically increasing counter
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sequences")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Counter name (e.g., `"estimate_number"`)
    #[sea_orm(unique)]
    pub name: String,
    /// Last value handed out
    pub last_value: i64,
    /// When the counter last moved
    pub updated_at: DateTime,
}

/// Sequences have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
