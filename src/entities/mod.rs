//! Entity module - Contains the SeaORM entity definitions for the database.
//! The estimate crate only persists its counters; everything else lives in memory.

pub mod sequence;

pub use sequence::{Column as SequenceColumn, Entity as Sequence, Model as SequenceModel};
