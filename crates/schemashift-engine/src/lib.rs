//! SchemaShift engine - schema comparison
//!
//! This crate implements the comparison logic for SchemaShift:
//! - Per-object comparers (tables, columns, keys, indexes, triggers, ...)
//! - Canonical statement ordering by stage
//! - Migration and creation scripts
//! - Script rendering

pub mod comparers;
pub mod context;
pub mod dependency;
pub mod schema_comparer;
pub mod stage;
pub mod writer;

pub use comparers::ObjectComparer;
pub use context::{CompareContext, TableMatches, TablePair};
pub use schema_comparer::SchemaComparer;
pub use stage::{Stage, StagedResult};
pub use writer::ComparisonWriter;
