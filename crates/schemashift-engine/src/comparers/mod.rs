//! Per-object comparers
//!
//! Each comparer looks at one kind of object in both snapshots and emits
//! staged results. Comparers never see a concrete dialect, only the
//! [`MigrationGenerator`](schemashift_sqlgen::MigrationGenerator) in the
//! context.

mod columns;
mod constraints;
mod data_types;
mod indexes;
mod routines;
mod sequences;
mod tables;
mod triggers;

pub use columns::ColumnComparer;
pub use constraints::ConstraintComparer;
pub use data_types::DataTypeComparer;
pub use indexes::IndexComparer;
pub use routines::RoutineComparer;
pub use sequences::SequenceComparer;
pub use tables::TableComparer;
pub use triggers::TriggerComparer;

use schemashift_core::{CompareResult, ModelError, ResultType, SchemaObjectType, Table};
use schemashift_sqlgen::Rendered;
use crate::context::CompareContext;
use crate::stage::{Stage, StagedResult};

/// Compares one kind of schema object
pub trait ObjectComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError>;
}

/// Stage a rendered statement for a schema-level object
pub(crate) fn staged(
    stage: Stage,
    object_type: SchemaObjectType,
    result_type: ResultType,
    name: &str,
    rendered: Rendered,
) -> StagedResult {
    StagedResult::new(
        stage,
        CompareResult::new(object_type, result_type, name, rendered.sql).with_diagnostics(rendered.diagnostics),
    )
}

/// Stage a rendered statement for an object owned by `table`
pub(crate) fn staged_on(
    stage: Stage,
    object_type: SchemaObjectType,
    result_type: ResultType,
    table: &Table,
    name: &str,
    rendered: Rendered,
) -> StagedResult {
    let mut staged = staged(stage, object_type, result_type, name, rendered);
    staged.result = staged.result.with_table(&table.name);
    staged
}
