//! Table comparison
//!
//! New tables are created in foreign key dependency order, old ones are
//! dropped after every constraint pointing at them is gone. Tables present
//! in both snapshots are renamed if hinted, then handed to the column
//! comparer.

use schemashift_core::{ModelError, ResultType, SchemaObjectType};
use crate::comparers::{staged, ColumnComparer, ObjectComparer};
use crate::context::CompareContext;
use crate::dependency::order_by_dependencies;
use crate::stage::{Stage, StagedResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct TableComparer;

impl ObjectComparer for TableComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        let generator = ctx.generator;
        let mut results = Vec::new();

        for pair in &ctx.tables.matched {
            if pair.is_renamed() {
                results.push(staged(
                    Stage::Renames,
                    SchemaObjectType::Table,
                    ResultType::Change,
                    &pair.target.name,
                    generator.rename_table(pair.target, &pair.base.name),
                ));
            }

            results.extend(ColumnComparer.compare_pair(ctx, pair));
        }

        for table in order_by_dependencies(&ctx.tables.added) {
            results.push(staged(
                Stage::AddTables,
                SchemaObjectType::Table,
                ResultType::Add,
                &table.name,
                generator.add_table(table, ctx.target)?,
            ));
        }

        for table in &ctx.tables.dropped {
            results.push(staged(
                Stage::DropTables,
                SchemaObjectType::Table,
                ResultType::Delete,
                &table.name,
                generator.drop_table(table),
            ));
        }

        tracing::debug!(
            added = ctx.tables.added.len(),
            dropped = ctx.tables.dropped.len(),
            matched = ctx.tables.matched.len(),
            "compared tables"
        );

        Ok(results)
    }
}
