//! Index comparison

use schemashift_core::{names_match, Index, ModelError, ResultType, SchemaObjectType, Table};
use crate::comparers::{staged_on, ObjectComparer};
use crate::context::CompareContext;
use crate::stage::{Stage, StagedResult};

/// Indexes that only back a primary or unique key of the same name
fn backs_key(table: &Table, index: &Index) -> bool {
    table
        .primary_key
        .iter()
        .chain(&table.unique_keys)
        .any(|key| names_match(&key.name, &index.name))
}

fn own_indexes(table: &Table) -> impl Iterator<Item = &Index> {
    table.indexes.iter().filter(move |index| !backs_key(table, index))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IndexComparer;

impl IndexComparer {
    fn add(&self, ctx: &CompareContext<'_>, table: &Table, index: &Index) -> StagedResult {
        staged_on(
            Stage::AddIndexes,
            SchemaObjectType::Index,
            ResultType::Add,
            table,
            &index.name,
            ctx.generator.add_index(table, index),
        )
    }

    fn drop(&self, ctx: &CompareContext<'_>, table: &Table, index: &Index) -> StagedResult {
        staged_on(
            Stage::DropIndexes,
            SchemaObjectType::Index,
            ResultType::Delete,
            table,
            &index.name,
            ctx.generator.drop_index(table, index),
        )
    }
}

impl ObjectComparer for IndexComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        let mut results = Vec::new();

        for pair in &ctx.tables.matched {
            let (base, target) = (pair.base, pair.target);

            for old in own_indexes(base) {
                let kept = own_indexes(target)
                    .find(|i| names_match(&i.name, &old.name))
                    .map_or(false, |new| new.same_definition(old));
                if !kept {
                    results.push(self.drop(ctx, base, old));
                }
            }

            for new in own_indexes(target) {
                let kept = own_indexes(base)
                    .find(|i| names_match(&i.name, &new.name))
                    .map_or(false, |old| old.same_definition(new));
                if !kept {
                    results.push(self.add(ctx, target, new));
                }
            }
        }

        for table in &ctx.tables.added {
            results.extend(own_indexes(table).map(|index| self.add(ctx, table, index)));
        }

        for table in &ctx.tables.dropped {
            results.extend(own_indexes(table).map(|index| self.drop(ctx, table, index)));
        }

        tracing::debug!(results = results.len(), "compared indexes");
        Ok(results)
    }
}
