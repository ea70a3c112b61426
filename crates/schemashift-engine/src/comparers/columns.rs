//! Column comparison within a matched table

use schemashift_core::{names_match, Column, ResultType, SchemaObjectType, Table};
use schemashift_sqlgen::SqlTranslator;
use crate::comparers::staged_on;
use crate::context::{CompareContext, TablePair};
use crate::stage::{Stage, StagedResult};

/// Whether two columns need an ALTER
pub fn column_changed(column: &Column, original: &Column) -> bool {
    !column.data_type.same_as(&original.data_type)
        || column.is_nullable() != original.is_nullable()
        || column.identity != original.identity
        || !SqlTranslator::defaults_equal(column.default_value.as_deref(), original.default_value.as_deref())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnComparer;

impl ColumnComparer {
    /// Statements turning the base table's columns into the target's
    ///
    /// Statements address the table by its target name; renames run
    /// before any column change.
    pub fn compare_pair(&self, ctx: &CompareContext<'_>, pair: &TablePair<'_>) -> Vec<StagedResult> {
        let generator = ctx.generator;
        let (base, target) = (pair.base, pair.target);
        let mut claimed = vec![false; base.columns.len()];
        let mut results = Vec::new();

        for column in &target.columns {
            let original = match find_unclaimed(base, &claimed, &column.name) {
                Some(index) => Some(index),
                None if ctx.options.use_rename_hints => column
                    .original_name
                    .as_deref()
                    .filter(|name| target.find_column(name).is_none())
                    .and_then(|name| find_unclaimed(base, &claimed, name)),
                None => None,
            };

            let Some(index) = original else {
                results.push(staged_on(
                    Stage::AlterColumns,
                    SchemaObjectType::Column,
                    ResultType::Add,
                    target,
                    &column.name,
                    generator.add_column(target, column),
                ));
                continue;
            };

            claimed[index] = true;
            let original = &base.columns[index];

            if !names_match(&original.name, &column.name) {
                results.push(staged_on(
                    Stage::Renames,
                    SchemaObjectType::Column,
                    ResultType::Change,
                    target,
                    &column.name,
                    generator.rename_column(target, column, &original.name),
                ));
            }

            if column_changed(column, original) {
                results.push(staged_on(
                    Stage::AlterColumns,
                    SchemaObjectType::Column,
                    ResultType::Change,
                    target,
                    &column.name,
                    generator.alter_column(target, column, base, original),
                ));
            }
        }

        for (index, column) in base.columns.iter().enumerate() {
            if claimed[index] {
                continue;
            }

            results.push(staged_on(
                Stage::DropColumns,
                SchemaObjectType::Column,
                ResultType::Delete,
                target,
                &column.name,
                generator.drop_column(target, column, base),
            ));
        }

        tracing::debug!(table = %target.qualified_name(), results = results.len(), "compared columns");
        results
    }
}

fn find_unclaimed(table: &Table, claimed: &[bool], name: &str) -> Option<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .find(|(i, c)| !claimed[*i] && names_match(&c.name, name))
        .map(|(i, _)| i)
}
