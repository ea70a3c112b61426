//! Primary, unique, check and foreign key comparison
//!
//! Constraints match by name within their table. Drops address the table by
//! its base name because they run before renames; adds use the target name.
//! Default constraints belong to the column comparer.

use schemashift_core::{names_match, Constraint, ModelError, ResultType, SchemaObjectType, Table};
use schemashift_sqlgen::resolve_foreign_key;
use crate::comparers::{staged_on, ObjectComparer};
use crate::context::{CompareContext, TablePair};
use crate::stage::{Stage, StagedResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConstraintComparer;

impl ConstraintComparer {
    fn drop(&self, ctx: &CompareContext<'_>, stage: Stage, table: &Table, constraint: &Constraint) -> StagedResult {
        staged_on(
            stage,
            SchemaObjectType::Constraint,
            ResultType::Delete,
            table,
            &constraint.name,
            ctx.generator.drop_constraint(table, constraint),
        )
    }

    fn add(&self, ctx: &CompareContext<'_>, stage: Stage, table: &Table, constraint: &Constraint) -> Result<StagedResult, ModelError> {
        Ok(staged_on(
            stage,
            SchemaObjectType::Constraint,
            ResultType::Add,
            table,
            &constraint.name,
            ctx.generator.add_constraint(table, constraint, ctx.target)?,
        ))
    }

    fn add_foreign_key(&self, ctx: &CompareContext<'_>, table: &Table, fk: &Constraint) -> Result<StagedResult, ModelError> {
        // column counts are checked even where the dialect cannot add the key
        resolve_foreign_key(table, fk, Some(ctx.target))?;
        self.add(ctx, Stage::AddForeignKeys, table, fk)
    }

    /// Diff two lists of constraints matched by name
    fn compare_list(
        &self,
        ctx: &CompareContext<'_>,
        pair: &TablePair<'_>,
        base: &[Constraint],
        target: &[Constraint],
        stages: (Stage, Stage),
        results: &mut Vec<StagedResult>,
    ) -> Result<(), ModelError> {
        let (drop_stage, add_stage) = stages;

        for old in base {
            let kept = target
                .iter()
                .find(|c| names_match(&c.name, &old.name))
                .map_or(false, |new| new.same_definition(old));
            if !kept {
                results.push(self.drop(ctx, drop_stage, pair.base, old));
            }
        }

        for new in target {
            let kept = base
                .iter()
                .find(|c| names_match(&c.name, &new.name))
                .map_or(false, |old| old.same_definition(new));
            if kept {
                continue;
            }

            if add_stage == Stage::AddForeignKeys {
                results.push(self.add_foreign_key(ctx, pair.target, new)?);
            } else {
                results.push(self.add(ctx, add_stage, pair.target, new)?);
            }
        }

        Ok(())
    }

    /// Foreign keys left unchanged on matched tables that reference a key
    /// being dropped; they are dropped first and added back afterwards
    fn rebuild_dependent_foreign_keys(
        &self,
        ctx: &CompareContext<'_>,
        rebuilt: &[&Table],
        results: &mut Vec<StagedResult>,
    ) -> Result<(), ModelError> {
        for pair in &ctx.tables.matched {
            for old in &pair.base.foreign_keys {
                let Some(new) = pair
                    .target
                    .foreign_keys
                    .iter()
                    .find(|c| names_match(&c.name, &old.name) && c.same_definition(old))
                else {
                    continue;
                };

                let referenced = old
                    .refers_to_table
                    .as_deref()
                    .and_then(|name| ctx.base.find_table(name, old.refers_to_schema.as_deref()));
                let Some(referenced) = referenced else {
                    continue;
                };
                if !rebuilt.iter().any(|t| std::ptr::eq(*t, referenced)) {
                    continue;
                }

                tracing::debug!(
                    table = %pair.base.name,
                    foreign_key = %old.name,
                    "rebuilding foreign key over changed key"
                );
                results.push(self.drop(ctx, Stage::DropForeignKeys, pair.base, old));
                results.push(self.add_foreign_key(ctx, pair.target, new)?);
            }
        }

        Ok(())
    }
}

/// Whether a primary or unique key of the table is dropped or redefined
fn referenced_keys_change(base: &Table, target: &Table) -> bool {
    let target_keys: Vec<&Constraint> = target.primary_key.iter().chain(&target.unique_keys).collect();
    base.primary_key.iter().chain(&base.unique_keys).any(|old| {
        !target_keys
            .iter()
            .any(|new| names_match(&new.name, &old.name) && new.same_definition(old))
    })
}

impl ObjectComparer for ConstraintComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        let inline_foreign_keys = ctx.generator.profile().foreign_keys_inline;
        let mut results = Vec::new();
        let mut rebuilt = Vec::new();

        for pair in &ctx.tables.matched {
            let (base, target) = (pair.base, pair.target);
            if referenced_keys_change(base, target) {
                rebuilt.push(base);
            }

            self.compare_list(
                ctx,
                pair,
                &base.foreign_keys,
                &target.foreign_keys,
                (Stage::DropForeignKeys, Stage::AddForeignKeys),
                &mut results,
            )?;

            let keys = |table: &Table| -> Vec<Constraint> {
                table
                    .primary_key
                    .iter()
                    .chain(&table.unique_keys)
                    .chain(&table.check_constraints)
                    .cloned()
                    .collect()
            };
            self.compare_list(
                ctx,
                pair,
                &keys(base),
                &keys(target),
                (Stage::DropConstraints, Stage::AddConstraints),
                &mut results,
            )?;
        }

        // keys of new and dropped tables live in CREATE/DROP TABLE, except
        // foreign keys where the dialect adds them separately
        if !inline_foreign_keys {
            if !rebuilt.is_empty() {
                self.rebuild_dependent_foreign_keys(ctx, &rebuilt, &mut results)?;
            }

            for table in &ctx.tables.added {
                for fk in &table.foreign_keys {
                    results.push(self.add_foreign_key(ctx, table, fk)?);
                }
            }

            for table in &ctx.tables.dropped {
                for fk in &table.foreign_keys {
                    results.push(self.drop(ctx, Stage::DropForeignKeys, table, fk));
                }
            }
        }

        tracing::debug!(results = results.len(), "compared constraints");
        Ok(results)
    }
}
