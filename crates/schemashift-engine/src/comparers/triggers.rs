//! Trigger comparison
//!
//! Triggers have no alter path: a changed body is dropped and re-created.

use schemashift_core::{names_match, ModelError, ResultType, SchemaObjectType, Table, Trigger};
use crate::comparers::{staged_on, ObjectComparer};
use crate::context::CompareContext;
use crate::stage::{Stage, StagedResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct TriggerComparer;

impl TriggerComparer {
    fn add(&self, ctx: &CompareContext<'_>, table: &Table, trigger: &Trigger) -> StagedResult {
        staged_on(
            Stage::AddTriggers,
            SchemaObjectType::Trigger,
            ResultType::Add,
            table,
            &trigger.name,
            ctx.generator.add_trigger(table, trigger),
        )
    }

    fn drop(&self, ctx: &CompareContext<'_>, table: &Table, trigger: &Trigger) -> StagedResult {
        staged_on(
            Stage::DropTriggers,
            SchemaObjectType::Trigger,
            ResultType::Delete,
            table,
            &trigger.name,
            ctx.generator.drop_trigger(table, trigger),
        )
    }
}

impl ObjectComparer for TriggerComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        if !ctx.options.include_triggers {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();

        for pair in &ctx.tables.matched {
            let (base, target) = (pair.base, pair.target);

            for old in &base.triggers {
                let kept = target
                    .triggers
                    .iter()
                    .find(|t| names_match(&t.name, &old.name))
                    .map_or(false, |new| new.same_body(old));
                if !kept {
                    results.push(self.drop(ctx, base, old));
                }
            }

            for new in &target.triggers {
                let kept = base
                    .triggers
                    .iter()
                    .find(|t| names_match(&t.name, &new.name))
                    .map_or(false, |old| old.same_body(new));
                if !kept {
                    results.push(self.add(ctx, target, new));
                }
            }
        }

        for table in &ctx.tables.added {
            results.extend(table.triggers.iter().map(|trigger| self.add(ctx, table, trigger)));
        }

        for table in &ctx.tables.dropped {
            results.extend(table.triggers.iter().map(|trigger| self.drop(ctx, table, trigger)));
        }

        tracing::debug!(results = results.len(), "compared triggers");
        Ok(results)
    }
}
