//! Sequence comparison
//!
//! Sequences are added or dropped only. A sequence present in both
//! snapshots is left alone even when its start or increment differ.

use schemashift_core::{names_match, owners_match, ModelError, ResultType, SchemaObjectType, Sequence};
use crate::comparers::{staged, ObjectComparer};
use crate::context::CompareContext;
use crate::stage::{Stage, StagedResult};

fn same_sequence(a: &Sequence, b: &Sequence) -> bool {
    names_match(&a.name, &b.name) && owners_match(a.schema_owner.as_deref(), b.schema_owner.as_deref())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceComparer;

impl ObjectComparer for SequenceComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        if !ctx.options.include_sequences {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();

        for sequence in &ctx.target.sequences {
            if !ctx.base.sequences.iter().any(|s| same_sequence(s, sequence)) {
                results.push(staged(
                    Stage::AddSequences,
                    SchemaObjectType::Sequence,
                    ResultType::Add,
                    &sequence.name,
                    ctx.generator.add_sequence(sequence),
                ));
            }
        }

        for sequence in &ctx.base.sequences {
            if !ctx.target.sequences.iter().any(|s| same_sequence(s, sequence)) {
                results.push(staged(
                    Stage::DropSequences,
                    SchemaObjectType::Sequence,
                    ResultType::Delete,
                    &sequence.name,
                    ctx.generator.drop_sequence(sequence),
                ));
            }
        }

        tracing::debug!(results = results.len(), "compared sequences");
        Ok(results)
    }
}
