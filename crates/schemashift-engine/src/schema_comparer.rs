//! Schema comparison orchestrator
//!
//! Runs every comparer against a pair of snapshots and merges their staged
//! results into one canonical execution order:
//! - Drops of dependent objects (triggers, routines, foreign keys, indexes, keys)
//! - New types and sequences, then renames
//! - New tables, column changes, new keys, indexes and foreign keys
//! - Dropped tables, sequences and types
//! - New routines and triggers

use schemashift_core::{
    CompareOptions, CompareResult, Config, DatabaseSchema, Dialect, ModelError, SeverityThreshold,
};
use schemashift_sqlgen::{generator_for, MigrationGenerator};
use crate::comparers::{
    ConstraintComparer, DataTypeComparer, IndexComparer, ObjectComparer, RoutineComparer,
    SequenceComparer, TableComparer, TriggerComparer,
};
use crate::context::CompareContext;
use crate::stage::merge;

/// Compares two schema snapshots for one dialect
pub struct SchemaComparer {
    generator: Box<dyn MigrationGenerator>,
    options: CompareOptions,
    severity: SeverityThreshold,
}

impl SchemaComparer {
    /// Comparer with default options
    pub fn new(dialect: Dialect) -> Self {
        Self {
            generator: generator_for(dialect),
            options: CompareOptions::default(),
            severity: SeverityThreshold::default(),
        }
    }

    /// Dialect, options and severity overrides from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.dialect)
            .with_options(config.compare.clone())
            .with_severity(config.severity.clone())
    }

    /// Use a custom generator, e.g. for a dialect outside the built-in set
    pub fn with_generator(mut self, generator: Box<dyn MigrationGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_severity(mut self, severity: SeverityThreshold) -> Self {
        self.severity = severity;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.generator.dialect()
    }

    /// Results turning `base` into `target`, in execution order
    ///
    /// Both snapshots are validated first; a broken model aborts the run
    /// without partial output.
    pub fn compare(
        &self,
        base: &DatabaseSchema,
        target: &DatabaseSchema,
    ) -> Result<Vec<CompareResult>, ModelError> {
        base.validate()?;
        target.validate()?;

        let ctx = CompareContext::new(base, target, self.generator.as_ref(), &self.options);
        let comparers: [&dyn ObjectComparer; 7] = [
            &TriggerComparer,
            &RoutineComparer,
            &ConstraintComparer,
            &IndexComparer,
            &DataTypeComparer,
            &SequenceComparer,
            &TableComparer,
        ];

        let mut staged = Vec::new();
        for comparer in comparers {
            staged.extend(comparer.compare(&ctx)?);
        }

        let mut results = merge(staged);
        self.apply_severity(&mut results);

        tracing::info!(
            dialect = %self.dialect(),
            results = results.len(),
            diagnostics = results.iter().map(|r| r.diagnostics.len()).sum::<usize>(),
            "schema comparison complete"
        );

        Ok(results)
    }

    /// Full creation script for `schema`
    pub fn create(&self, schema: &DatabaseSchema) -> Result<Vec<CompareResult>, ModelError> {
        self.compare(&DatabaseSchema::default(), schema)
    }

    fn apply_severity(&self, results: &mut [CompareResult]) {
        for diagnostic in results.iter_mut().flat_map(|r| r.diagnostics.iter_mut()) {
            diagnostic.severity = self.severity.get_severity(diagnostic.code, diagnostic.severity);
        }
    }
}
