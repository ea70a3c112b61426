//! View, stored procedure and function comparison
//!
//! These objects are opaque SQL text. A changed definition is dropped and
//! re-created rather than altered in place.

use schemashift_core::{names_match, owners_match, ModelError, ResultType, SchemaObjectType, SqlDefined};
use schemashift_sqlgen::Rendered;
use crate::comparers::{staged, ObjectComparer};
use crate::context::CompareContext;
use crate::stage::{Stage, StagedResult};

fn same_object<T: SqlDefined>(a: &T, b: &T) -> bool {
    names_match(a.name(), b.name()) && owners_match(a.schema_owner(), b.schema_owner())
}

/// Drops and adds for one kind of SQL-defined object
fn compare_objects<T: SqlDefined>(
    object_type: SchemaObjectType,
    base: &[T],
    target: &[T],
    add: impl Fn(&T) -> Rendered,
    drop: impl Fn(&T) -> Rendered,
    results: &mut Vec<StagedResult>,
) {
    for old in base {
        let kept = target
            .iter()
            .find(|new| same_object(*new, old))
            .map_or(false, |new| new.same_sql(old));
        if !kept {
            results.push(staged(Stage::DropRoutines, object_type, ResultType::Delete, old.name(), drop(old)));
        }
    }

    for new in target {
        let kept = base
            .iter()
            .find(|old| same_object(*old, new))
            .map_or(false, |old| old.same_sql(new));
        if !kept {
            results.push(staged(Stage::AddRoutines, object_type, ResultType::Add, new.name(), add(new)));
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoutineComparer;

impl ObjectComparer for RoutineComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        let generator = ctx.generator;
        let options = ctx.options;
        let mut results = Vec::new();

        if options.include_views {
            compare_objects(
                SchemaObjectType::View,
                &ctx.base.views,
                &ctx.target.views,
                |view| generator.add_view(view),
                |view| generator.drop_view(view),
                &mut results,
            );
        }

        if options.include_procedures {
            compare_objects(
                SchemaObjectType::StoredProcedure,
                &ctx.base.stored_procedures,
                &ctx.target.stored_procedures,
                |procedure| generator.add_procedure(procedure),
                |procedure| generator.drop_procedure(procedure),
                &mut results,
            );
        }

        if options.include_functions {
            compare_objects(
                SchemaObjectType::Function,
                &ctx.base.functions,
                &ctx.target.functions,
                |function| generator.add_function(function),
                |function| generator.drop_function(function),
                &mut results,
            );
        }

        tracing::debug!(results = results.len(), "compared views and routines");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemashift_core::{CompareOptions, DatabaseSchema, Dialect, Function, StoredProcedure, View};
    use schemashift_sqlgen::generator_for;

    fn run(base: &DatabaseSchema, target: &DatabaseSchema, dialect: Dialect) -> Vec<StagedResult> {
        let generator = generator_for(dialect);
        let options = CompareOptions::default();
        let ctx = CompareContext::new(base, target, generator.as_ref(), &options);
        RoutineComparer.compare(&ctx).unwrap()
    }

    #[test]
    fn changed_view_is_recreated() {
        let base = DatabaseSchema::new()
            .with_view(View::new("vw_ActiveCustomers", "CREATE VIEW vw_ActiveCustomers AS SELECT Id FROM Customers"));
        let target = DatabaseSchema::new().with_view(View::new(
            "vw_ActiveCustomers",
            "CREATE VIEW vw_ActiveCustomers AS SELECT Id, Name FROM Customers",
        ));

        let results = run(&base, &target, Dialect::SqlServer);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].stage, Stage::DropRoutines);
        assert_eq!(results[0].result.script, "DROP VIEW [vw_ActiveCustomers];");
        assert_eq!(results[1].stage, Stage::AddRoutines);
        assert_eq!(
            results[1].result.script,
            "CREATE VIEW vw_ActiveCustomers AS SELECT Id, Name FROM Customers;"
        );
    }

    #[test]
    fn views_then_procedures_then_functions() {
        let target = DatabaseSchema::new()
            .with_function(Function::new("fn_Total", "CREATE FUNCTION fn_Total() RETURNS INT AS BEGIN RETURN 1 END"))
            .with_procedure(StoredProcedure::new("usp_Touch", "CREATE PROCEDURE usp_Touch AS SELECT 1"))
            .with_view(View::new("vw_All", "CREATE VIEW vw_All AS SELECT 1 AS One"));

        let results = run(&DatabaseSchema::new(), &target, Dialect::SqlServer);
        let types: Vec<_> = results.iter().map(|r| r.result.object_type).collect();
        assert_eq!(
            types,
            vec![SchemaObjectType::View, SchemaObjectType::StoredProcedure, SchemaObjectType::Function]
        );
    }

    #[test]
    fn sqlite_has_no_procedures() {
        let target = DatabaseSchema::new()
            .with_procedure(StoredProcedure::new("usp_Touch", "CREATE PROCEDURE usp_Touch AS SELECT 1"));

        let results = run(&DatabaseSchema::new(), &target, Dialect::Sqlite);
        assert_eq!(results[0].result.script, "-- SQLite does not support stored procedures: usp_Touch");
    }
}
