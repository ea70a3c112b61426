//! Execution stages
//!
//! Every comparer tags its results with a [`Stage`]. The schema comparer
//! stable-sorts on the stage, so the declaration order below is the order
//! statements run in, and results within a stage keep the order their
//! comparer produced them in.

use schemashift_core::CompareResult;

/// Canonical position of a statement in a migration script
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    DropTriggers,
    /// Views, procedures and functions
    DropRoutines,
    DropForeignKeys,
    DropIndexes,
    /// Primary, unique and check constraints
    DropConstraints,
    AddDataTypes,
    AddSequences,
    /// Table renames, then column renames
    Renames,
    /// Referenced tables before referencing tables
    AddTables,
    /// Added and altered columns
    AlterColumns,
    DropColumns,
    AddConstraints,
    AddIndexes,
    AddForeignKeys,
    DropTables,
    DropSequences,
    DropDataTypes,
    AddRoutines,
    AddTriggers,
}

/// A result waiting to be merged into canonical order
#[derive(Debug, Clone, PartialEq)]
pub struct StagedResult {
    pub stage: Stage,
    pub result: CompareResult,
}

impl StagedResult {
    pub fn new(stage: Stage, result: CompareResult) -> Self {
        Self { stage, result }
    }
}

/// Stable merge by stage
pub fn merge(mut staged: Vec<StagedResult>) -> Vec<CompareResult> {
    staged.sort_by_key(|s| s.stage);
    staged.into_iter().map(|s| s.result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemashift_core::{ResultType, SchemaObjectType};

    fn staged(stage: Stage, name: &str) -> StagedResult {
        StagedResult::new(
            stage,
            CompareResult::new(SchemaObjectType::Table, ResultType::Add, name, ""),
        )
    }

    #[test]
    fn drops_run_before_adds() {
        assert!(Stage::DropTriggers < Stage::DropForeignKeys);
        assert!(Stage::DropConstraints < Stage::AddDataTypes);
        assert!(Stage::AddDataTypes < Stage::AddSequences);
        assert!(Stage::AddTables < Stage::AddForeignKeys);
        assert!(Stage::DropTables < Stage::DropSequences);
        assert!(Stage::DropSequences < Stage::DropDataTypes);
        assert!(Stage::AddRoutines < Stage::AddTriggers);
    }

    #[test]
    fn merge_is_stable_within_a_stage() {
        let merged = merge(vec![
            staged(Stage::AddForeignKeys, "fk"),
            staged(Stage::AddTables, "Customers"),
            staged(Stage::DropTriggers, "trg"),
            staged(Stage::AddTables, "Orders"),
        ]);

        let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["trg", "Customers", "Orders", "fk"]);
    }
}
