//! Shared state for one comparison run

use schemashift_core::{names_match, owners_match, CompareOptions, DatabaseSchema, Table};
use schemashift_sqlgen::MigrationGenerator;

/// A table present in both snapshots
#[derive(Debug, Clone, Copy)]
pub struct TablePair<'a> {
    pub base: &'a Table,
    pub target: &'a Table,
}

impl<'a> TablePair<'a> {
    /// Matched through an `original_name` hint rather than by name
    pub fn is_renamed(&self) -> bool {
        !names_match(&self.base.name, &self.target.name)
    }
}

/// Tables of both snapshots, paired up
#[derive(Debug, Default)]
pub struct TableMatches<'a> {
    /// In target order
    pub matched: Vec<TablePair<'a>>,

    /// Only in the target, in target order
    pub added: Vec<&'a Table>,

    /// Only in the base, in base order
    pub dropped: Vec<&'a Table>,
}

impl<'a> TableMatches<'a> {
    /// Pair tables by (name, schema); unpaired target tables may then claim
    /// an unpaired base table through their rename hint
    pub fn build(base: &'a DatabaseSchema, target: &'a DatabaseSchema, options: &CompareOptions) -> Self {
        let included = |t: &&Table| !options.is_table_excluded(&t.name, t.schema_owner.as_deref());
        let base_tables: Vec<&Table> = base.tables.iter().filter(included).collect();
        let target_tables: Vec<&Table> = target.tables.iter().filter(included).collect();

        let mut claimed = vec![false; base_tables.len()];
        let mut pairs: Vec<Option<usize>> = vec![None; target_tables.len()];

        for (ti, table) in target_tables.iter().enumerate() {
            let found = (0..base_tables.len()).find(|&bi| {
                !claimed[bi] && same_table(base_tables[bi], &table.name, table.schema_owner.as_deref())
            });
            if let Some(bi) = found {
                claimed[bi] = true;
                pairs[ti] = Some(bi);
            }
        }

        if options.use_rename_hints {
            for (ti, table) in target_tables.iter().enumerate() {
                let Some(original) = table.original_name.as_deref() else {
                    continue;
                };
                if pairs[ti].is_some() {
                    continue;
                }

                let found = (0..base_tables.len()).find(|&bi| {
                    !claimed[bi] && same_table(base_tables[bi], original, table.schema_owner.as_deref())
                });
                if let Some(bi) = found {
                    claimed[bi] = true;
                    pairs[ti] = Some(bi);
                }
            }
        }

        let mut matches = Self::default();
        for (ti, &table) in target_tables.iter().enumerate() {
            match pairs[ti] {
                Some(bi) => matches.matched.push(TablePair { base: base_tables[bi], target: table }),
                None => matches.added.push(table),
            }
        }
        matches.dropped = base_tables
            .iter()
            .enumerate()
            .filter(|(bi, _)| !claimed[*bi])
            .map(|(_, t)| *t)
            .collect();

        matches
    }
}

fn same_table(table: &Table, name: &str, schema: Option<&str>) -> bool {
    names_match(&table.name, name) && owners_match(table.schema_owner.as_deref(), schema)
}

/// Everything a comparer needs
pub struct CompareContext<'a> {
    pub base: &'a DatabaseSchema,
    pub target: &'a DatabaseSchema,
    pub generator: &'a dyn MigrationGenerator,
    pub options: &'a CompareOptions,
    pub tables: TableMatches<'a>,
}

impl<'a> CompareContext<'a> {
    pub fn new(
        base: &'a DatabaseSchema,
        target: &'a DatabaseSchema,
        generator: &'a dyn MigrationGenerator,
        options: &'a CompareOptions,
    ) -> Self {
        Self {
            base,
            target,
            generator,
            options,
            tables: TableMatches::build(base, target, options),
        }
    }
}
