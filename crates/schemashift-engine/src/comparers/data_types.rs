//! User data type comparison
//!
//! A changed type is a single result that drops and re-creates it before any
//! table is touched.

use schemashift_core::{names_match, owners_match, ModelError, ResultType, SchemaObjectType, UserDataType};
use crate::comparers::{staged, ObjectComparer};
use crate::context::CompareContext;
use crate::stage::{Stage, StagedResult};

fn same_type(a: &UserDataType, b: &UserDataType) -> bool {
    names_match(&a.name, &b.name) && owners_match(a.schema_owner.as_deref(), b.schema_owner.as_deref())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DataTypeComparer;

impl ObjectComparer for DataTypeComparer {
    fn compare(&self, ctx: &CompareContext<'_>) -> Result<Vec<StagedResult>, ModelError> {
        if !ctx.options.include_data_types {
            return Ok(Vec::new());
        }

        let generator = ctx.generator;
        let mut results = Vec::new();

        for new in &ctx.target.data_types {
            match ctx.base.data_types.iter().find(|old| same_type(old, new)) {
                None => results.push(staged(
                    Stage::AddDataTypes,
                    SchemaObjectType::DataType,
                    ResultType::Add,
                    &new.name,
                    generator.add_data_type(new),
                )),
                Some(old) if !old.same_definition(new) => {
                    let mut rendered = generator.drop_data_type(old);
                    rendered.append(generator.add_data_type(new));
                    results.push(staged(
                        Stage::AddDataTypes,
                        SchemaObjectType::DataType,
                        ResultType::Change,
                        &new.name,
                        rendered,
                    ));
                }
                Some(_) => {}
            }
        }

        for old in &ctx.base.data_types {
            if !ctx.target.data_types.iter().any(|new| same_type(old, new)) {
                results.push(staged(
                    Stage::DropDataTypes,
                    SchemaObjectType::DataType,
                    ResultType::Delete,
                    &old.name,
                    generator.drop_data_type(old),
                ));
            }
        }

        tracing::debug!(results = results.len(), "compared data types");
        Ok(results)
    }
}
