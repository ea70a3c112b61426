//! Integration tests for schema comparison
//!
//! These tests run the full comparer (validation, every object comparer,
//! staging and script rendering) over the order-entry fixtures.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p schemashift-engine --test integration_tests
//! ```

mod fixtures;

use fixtures::*;
use pretty_assertions::assert_eq;
use schemashift_core::{
    Column, CompareResult, Constraint, DataType, DatabaseSchema, DiagnosticCode, Dialect, Index,
    ModelError, Report, ResultType, SchemaObjectType, Table, TypeKind,
};
use schemashift_engine::{ComparisonWriter, SchemaComparer};

// =============================================================================
// Helper Functions
// =============================================================================

fn compare(dialect: Dialect, base: &DatabaseSchema, target: &DatabaseSchema) -> Vec<CompareResult> {
    SchemaComparer::new(dialect)
        .compare(base, target)
        .expect("comparison should succeed")
}

fn script(results: &[CompareResult]) -> String {
    ComparisonWriter::new().write(results)
}

fn position(results: &[CompareResult], needle: &str) -> usize {
    results
        .iter()
        .position(|r| r.script.contains(needle))
        .unwrap_or_else(|| panic!("no result contains {:?}", needle))
}

fn keys(results: &[CompareResult], result_type: ResultType) -> Vec<(SchemaObjectType, String)> {
    let mut keys: Vec<_> = results
        .iter()
        .filter(|r| r.result_type == result_type)
        .map(|r| (r.object_type, r.display_name()))
        .collect();
    keys.sort_by(|a, b| (a.0 as u8, &a.1).cmp(&(b.0 as u8, &b.1)));
    keys
}

// =============================================================================
// Whole-schema properties
// =============================================================================

#[test]
fn comparing_a_snapshot_to_itself_is_empty() {
    for dialect in Dialect::ALL {
        let results = compare(dialect, &shop_schema(), &shop_schema());
        assert!(results.is_empty(), "{}: {:?}", dialect, results);
    }
}

#[test]
fn adds_and_deletes_are_symmetric() {
    for dialect in Dialect::ALL {
        let forward = compare(dialect, &customers_schema(), &shop_schema());
        let reverse = compare(dialect, &shop_schema(), &customers_schema());

        assert!(!forward.is_empty());
        assert_eq!(keys(&forward, ResultType::Add), keys(&reverse, ResultType::Delete), "{}", dialect);
        assert_eq!(keys(&forward, ResultType::Delete), keys(&reverse, ResultType::Add), "{}", dialect);
        assert!(forward.iter().all(|r| r.result_type != ResultType::Change));
    }
}

#[test]
fn snapshot_survives_json_round_trip() {
    let json = shop_schema().to_json().unwrap();
    let loaded = DatabaseSchema::from_json(&json).unwrap();

    assert!(compare(Dialect::SqlServer, &shop_schema(), &loaded).is_empty());
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn orders_table_is_created_before_its_foreign_key() {
    let results = compare(Dialect::SqlServer, &DatabaseSchema::new(), &shop_schema());

    let customers = position(&results, "CREATE TABLE [Customers]");
    let orders = position(&results, "CREATE TABLE [Orders]");
    let fk = position(&results, "ADD CONSTRAINT [FK_Orders_Customers]");
    assert!(customers < orders);
    assert!(orders < fk);
}

#[test]
fn foreign_key_is_rebuilt_around_a_renamed_primary_key() {
    let mut customers = customers_table();
    customers.primary_key = Some(Constraint::primary_key("PK_Customers2", "Customers", &["Id"]));
    let target = DatabaseSchema::new().with_table(customers).with_table(orders_table());
    let base = DatabaseSchema::new().with_table(customers_table()).with_table(orders_table());
    let results = compare(Dialect::SqlServer, &base, &target);

    let drop_fk = position(&results, "DROP CONSTRAINT [FK_Orders_Customers]");
    let drop_pk = position(&results, "DROP CONSTRAINT [PK_Customers]");
    let add_pk = position(&results, "ADD CONSTRAINT [PK_Customers2]");
    let add_fk = position(&results, "ADD CONSTRAINT [FK_Orders_Customers]");
    assert!(drop_fk < drop_pk);
    assert!(drop_pk < add_pk);
    assert!(add_pk < add_fk);
}

#[test]
fn sqlite_embeds_the_foreign_key() {
    let results = compare(Dialect::Sqlite, &DatabaseSchema::new(), &shop_schema());

    let orders = &results[position(&results, "CREATE TABLE Orders")];
    assert!(orders
        .script
        .contains("CONSTRAINT FK_Orders_Customers FOREIGN KEY (CustomerId) REFERENCES Customers (Id)"));
    assert!(position(&results, "CREATE TABLE Customers") < position(&results, "CREATE TABLE Orders"));
    assert!(results.iter().all(|r| r.object_type != SchemaObjectType::Constraint));
}

#[test]
fn dependent_objects_are_dropped_before_their_table() {
    let results = compare(Dialect::SqlServer, &shop_schema(), &customers_schema());

    let trigger = position(&results, "DROP TRIGGER [trg_Orders_Audit]");
    let view = position(&results, "DROP VIEW [vw_CustomerOrders]");
    let fk = position(&results, "DROP CONSTRAINT [FK_Orders_Customers]");
    let index = position(&results, "DROP INDEX [IX_Orders_CustomerId]");
    let table = position(&results, "DROP TABLE [Orders]");
    let sequence = position(&results, "DROP SEQUENCE [SEQ_ORDER_ID]");

    assert!(trigger < view && view < fk && fk < index && index < table && table < sequence);
}

#[test]
fn default_constraint_is_dropped_before_its_column() {
    let base = customers_schema();
    let target = DatabaseSchema::new().with_table(customers_table_v2());
    let results = compare(Dialect::SqlServer, &base, &target);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].object_type, SchemaObjectType::Column);
    assert_eq!(results[0].result_type, ResultType::Delete);
    assert_eq!(
        script(&results),
        "-- DROP COLUMN Customers.LegacyCode\n\
         ALTER TABLE [Customers] DROP CONSTRAINT [DF_Customers_LegacyCode];\n\
         ALTER TABLE [Customers] DROP COLUMN [LegacyCode];\n"
    );
}

#[test]
fn missing_default_constraint_is_reported_not_guessed() {
    let mut customers = customers_table();
    customers.default_constraints.clear();
    let base = DatabaseSchema::new().with_table(customers);
    let target = DatabaseSchema::new().with_table(customers_table_v2());

    let results = compare(Dialect::SqlServer, &base, &target);
    assert!(!results[0].script.contains("DF_Customers_LegacyCode"));
    assert_eq!(results[0].diagnostics[0].code, DiagnosticCode::MissingDefaultConstraint);
    assert!(results[0].has_errors());
}

// =============================================================================
// Model errors
// =============================================================================

#[test]
fn foreign_key_column_count_mismatch_aborts() {
    let orders = orders_table()
        .with_column(Column::new("Region", DataType::varchar(4)))
        .with_foreign_key(Constraint::foreign_key(
            "FK_Orders_Customers_Region",
            "Orders",
            &["CustomerId", "Region"],
            "Customers",
        ));
    let target = DatabaseSchema::new().with_table(customers_table()).with_table(orders);

    for dialect in Dialect::ALL {
        let err = SchemaComparer::new(dialect)
            .compare(&customers_schema(), &target)
            .unwrap_err();

        assert_eq!(
            err,
            ModelError::ForeignKeyColumnMismatch {
                name: "FK_Orders_Customers_Region".to_string(),
                table: "Orders".to_string(),
                columns: 2,
                referenced: 1,
            }
        );
    }
}

#[test]
fn unresolved_foreign_key_becomes_a_diagnostic() {
    let orders = orders_table().with_foreign_key(Constraint::foreign_key(
        "FK_Orders_Warehouses",
        "Orders",
        &["CustomerId"],
        "Warehouses",
    ));
    let target = DatabaseSchema::new().with_table(customers_table()).with_table(orders);

    let results = compare(Dialect::SqlServer, &DatabaseSchema::new(), &target);
    let fk = results.iter().find(|r| r.name == "FK_Orders_Warehouses").unwrap();

    assert!(fk.script.starts_with("-- foreign key FK_Orders_Warehouses omitted"));
    assert_eq!(fk.diagnostics[0].code, DiagnosticCode::UnresolvedReference);
}

// =============================================================================
// Dialects
// =============================================================================

#[test]
fn widget_key_per_dialect() {
    let schema = DatabaseSchema::new().with_table(widget_table());

    let sqlite = compare(Dialect::Sqlite, &DatabaseSchema::new(), &schema);
    assert!(sqlite[0].script.contains("Id INTEGER PRIMARY KEY AUTOINCREMENT"));
    assert!(!sqlite[0].script.contains("PRIMARY KEY (Id)"));

    let sqlserver = compare(Dialect::SqlServer, &DatabaseSchema::new(), &schema);
    assert!(sqlserver[0].script.contains("[Id] INT IDENTITY(1,1) NOT NULL"));
    assert!(sqlserver[0].script.contains("PRIMARY KEY ([Id])"));

    let postgres = compare(Dialect::PostgreSql, &DatabaseSchema::new(), &schema);
    assert!(postgres[0].script.contains("\"Id\" INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL"));

    let mysql = compare(Dialect::MySql, &DatabaseSchema::new(), &schema);
    assert!(mysql[0].script.contains("Id INT AUTO_INCREMENT NOT NULL"));
}

#[test]
fn defaults_are_translated_per_dialect() {
    let schema = DatabaseSchema::new().with_table(customers_table()).with_table(orders_table());

    let postgres = compare(Dialect::PostgreSql, &DatabaseSchema::new(), &schema);
    let orders = &postgres[position(&postgres, "CREATE TABLE \"Orders\"")];
    assert!(orders.script.contains("\"OrderDate\" TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"));
    assert!(orders.script.contains("\"Total\" NUMERIC(18, 2) NOT NULL DEFAULT 0"));

    let sqlserver = compare(Dialect::SqlServer, &DatabaseSchema::new(), &schema);
    let orders = &sqlserver[position(&sqlserver, "CREATE TABLE [Orders]")];
    assert!(orders.script.contains("[OrderDate] DATETIME NOT NULL CONSTRAINT [DF_Orders_OrderDate] DEFAULT GETDATE()"));
}

#[test]
fn column_rename_uses_sp_rename() {
    let base = DatabaseSchema::new().with_table(
        Table::new("Customers")
            .with_column(Column::new("Id", DataType::new(TypeKind::Int)).primary_key())
            .with_column(Column::new("Nm", DataType::nvarchar(100))),
    );
    let target = DatabaseSchema::new().with_table(
        Table::new("Customers")
            .with_column(Column::new("Id", DataType::new(TypeKind::Int)).primary_key())
            .with_column(Column::new("Name", DataType::nvarchar(100)).renamed_from("Nm")),
    );

    let results = compare(Dialect::SqlServer, &base, &target);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_type, ResultType::Change);
    assert!(script(&results).contains("sp_rename 'Customers.Nm', 'Name', 'COLUMN';"));
}

#[test]
fn table_rename_runs_before_changes_on_the_new_name() {
    let base = DatabaseSchema::new().with_table(
        Table::new("Client")
            .with_column(Column::new("Id", DataType::new(TypeKind::Int)).primary_key())
            .with_column(Column::new("Email", DataType::varchar(200))),
    );
    let target = DatabaseSchema::new().with_table(
        Table::new("Customers")
            .renamed_from("Client")
            .with_column(Column::new("Id", DataType::new(TypeKind::Int)).primary_key())
            .with_column(Column::new("Email", DataType::varchar(200)))
            .with_index(Index::new("IX_Customers_Email", "Customers", &["Email"]).unique()),
    );

    let results = compare(Dialect::SqlServer, &base, &target);
    assert_eq!(
        script(&results),
        "-- CHANGE TABLE Customers\n\
         EXEC sp_rename 'Client', 'Customers';\n\
         \n\
         -- NEW INDEX Customers.IX_Customers_Email\n\
         CREATE UNIQUE INDEX [IX_Customers_Email] ON [Customers] ([Email]);\n"
    );
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn sequence_add_and_reverse_delete() {
    let empty = DatabaseSchema::new();
    let with_sequence = DatabaseSchema::new().with_sequence(order_sequence());

    let added = compare(Dialect::SqlServer, &empty, &with_sequence);
    assert_eq!(added.len(), 1);
    assert_eq!((added[0].object_type, added[0].result_type), (SchemaObjectType::Sequence, ResultType::Add));
    assert_eq!(
        script(&added),
        "-- NEW SEQUENCE SEQ_ORDER_ID\nCREATE SEQUENCE [SEQ_ORDER_ID] START WITH 1000 INCREMENT BY 1;\n"
    );

    let deleted = compare(Dialect::SqlServer, &with_sequence, &empty);
    assert_eq!(deleted.len(), 1);
    assert_eq!((deleted[0].object_type, deleted[0].result_type), (SchemaObjectType::Sequence, ResultType::Delete));
}

// =============================================================================
// Report
// =============================================================================

#[test]
fn report_summarizes_the_run() {
    let results = compare(Dialect::SqlServer, &customers_schema(), &shop_schema());
    let script = script(&results);
    let report = Report::new(Dialect::SqlServer, results.clone(), &script);

    assert!(report.has_changes());
    assert!(!report.has_errors());
    assert_eq!(report.summary.total, results.len());
    assert_eq!(report.summary.added, results.len());
    assert_eq!(report.checksum.len(), 64);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["dialect"], "sqlserver");
}
