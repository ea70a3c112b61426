//! Test fixtures for schema comparison tests
//!
//! These fixtures model a small order-entry database in the shape a schema
//! provider would capture it from SQL Server.

#![allow(dead_code)]

use schemashift_core::{
    Column, Constraint, DataType, DatabaseSchema, Index, Sequence, Table, Trigger, TypeKind, View,
};

/// Customers table
///
/// - Identity primary key (Id)
/// - Required name
/// - LegacyCode with a named default constraint
pub fn customers_table() -> Table {
    Table::new("Customers")
        .with_column(Column::new("Id", DataType::new(TypeKind::Int)).with_identity(1, 1))
        .with_column(Column::new("Name", DataType::nvarchar(100)).not_null())
        .with_column(Column::new("LegacyCode", DataType::varchar(10)).with_default("('X')"))
        .with_primary_key(Constraint::primary_key("PK_Customers", "Customers", &["Id"]))
        .with_default_constraint(Constraint::default_value(
            "DF_Customers_LegacyCode",
            "Customers",
            "LegacyCode",
            "('X')",
        ))
}

/// Customers without the legacy column
pub fn customers_table_v2() -> Table {
    Table::new("Customers")
        .with_column(Column::new("Id", DataType::new(TypeKind::Int)).with_identity(1, 1))
        .with_column(Column::new("Name", DataType::nvarchar(100)).not_null())
        .with_primary_key(Constraint::primary_key("PK_Customers", "Customers", &["Id"]))
}

/// Orders table
///
/// - Identity primary key (Id)
/// - Foreign key to Customers (CustomerId)
/// - Order date defaulting to the current time
/// - Index on CustomerId and an audit trigger
pub fn orders_table() -> Table {
    Table::new("Orders")
        .with_column(Column::new("Id", DataType::new(TypeKind::Int)).with_identity(1, 1))
        .with_column(Column::new("CustomerId", DataType::new(TypeKind::Int)).not_null())
        .with_column(Column::new("OrderDate", DataType::new(TypeKind::DateTime)).not_null().with_default("(getdate())"))
        .with_column(Column::new("Total", DataType::decimal(18, 2)).not_null().with_default("((0))"))
        .with_primary_key(Constraint::primary_key("PK_Orders", "Orders", &["Id"]))
        .with_foreign_key(Constraint::foreign_key("FK_Orders_Customers", "Orders", &["CustomerId"], "Customers"))
        .with_index(Index::new("IX_Orders_CustomerId", "Orders", &["CustomerId"]))
        .with_trigger(Trigger::new(
            "trg_Orders_Audit",
            "Orders",
            "CREATE TRIGGER trg_Orders_Audit ON Orders AFTER INSERT AS INSERT INTO AuditLog (Entity) VALUES ('Orders')",
        ))
}

/// Widget table with an auto-increment key
pub fn widget_table() -> Table {
    Table::new("Widget")
        .with_column(Column::new("Id", DataType::new(TypeKind::Int)).with_identity(1, 1).primary_key())
        .with_column(Column::new("Name", DataType::nvarchar(50)).not_null())
}

/// Order sequence
pub fn order_sequence() -> Sequence {
    Sequence::new("SEQ_ORDER_ID").with_start(1000)
}

/// Customers only
pub fn customers_schema() -> DatabaseSchema {
    DatabaseSchema::new().with_table(customers_table())
}

/// Full order-entry schema: customers, orders, a sequence and a view
pub fn shop_schema() -> DatabaseSchema {
    DatabaseSchema::new()
        .with_table(customers_table())
        .with_table(orders_table())
        .with_sequence(order_sequence())
        .with_view(View::new(
            "vw_CustomerOrders",
            "CREATE VIEW vw_CustomerOrders AS SELECT c.Name, o.Total FROM Customers c JOIN Orders o ON o.CustomerId = c.Id",
        ))
}
