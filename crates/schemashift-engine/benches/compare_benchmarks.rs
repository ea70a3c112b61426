//! Benchmarks for schema comparison
//!
//! These benchmarks measure comparison and script generation over large
//! generated schemas with foreign key chains between tables.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schemashift_core::{Column, Constraint, DataType, DatabaseSchema, Dialect, Index, Table, TypeKind};
use schemashift_engine::dependency::order_by_dependencies;
use schemashift_engine::{ComparisonWriter, SchemaComparer};

/// Generate a table with N columns referencing up to two earlier tables
fn generate_table(table_num: usize, num_columns: usize) -> Table {
    let name = format!("table_{}", table_num);
    let mut table = Table::new(&name)
        .with_column(Column::new("id", DataType::new(TypeKind::BigInt)).with_identity(1, 1));

    for i in 0..num_columns {
        let column = if i % 3 == 0 {
            Column::new(format!("col_{}", i), DataType::varchar(100)).with_default("('')")
        } else {
            Column::new(format!("col_{}", i), DataType::decimal(18, 2))
        };
        table = table.with_column(column);
    }

    // Each table references the previous 2 tables
    for parent in table_num.saturating_sub(2)..table_num {
        let column = format!("parent_{}_id", parent);
        table = table
            .with_column(Column::new(&column, DataType::new(TypeKind::BigInt)))
            .with_foreign_key(Constraint::foreign_key(
                format!("fk_{}_{}", table_num, parent),
                &name,
                &[column.as_str()],
                format!("table_{}", parent),
            ))
            .with_index(Index::new(format!("ix_{}_{}", table_num, parent), &name, &[column.as_str()]));
    }

    table.with_primary_key(Constraint::primary_key(format!("pk_{}", table_num), &name, &["id"]))
}

/// Generate a schema with N tables
fn generate_schema(num_tables: usize, num_columns: usize) -> DatabaseSchema {
    // Reverse insertion order so dependency sorting has work to do
    (0..num_tables)
        .rev()
        .fold(DatabaseSchema::new(), |schema, i| schema.with_table(generate_table(i, num_columns)))
}

/// Change every tenth table: one column added, one widened, one dropped
fn modify_schema(schema: &DatabaseSchema) -> DatabaseSchema {
    let mut modified = schema.clone();
    for table in modified.tables.iter_mut().step_by(10) {
        table.columns.retain(|c| c.name != "col_2");
        if let Some(column) = table.columns.iter_mut().find(|c| c.name == "col_0") {
            column.data_type = DataType::varchar(200);
        }
        let ordinal = table.columns.iter().map(|c| c.ordinal).max().unwrap_or(0) + 1;
        let mut column = Column::new("added_col", DataType::new(TypeKind::Int));
        column.ordinal = ordinal;
        table.columns.push(column);
    }
    modified
}

/// Benchmark: Full creation script (100, 500, 1000 tables)
fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");

    for num_tables in [100, 500, 1000].iter() {
        let schema = generate_schema(*num_tables, 20);
        let comparer = SchemaComparer::new(Dialect::SqlServer);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_tables),
            num_tables,
            |b, _| {
                b.iter(|| black_box(comparer.create(&schema)));
            },
        );
    }

    group.finish();
}

/// Benchmark: Migration between two large snapshots, per dialect
fn bench_compare_modified(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_modified");

    let base = generate_schema(500, 20);
    let target = modify_schema(&base);

    for dialect in Dialect::ALL {
        let comparer = SchemaComparer::new(dialect);

        group.bench_function(dialect.as_str(), |b| {
            b.iter(|| black_box(comparer.compare(&base, &target)));
        });
    }

    group.finish();
}

/// Benchmark: Comparing identical snapshots (no output expected)
fn bench_compare_identical(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_identical");

    for num_columns in [10, 50, 100].iter() {
        let schema = generate_schema(200, *num_columns);
        let comparer = SchemaComparer::new(Dialect::PostgreSql);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_columns),
            num_columns,
            |b, _| {
                b.iter(|| black_box(comparer.compare(&schema, &schema)));
            },
        );
    }

    group.finish();
}

/// Benchmark: Foreign key dependency ordering
fn bench_dependency_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_order");

    for num_tables in [100, 500, 1000].iter() {
        let schema = generate_schema(*num_tables, 5);
        let tables: Vec<&Table> = schema.tables.iter().collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(num_tables),
            num_tables,
            |b, _| {
                b.iter(|| black_box(order_by_dependencies(&tables)));
            },
        );
    }

    group.finish();
}

/// Benchmark: Snapshot loading and script rendering
fn bench_snapshot_and_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_and_script");

    let schema = generate_schema(500, 20);
    let json = schema.to_json().unwrap();
    let results = SchemaComparer::new(Dialect::MySql).create(&schema).unwrap();
    let writer = ComparisonWriter::new();

    group.bench_function("load_snapshot", |b| {
        b.iter(|| black_box(DatabaseSchema::from_json(&json)));
    });

    group.bench_function("write_script", |b| {
        b.iter(|| black_box(writer.write(&results)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_create,
    bench_compare_modified,
    bench_compare_identical,
    bench_dependency_order,
    bench_snapshot_and_script
);
criterion_main!(benches);
