//! Foreign key dependency ordering for new tables

use schemashift_core::{names_match, owners_match, Table};
use std::collections::VecDeque;

/// Order tables so that referenced tables come before the tables whose
/// foreign keys point at them
///
/// Uses Kahn's algorithm over the given tables only; references to tables
/// outside the set and self-references add no edge. Ties keep input order,
/// and tables caught in a cycle are appended in input order.
pub fn order_by_dependencies<'a>(tables: &[&'a Table]) -> Vec<&'a Table> {
    let count = tables.len();
    let mut in_degree = vec![0usize; count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];

    for (child, table) in tables.iter().enumerate() {
        let mut parents: Vec<usize> = Vec::new();
        for fk in &table.foreign_keys {
            let Some(referenced) = fk.refers_to_table.as_deref() else {
                continue;
            };

            let parent = tables.iter().position(|t| {
                names_match(&t.name, referenced)
                    && (fk.refers_to_schema.is_none()
                        || owners_match(t.schema_owner.as_deref(), fk.refers_to_schema.as_deref()))
            });

            if let Some(parent) = parent {
                if parent != child && !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
        }

        for parent in parents {
            children[parent].push(child);
            in_degree[child] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = vec![false; count];
    let mut ordered = Vec::with_capacity(count);

    while let Some(node) = queue.pop_front() {
        visited[node] = true;
        ordered.push(tables[node]);

        for &child in &children[node] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    if ordered.len() < count {
        tracing::debug!(tables = count - ordered.len(), "foreign key cycle; keeping input order");
        ordered.extend((0..count).filter(|&i| !visited[i]).map(|i| tables[i]));
    }

    ordered
}
