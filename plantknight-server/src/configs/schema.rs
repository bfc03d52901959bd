use crate::models::{AccountTable, DeviceTable, ReadingTable, Table};

/// Holds the tables in creation order: every table comes after the tables it references.
pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        Self {
            tables: Self::order_by_dependencies(tables),
        }
    }

    // Stable: tables without a mutual dependency keep their declaration order.
    fn order_by_dependencies(mut pending: Vec<Box<dyn Table>>) -> Vec<Box<dyn Table>> {
        let mut ordered: Vec<Box<dyn Table>> = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready = pending.iter().position(|table| {
                table
                    .dependencies()
                    .iter()
                    .all(|dep| ordered.iter().any(|placed| placed.name() == *dep))
            });

            let Some(index) = ready else {
                let names: Vec<_> = pending.iter().map(|table| table.name()).collect();
                panic!("Circular or unresolved table dependencies: {names:?}");
            };

            ordered.push(pending.remove(index));
        }

        ordered
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(ReadingTable),
            Box::new(DeviceTable),
            Box::new(AccountTable),
        ])
    }
}
