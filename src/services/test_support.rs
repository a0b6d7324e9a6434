use super::department::{BackingTable, Department};
use super::department_resolver::PrimaryKeyLookup;
use async_trait::async_trait;
use sea_orm::{DbErr, RuntimeErr};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory stand-in for the department tables
#[derive(Default)]
pub struct FakeLookup {
    rows: HashMap<&'static str, HashSet<i32>>,
    failing: bool,
    probes: AtomicUsize,
}

impl FakeLookup {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_row(mut self, department: Department, primary_key: i32) -> Self {
        self.rows
            .entry(department.backing_table().table)
            .or_default()
            .insert(primary_key);
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrimaryKeyLookup for FakeLookup {
    async fn find_primary_key_by_numeric_id(
        &self,
        table: BackingTable,
        numeric_id: u64,
    ) -> Result<Option<i32>, DbErr> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_string(),
            )));
        }

        let Ok(id) = i32::try_from(numeric_id) else {
            return Ok(None);
        };
        Ok(self
            .rows
            .get(table.table)
            .filter(|ids| ids.contains(&id))
            .map(|_| id))
    }
}
