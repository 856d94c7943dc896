use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::models::{Owner, Record};

/// Map-backed store used by `STORAGE=memory` and the test suites.
/// Foreign keys are not enforced.
pub struct MemoryStore<R> {
    table: RwLock<Table<R>>,
}

struct Table<R> {
    rows: BTreeMap<i32, R>,
    /// Highest key ever stored. Like a Postgres sequence it only grows, so a
    /// deleted key is never handed out again.
    last_id: i32,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn find_all(&self) -> anyhow::Result<Vec<R>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<R>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: Owner) -> anyhow::Result<Vec<R>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|r| r.belongs_to(owner))
            .cloned()
            .collect())
    }

    async fn save(&self, mut record: R) -> anyhow::Result<R> {
        let mut table = self.table.write().await;
        let id = match record.id() {
            Some(id) => id,
            None => table
                .last_id
                .checked_add(1)
                .ok_or_else(|| anyhow::anyhow!("id space exhausted"))?,
        };
        table.last_id = table.last_id.max(id);
        record.set_id(id);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.table.write().await.rows.clear();
        Ok(())
    }
}
