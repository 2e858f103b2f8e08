//! Units of work over a set of tables.

use tokio::sync::RwLock;

use crate::error::DbResult;

/// A named set of tables `S` guarded by an async read/write lock.
///
/// Reads share the lock. Writes run against a snapshot of `S` which replaces
/// the live state only when the unit of work succeeds, so a failed write
/// leaves nothing behind.
#[derive(Debug)]
pub struct Database<S> {
    name: String,
    state: RwLock<S>,
}

impl<S> Database<S>
where
    S: Clone + Send + Sync,
{
    pub fn new(name: impl Into<String>, state: S) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(state),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run a read-only unit of work.
    pub async fn read<T>(&self, work: impl FnOnce(&S) -> T) -> T {
        let state = self.state.read().await;
        work(&state)
    }

    /// Run a read-write unit of work atomically.
    pub async fn write<T>(&self, work: impl FnOnce(&mut S) -> DbResult<T>) -> DbResult<T> {
        let mut state = self.state.write().await;
        let mut draft = state.clone();

        match work(&mut draft) {
            Ok(output) => {
                *state = draft;
                Ok(output)
            }
            Err(err) => {
                tracing::debug!(database = %self.name, error = %err, "unit of work rolled back");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::table::{Record, Table};

    #[derive(Debug, Clone)]
    struct Tag {
        id: i64,
        label: String,
    }

    impl Record for Tag {
        const TABLE: &'static str = "tags";

        fn id(&self) -> i64 {
            self.id
        }

        fn unique_keys(&self) -> Vec<(&'static str, String)> {
            vec![("tags_label_key", self.label.clone())]
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Tables {
        tags: Table<Tag>,
    }

    fn tag(label: &str) -> impl FnOnce(i64) -> Tag + '_ {
        move |id| Tag {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn committed_writes_are_visible_to_reads() {
        let db = Database::new("test", Tables::default());

        let inserted = db.write(|s| s.tags.insert(tag("rust"))).await.unwrap();
        let found = db.read(|s| s.tags.get(inserted.id).cloned()).await;

        assert_eq!(found.map(|t| t.label), Some("rust".to_string()));
    }

    #[tokio::test]
    async fn failed_write_rolls_back_every_change() {
        let db = Database::new("test", Tables::default());
        db.write(|s| s.tags.insert(tag("rust"))).await.unwrap();

        let result = db
            .write(|s| {
                s.tags.insert(tag("go"))?;
                s.tags.insert(tag("rust"))
            })
            .await;

        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
        let labels: Vec<_> = db
            .read(|s| s.tags.rows().map(|t| t.label.clone()).collect())
            .await;
        assert_eq!(labels, vec!["rust".to_string()]);
    }

    #[test]
    fn database_keeps_its_name() {
        let db = Database::new("library", Tables::default());
        assert_eq!(db.name(), "library");
    }
}
