//! Sequenced tables with unique key enforcement.

use im::OrdMap;

use crate::error::{DbError, DbResult};

/// Row type stored in a [`Table`].
pub trait Record: Clone {
    /// Table name, used in diagnostics and logs.
    const TABLE: &'static str;

    /// Surrogate id assigned by the owning table.
    fn id(&self) -> i64;

    /// Values covered by unique constraints, as `(constraint, value)` pairs.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

type UniqueKey = (&'static str, String);

/// Rows ordered by id with a monotonically increasing id sequence.
///
/// Backed by persistent maps so cloning a table (and therefore snapshotting a
/// whole database for a read-write unit of work) is cheap.
#[derive(Debug, Clone)]
pub struct Table<R: Clone> {
    rows: OrdMap<i64, R>,
    unique: OrdMap<UniqueKey, i64>,
    next_id: i64,
}

impl<R: Record> Table<R> {
    pub fn new() -> Self {
        Self {
            rows: OrdMap::new(),
            unique: OrdMap::new(),
            next_id: 1,
        }
    }

    /// Insert a new row built from the next sequence value.
    ///
    /// The sequence only advances when the row is accepted. Ids of deleted rows
    /// are never handed out again.
    pub fn insert(&mut self, build: impl FnOnce(i64) -> R) -> DbResult<R> {
        let id = self.next_id;
        let row = build(id);
        debug_assert_eq!(row.id(), id, "row built with a foreign id");

        let keys = row.unique_keys();
        for key in &keys {
            if self.unique.contains_key(key) {
                return Err(DbError::unique_violation(key.0, key.1.clone()));
            }
        }

        self.next_id += 1;
        for key in keys {
            self.unique.insert(key, id);
        }
        self.rows.insert(id, row.clone());

        tracing::debug!(table = R::TABLE, id, "row inserted");
        Ok(row)
    }

    /// Replace an existing row, re-checking unique constraints against every
    /// other row.
    pub fn update(&mut self, row: R) -> DbResult<R> {
        let id = row.id();
        let previous = self
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::missing_row(R::TABLE, id))?;

        let keys = row.unique_keys();
        for key in &keys {
            match self.unique.get(key) {
                Some(owner) if *owner != id => {
                    return Err(DbError::unique_violation(key.0, key.1.clone()));
                }
                _ => {}
            }
        }

        for key in previous.unique_keys() {
            self.unique.remove(&key);
        }
        for key in keys {
            self.unique.insert(key, id);
        }
        self.rows.insert(id, row.clone());

        tracing::debug!(table = R::TABLE, id, "row updated");
        Ok(row)
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.rows.get(&id)
    }

    /// Look a row up through one of its unique constraints.
    pub fn get_by_unique(&self, constraint: &'static str, value: &str) -> Option<&R> {
        let id = self.unique.get(&(constraint, value.to_string()))?;
        self.rows.get(id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Remove a row, returning it if it existed.
    pub fn remove(&mut self, id: i64) -> Option<R> {
        let row = self.rows.remove(&id)?;
        for key in row.unique_keys() {
            self.unique.remove(&key);
        }
        tracing::debug!(table = R::TABLE, id, "row removed");
        Some(row)
    }

    /// Rows in ascending id order.
    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    /// Clone every row matching `predicate`, in ascending id order.
    pub fn scan(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.rows().filter(|row| predicate(row)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}
