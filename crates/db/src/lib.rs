//! In-memory relational storage for folio.
//!
//! Provides sequenced tables with unique constraints, read-only and read-write
//! units of work over a set of tables, and the join helpers used by eager
//! relationship loading.

pub mod database;
pub mod error;
pub mod join;
pub mod table;

pub use database::Database;
pub use error::{DbError, DbResult};
pub use table::{Record, Table};
