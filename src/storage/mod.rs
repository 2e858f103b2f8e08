//! Storage adapters backing the author and book repositories.

pub mod memory;
#[cfg(test)]
pub mod testing;

pub use memory::{LibraryTables, MemoryLibraryStore};
