pub mod authors;
pub mod books;
pub mod openapi;

use std::sync::Arc;

use folio_kernel::ModuleRegistry;

use crate::storage::MemoryLibraryStore;
use authors::{repository::AuthorRepositoryArc, service::AuthorService};
use books::{repository::BookRepositoryArc, service::BookService};

/// Register all project-specific modules over one shared store
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: Arc<MemoryLibraryStore>,
) -> anyhow::Result<()> {
    let author_repository: AuthorRepositoryArc = store.clone();
    let book_repository: BookRepositoryArc = store;

    registry.register(authors::create_module(AuthorService::new(
        author_repository.clone(),
    )))?;
    registry.register(books::create_module(BookService::new(
        book_repository,
        author_repository,
    )))?;
    Ok(())
}
