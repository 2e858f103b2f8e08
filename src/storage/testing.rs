//! Author repository that interleaves other work with a resolver call.

use std::sync::Arc;

use async_trait::async_trait;
use folio_db::DbResult;
use tokio::sync::Barrier;

use super::MemoryLibraryStore;
use crate::modules::authors::models::{Author, AuthorId, AuthorWithBooks, NewAuthor};
use crate::modules::authors::repository::AuthorRepository;

#[derive(Debug)]
pub enum Interleave {
    /// Hold `delete_by_id` until every party has reached the barrier.
    DeleteBarrier(Arc<Barrier>),
    /// Delete the author right after `find_by_id` has loaded it.
    DeleteAfterLookup,
}

#[derive(Debug)]
pub struct InterleavedAuthors {
    store: Arc<MemoryLibraryStore>,
    interleave: Interleave,
}

impl InterleavedAuthors {
    pub fn new(store: Arc<MemoryLibraryStore>, interleave: Interleave) -> Self {
        Self { store, interleave }
    }
}

#[async_trait]
impl AuthorRepository for InterleavedAuthors {
    async fn find_all(&self) -> DbResult<Vec<Author>> {
        self.store.find_all().await
    }

    async fn find_by_id(&self, id: AuthorId) -> DbResult<Option<Author>> {
        let found = self.store.find_by_id(id).await?;
        if let Interleave::DeleteAfterLookup = self.interleave {
            self.store.delete_by_id(id).await?;
        }
        Ok(found)
    }

    async fn exists_by_id(&self, id: AuthorId) -> DbResult<bool> {
        self.store.exists_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<Author>> {
        self.store.find_by_email(email).await
    }

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> DbResult<Vec<Author>> {
        self.store.find_by_name_containing_ignore_case(name).await
    }

    async fn find_by_nationality(&self, nationality: &str) -> DbResult<Vec<Author>> {
        self.store.find_by_nationality(nationality).await
    }

    async fn find_by_id_with_books(&self, id: AuthorId) -> DbResult<Option<AuthorWithBooks>> {
        self.store.find_by_id_with_books(id).await
    }

    async fn find_all_with_books(&self) -> DbResult<Vec<AuthorWithBooks>> {
        self.store.find_all_with_books().await
    }

    async fn insert(&self, author: NewAuthor) -> DbResult<Author> {
        self.store.insert(author).await
    }

    async fn save(&self, author: Author) -> DbResult<Author> {
        self.store.save(author).await
    }

    async fn delete_by_id(&self, id: AuthorId) -> DbResult<bool> {
        if let Interleave::DeleteBarrier(barrier) = &self.interleave {
            barrier.wait().await;
        }
        self.store.delete_by_id(id).await
    }
}
