use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use folio_db::DbResult;

use super::models::{Book, BookId, BookWithAuthor, NewBook};
use crate::modules::authors::models::AuthorId;

pub type BookRepositoryArc = Arc<dyn BookRepository>;

/// Storage contract for books.
///
/// Lists come back in ascending id order.
#[async_trait]
pub trait BookRepository: Debug + Send + Sync {
    async fn find_all(&self) -> DbResult<Vec<Book>>;

    async fn find_by_id(&self, id: BookId) -> DbResult<Option<Book>>;

    async fn exists_by_id(&self, id: BookId) -> DbResult<bool>;

    async fn find_by_title_containing_ignore_case(&self, title: &str) -> DbResult<Vec<Book>>;

    /// Case-insensitive substring match on the title or the description.
    async fn search_by_keyword(&self, keyword: &str) -> DbResult<Vec<Book>>;

    async fn find_by_author_id(&self, author_id: AuthorId) -> DbResult<Vec<Book>>;

    /// Inclusive on both ends. Books without a price never match.
    async fn find_by_price_between(&self, min: f64, max: f64) -> DbResult<Vec<Book>>;

    async fn find_by_id_with_author(&self, id: BookId) -> DbResult<Option<BookWithAuthor>>;

    async fn find_all_with_author(&self) -> DbResult<Vec<BookWithAuthor>>;

    /// Exact match on the owning author's name.
    async fn find_by_author_name(&self, name: &str) -> DbResult<Vec<Book>>;

    async fn find_by_author_nationality(&self, nationality: &str) -> DbResult<Vec<Book>>;

    /// Store a new book, checking its author in the same unit of work.
    ///
    /// A missing author fails with `DbError::ForeignKeyViolation`.
    async fn insert(&self, book: NewBook) -> DbResult<BookWithAuthor>;

    /// Overwrite an existing book under the same author check as `insert`.
    async fn save(&self, book: Book) -> DbResult<BookWithAuthor>;

    /// Returns whether the book existed.
    async fn delete_by_id(&self, id: BookId) -> DbResult<bool>;
}
