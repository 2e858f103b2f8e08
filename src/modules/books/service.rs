use folio_db::DbError;

use crate::error::{EntityKind, ResolverError, ResolverResult, ValidationError};
use crate::modules::authors::models::{Author, AuthorId};
use crate::modules::authors::repository::AuthorRepositoryArc;
use crate::utils::Patch;

use super::models::{Book, BookId, BookInput, BookUpdateInput, BookWithAuthor, NewBook};
use super::repository::BookRepositoryArc;

/// Queries and mutations over books, including their author relationship.
#[derive(Debug, Clone)]
pub struct BookService {
    book_repository: BookRepositoryArc,
    author_repository: AuthorRepositoryArc,
}

impl BookService {
    pub fn new(book_repository: BookRepositoryArc, author_repository: AuthorRepositoryArc) -> Self {
        Self {
            book_repository,
            author_repository,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> ResolverResult<Vec<Book>> {
        Ok(self.book_repository.find_all().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: BookId) -> ResolverResult<Option<Book>> {
        Ok(self.book_repository.find_by_id(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_title_substring(&self, title: &str) -> ResolverResult<Vec<Book>> {
        Ok(self
            .book_repository
            .find_by_title_containing_ignore_case(title)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_by_keyword(&self, keyword: &str) -> ResolverResult<Vec<Book>> {
        Ok(self.book_repository.search_by_keyword(keyword).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_author_id(&self, author_id: AuthorId) -> ResolverResult<Vec<Book>> {
        Ok(self.book_repository.find_by_author_id(author_id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_price_range(&self, min: f64, max: f64) -> ResolverResult<Vec<Book>> {
        Ok(self.book_repository.find_by_price_between(min, max).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_with_author(&self, id: BookId) -> ResolverResult<Option<BookWithAuthor>> {
        Ok(self.book_repository.find_by_id_with_author(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_with_author(&self) -> ResolverResult<Vec<BookWithAuthor>> {
        Ok(self.book_repository.find_all_with_author().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_author_name(&self, name: &str) -> ResolverResult<Vec<Book>> {
        Ok(self.book_repository.find_by_author_name(name).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_author_nationality(&self, nationality: &str) -> ResolverResult<Vec<Book>> {
        Ok(self
            .book_repository
            .find_by_author_nationality(nationality)
            .await?)
    }

    /// Store a new book under the author named by `input.author_id`.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: BookInput) -> ResolverResult<BookWithAuthor> {
        let author_id = input
            .author_id
            .map(AuthorId::new)
            .ok_or(ValidationError::AuthorIdRequired)?;
        let author = self.resolve_author(author_id).await?;

        let draft = NewBook::from_input(input, &author)?;
        let created = self
            .book_repository
            .insert(draft)
            .await
            .map_err(|err| author_gone(err, author_id))?;

        tracing::info!(book_id = %created.book.id, author_id = %created.author.id, "book created");
        Ok(created)
    }

    /// Merge the supplied fields of `delta` onto the stored book, moving it
    /// to another author when `authorId` is given.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: BookId, delta: BookUpdateInput) -> ResolverResult<BookWithAuthor> {
        let mut book = self
            .book_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResolverError::not_found(EntityKind::Book, id))?;

        if let Patch::Value(author_id) = book.merge(delta)? {
            book.author_id = self.resolve_author(author_id).await?.id;
        }

        let author_id = book.author_id;
        let updated = self
            .book_repository
            .save(book)
            .await
            .map_err(|err| author_gone(err, author_id))?;

        tracing::info!(book_id = %updated.book.id, author_id = %updated.author.id, "book updated");
        Ok(updated)
    }

    /// Returns `false` when there was nothing to delete.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: BookId) -> ResolverResult<bool> {
        let deleted = self.book_repository.delete_by_id(id).await?;
        if deleted {
            tracing::info!(book_id = %id, "book deleted");
        }
        Ok(deleted)
    }

    /// Load the full author, never trusting a bare id.
    async fn resolve_author(&self, author_id: AuthorId) -> ResolverResult<Author> {
        self.author_repository
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ValidationError::UnknownAuthor(author_id).into())
    }
}

/// The author was removed after it was resolved but before the book was written.
fn author_gone(err: DbError, author_id: AuthorId) -> ResolverError {
    match err {
        DbError::ForeignKeyViolation { .. } => ValidationError::UnknownAuthor(author_id).into(),
        other => other.into(),
    }
}
