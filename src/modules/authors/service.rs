use crate::error::{EntityKind, ResolverError, ResolverResult};

use super::models::{Author, AuthorId, AuthorInput, AuthorUpdateInput, AuthorWithBooks, NewAuthor};
use super::repository::AuthorRepositoryArc;

/// Queries and mutations over authors.
#[derive(Debug, Clone)]
pub struct AuthorService {
    author_repository: AuthorRepositoryArc,
}

impl AuthorService {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        Self { author_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> ResolverResult<Vec<Author>> {
        Ok(self.author_repository.find_all().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: AuthorId) -> ResolverResult<Option<Author>> {
        Ok(self.author_repository.find_by_id(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> ResolverResult<Option<Author>> {
        Ok(self.author_repository.find_by_email(email).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_name_substring(&self, name: &str) -> ResolverResult<Vec<Author>> {
        Ok(self
            .author_repository
            .find_by_name_containing_ignore_case(name)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_nationality(&self, nationality: &str) -> ResolverResult<Vec<Author>> {
        Ok(self.author_repository.find_by_nationality(nationality).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_with_books(&self, id: AuthorId) -> ResolverResult<Option<AuthorWithBooks>> {
        Ok(self.author_repository.find_by_id_with_books(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_with_books(&self) -> ResolverResult<Vec<AuthorWithBooks>> {
        Ok(self.author_repository.find_all_with_books().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: AuthorInput) -> ResolverResult<Author> {
        let draft = NewAuthor::try_from(input)?;
        let author = self.author_repository.insert(draft).await?;
        tracing::info!(author_id = %author.id, "author created");
        Ok(author)
    }

    /// Merge the supplied fields of `delta` onto the stored author.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: AuthorId, delta: AuthorUpdateInput) -> ResolverResult<Author> {
        let mut author = self
            .author_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResolverError::not_found(EntityKind::Author, id))?;

        author.merge(delta)?;

        let author = self.author_repository.save(author).await?;
        tracing::info!(author_id = %author.id, "author updated");
        Ok(author)
    }

    /// Returns `false` when there was nothing to delete.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: AuthorId) -> ResolverResult<bool> {
        let deleted = self.author_repository.delete_by_id(id).await?;
        if deleted {
            tracing::info!(author_id = %id, "author deleted");
        }
        Ok(deleted)
    }
}
