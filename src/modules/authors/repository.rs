use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use folio_db::DbResult;

use super::models::{Author, AuthorId, AuthorWithBooks, NewAuthor};

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository>;

/// Storage contract for authors.
///
/// Lists come back in ascending id order. The `with_books` variants return
/// each author exactly once however many books it owns.
#[async_trait]
pub trait AuthorRepository: Debug + Send + Sync {
    async fn find_all(&self) -> DbResult<Vec<Author>>;

    async fn find_by_id(&self, id: AuthorId) -> DbResult<Option<Author>>;

    async fn exists_by_id(&self, id: AuthorId) -> DbResult<bool>;

    /// Exact match on the unique email.
    async fn find_by_email(&self, email: &str) -> DbResult<Option<Author>>;

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> DbResult<Vec<Author>>;

    async fn find_by_nationality(&self, nationality: &str) -> DbResult<Vec<Author>>;

    async fn find_by_id_with_books(&self, id: AuthorId) -> DbResult<Option<AuthorWithBooks>>;

    async fn find_all_with_books(&self) -> DbResult<Vec<AuthorWithBooks>>;

    /// Store a new author under a freshly assigned id.
    async fn insert(&self, author: NewAuthor) -> DbResult<Author>;

    /// Overwrite an existing author.
    async fn save(&self, author: Author) -> DbResult<Author>;

    /// Delete the author and its books in one unit of work. Returns whether
    /// the author existed.
    async fn delete_by_id(&self, id: AuthorId) -> DbResult<bool>;
}
