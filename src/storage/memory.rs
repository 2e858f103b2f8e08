//! In-memory library store.
//!
//! Declares the relational shape the resolvers rely on:
//! - `authors.email` is unique (`authors_email_key`);
//! - `books.author_id` references `authors.id` (`books_author_id_fkey`) and
//!   deleting an author deletes its books.

use async_trait::async_trait;
use folio_db::join::{distinct_on_root, left_join};
use folio_db::{Database, DbError, DbResult, Record, Table};

use crate::modules::authors::models::{Author, AuthorId, AuthorWithBooks, NewAuthor};
use crate::modules::authors::repository::AuthorRepository;
use crate::modules::books::models::{Book, BookId, BookWithAuthor, NewBook};
use crate::modules::books::repository::BookRepository;

const AUTHORS_EMAIL_KEY: &str = "authors_email_key";
const BOOKS_AUTHOR_FKEY: &str = "books_author_id_fkey";

impl Record for Author {
    const TABLE: &'static str = "authors";

    fn id(&self) -> i64 {
        self.id.get()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![(AUTHORS_EMAIL_KEY, self.email.clone())]
    }
}

impl Record for Book {
    const TABLE: &'static str = "books";

    fn id(&self) -> i64 {
        self.id.get()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LibraryTables {
    pub authors: Table<Author>,
    pub books: Table<Book>,
}

impl LibraryTables {
    fn referenced_author(&self, author_id: AuthorId) -> DbResult<Author> {
        self.authors
            .get(author_id.get())
            .cloned()
            .ok_or_else(|| DbError::foreign_key_violation(BOOKS_AUTHOR_FKEY, author_id.to_string()))
    }

    fn with_author(&self, book: Book) -> Option<BookWithAuthor> {
        let author = self.authors.get(book.author_id.get())?.clone();
        Some(BookWithAuthor { book, author })
    }

    fn books_where_author(&self, predicate: impl Fn(&Author) -> bool) -> Vec<Book> {
        self.books.scan(|book| {
            self.authors
                .get(book.author_id.get())
                .is_some_and(|author| predicate(author))
        })
    }
}

/// Both repositories over one [`Database`]. Book writes check the author and
/// author deletes cascade to books inside a single unit of work.
#[derive(Debug)]
pub struct MemoryLibraryStore {
    db: Database<LibraryTables>,
}

impl MemoryLibraryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            db: Database::new(name, LibraryTables::default()),
        }
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl AuthorRepository for MemoryLibraryStore {
    async fn find_all(&self) -> DbResult<Vec<Author>> {
        Ok(self.db.read(|t| t.authors.scan(|_| true)).await)
    }

    async fn find_by_id(&self, id: AuthorId) -> DbResult<Option<Author>> {
        Ok(self.db.read(|t| t.authors.get(id.get()).cloned()).await)
    }

    async fn exists_by_id(&self, id: AuthorId) -> DbResult<bool> {
        Ok(self.db.read(|t| t.authors.contains(id.get())).await)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<Author>> {
        Ok(self
            .db
            .read(|t| t.authors.get_by_unique(AUTHORS_EMAIL_KEY, email).cloned())
            .await)
    }

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> DbResult<Vec<Author>> {
        let needle = name.to_lowercase();
        Ok(self
            .db
            .read(|t| t.authors.scan(|a| contains_ignore_case(&a.name, &needle)))
            .await)
    }

    async fn find_by_nationality(&self, nationality: &str) -> DbResult<Vec<Author>> {
        Ok(self
            .db
            .read(|t| {
                t.authors
                    .scan(|a| a.nationality.as_deref() == Some(nationality))
            })
            .await)
    }

    async fn find_by_id_with_books(&self, id: AuthorId) -> DbResult<Option<AuthorWithBooks>> {
        Ok(self
            .db
            .read(|t| {
                let author = t.authors.get(id.get())?;
                let joined = left_join([author], &t.books, |a, b| b.author_id == a.id);
                distinct_on_root(joined, |a| a.id)
                    .into_iter()
                    .next()
                    .map(|(author, books)| AuthorWithBooks { author, books })
            })
            .await)
    }

    async fn find_all_with_books(&self) -> DbResult<Vec<AuthorWithBooks>> {
        Ok(self
            .db
            .read(|t| {
                let joined = left_join(t.authors.rows(), &t.books, |a, b| b.author_id == a.id);
                distinct_on_root(joined, |a| a.id)
                    .into_iter()
                    .map(|(author, books)| AuthorWithBooks { author, books })
                    .collect()
            })
            .await)
    }

    async fn insert(&self, author: NewAuthor) -> DbResult<Author> {
        self.db
            .write(move |t| t.authors.insert(|id| author.into_author(AuthorId::new(id))))
            .await
    }

    async fn save(&self, author: Author) -> DbResult<Author> {
        self.db.write(move |t| t.authors.update(author)).await
    }

    async fn delete_by_id(&self, id: AuthorId) -> DbResult<bool> {
        self.db
            .write(|t| {
                if t.authors.remove(id.get()).is_none() {
                    return Ok(false);
                }
                let owned: Vec<i64> = t
                    .books
                    .rows()
                    .filter(|b| b.author_id == id)
                    .map(|b| b.id.get())
                    .collect();
                for book_id in &owned {
                    t.books.remove(*book_id);
                }
                tracing::debug!(author_id = %id, cascaded = owned.len(), "author deleted");
                Ok(true)
            })
            .await
    }
}

#[async_trait]
impl BookRepository for MemoryLibraryStore {
    async fn find_all(&self) -> DbResult<Vec<Book>> {
        Ok(self.db.read(|t| t.books.scan(|_| true)).await)
    }

    async fn find_by_id(&self, id: BookId) -> DbResult<Option<Book>> {
        Ok(self.db.read(|t| t.books.get(id.get()).cloned()).await)
    }

    async fn exists_by_id(&self, id: BookId) -> DbResult<bool> {
        Ok(self.db.read(|t| t.books.contains(id.get())).await)
    }

    async fn find_by_title_containing_ignore_case(&self, title: &str) -> DbResult<Vec<Book>> {
        let needle = title.to_lowercase();
        Ok(self
            .db
            .read(|t| t.books.scan(|b| contains_ignore_case(&b.title, &needle)))
            .await)
    }

    async fn search_by_keyword(&self, keyword: &str) -> DbResult<Vec<Book>> {
        let needle = keyword.to_lowercase();
        Ok(self
            .db
            .read(|t| {
                t.books.scan(|b| {
                    contains_ignore_case(&b.title, &needle)
                        || b.description
                            .as_deref()
                            .is_some_and(|d| contains_ignore_case(d, &needle))
                })
            })
            .await)
    }

    async fn find_by_author_id(&self, author_id: AuthorId) -> DbResult<Vec<Book>> {
        Ok(self
            .db
            .read(|t| t.books.scan(|b| b.author_id == author_id))
            .await)
    }

    async fn find_by_price_between(&self, min: f64, max: f64) -> DbResult<Vec<Book>> {
        Ok(self
            .db
            .read(|t| {
                t.books
                    .scan(|b| b.price.is_some_and(|price| min <= price && price <= max))
            })
            .await)
    }

    async fn find_by_id_with_author(&self, id: BookId) -> DbResult<Option<BookWithAuthor>> {
        Ok(self
            .db
            .read(|t| {
                let book = t.books.get(id.get())?.clone();
                t.with_author(book)
            })
            .await)
    }

    async fn find_all_with_author(&self) -> DbResult<Vec<BookWithAuthor>> {
        Ok(self
            .db
            .read(|t| {
                t.books
                    .rows()
                    .cloned()
                    .filter_map(|book| t.with_author(book))
                    .collect()
            })
            .await)
    }

    async fn find_by_author_name(&self, name: &str) -> DbResult<Vec<Book>> {
        Ok(self
            .db
            .read(|t| t.books_where_author(|a| a.name == name))
            .await)
    }

    async fn find_by_author_nationality(&self, nationality: &str) -> DbResult<Vec<Book>> {
        Ok(self
            .db
            .read(|t| t.books_where_author(|a| a.nationality.as_deref() == Some(nationality)))
            .await)
    }

    async fn insert(&self, book: NewBook) -> DbResult<BookWithAuthor> {
        self.db
            .write(move |t| {
                let author = t.referenced_author(book.author_id)?;
                let book = t.books.insert(|id| book.into_book(BookId::new(id)))?;
                Ok(BookWithAuthor { book, author })
            })
            .await
    }

    async fn save(&self, book: Book) -> DbResult<BookWithAuthor> {
        self.db
            .write(move |t| {
                let author = t.referenced_author(book.author_id)?;
                let book = t.books.update(book)?;
                Ok(BookWithAuthor { book, author })
            })
            .await
    }

    async fn delete_by_id(&self, id: BookId) -> DbResult<bool> {
        self.db
            .write(|t| Ok(t.books.remove(id.get()).is_some()))
            .await
    }
}
