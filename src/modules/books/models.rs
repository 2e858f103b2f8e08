use std::fmt;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::error::ValidationError;
use crate::modules::authors::models::{Author, AuthorId};
use crate::utils::date_time::option_local_date_time;
use crate::utils::{parse_local_date_time, Patch};

/// Surrogate key of a [`Book`], assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<BookId> for i64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

/// A stored book. Always references an existing author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub page_count: Option<i32>,
    #[serde(with = "option_local_date_time", default)]
    pub published_date: Option<PrimitiveDateTime>,
    pub author_id: AuthorId,
}

impl Book {
    /// Apply every supplied scalar field of `delta`.
    ///
    /// The author reassignment is handed back untouched since resolving it
    /// needs a lookup.
    pub fn merge(&mut self, delta: BookUpdateInput) -> Result<Patch<AuthorId>, ValidationError> {
        let published_date = delta
            .published_date
            .try_map(|raw| parse_published_date(&raw))?;

        delta.title.merge_into(&mut self.title);
        delta.isbn.merge_into(&mut self.isbn);
        delta.description.merge_into(&mut self.description);
        delta.price.merge_into(&mut self.price);
        delta.page_count.merge_into(&mut self.page_count);
        published_date.merge_into(&mut self.published_date);

        Ok(delta.author_id.map(AuthorId::new))
    }
}

/// A book with its author attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
}

/// A validated book that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub page_count: Option<i32>,
    pub published_date: Option<PrimitiveDateTime>,
    pub author_id: AuthorId,
}

impl NewBook {
    /// Build a draft owned by `author`, which must already be loaded.
    pub fn from_input(input: BookInput, author: &Author) -> Result<Self, ValidationError> {
        let published_date = input
            .published_date
            .as_deref()
            .map(parse_published_date)
            .transpose()?;

        Ok(Self {
            title: ValidationError::require("title", input.title)?,
            isbn: input.isbn,
            description: input.description,
            price: input.price,
            page_count: input.page_count,
            published_date,
            author_id: author.id,
        })
    }

    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            isbn: self.isbn,
            description: self.description,
            price: self.price,
            page_count: self.page_count,
            published_date: self.published_date,
            author_id: self.author_id,
        }
    }
}

/// Payload for creating a book. `authorId` and `title` are mandatory even
/// though a body without them still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    pub title: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub page_count: Option<i32>,
    pub published_date: Option<String>,
    pub author_id: Option<i64>,
}

/// Sparse payload for updating a book. Omitted and `null` fields are kept,
/// so a book's author can be changed but never cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookUpdateInput {
    pub title: Patch<String>,
    pub isbn: Patch<String>,
    pub description: Patch<String>,
    pub price: Patch<f64>,
    pub page_count: Patch<i32>,
    pub published_date: Patch<String>,
    pub author_id: Patch<i64>,
}

fn parse_published_date(raw: &str) -> Result<PrimitiveDateTime, ValidationError> {
    parse_local_date_time(raw).map_err(|err| ValidationError::invalid_date("publishedDate", err))
}
