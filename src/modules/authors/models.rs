use std::fmt;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::error::ValidationError;
use crate::modules::books::models::Book;
use crate::utils::date_time::option_local_date_time;
use crate::utils::{parse_local_date_time, Patch};

/// Surrogate key of an [`Author`], assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AuthorId> for i64 {
    fn from(id: AuthorId) -> Self {
        id.0
    }
}

/// A stored author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    /// Unique across all authors.
    pub email: String,
    pub bio: Option<String>,
    #[serde(with = "option_local_date_time", default)]
    pub birth_date: Option<PrimitiveDateTime>,
    pub nationality: Option<String>,
}

impl Author {
    /// Apply every supplied field of `delta`.
    ///
    /// The birth date is parsed before anything is assigned, so a malformed
    /// date leaves the author untouched.
    pub fn merge(&mut self, delta: AuthorUpdateInput) -> Result<(), ValidationError> {
        let birth_date = delta.birth_date.try_map(|raw| parse_birth_date(&raw))?;

        delta.name.merge_into(&mut self.name);
        delta.email.merge_into(&mut self.email);
        delta.bio.merge_into(&mut self.bio);
        birth_date.merge_into(&mut self.birth_date);
        delta.nationality.merge_into(&mut self.nationality);
        Ok(())
    }
}

/// An author with every book it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorWithBooks {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

/// A validated author that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub birth_date: Option<PrimitiveDateTime>,
    pub nationality: Option<String>,
}

impl NewAuthor {
    pub fn into_author(self, id: AuthorId) -> Author {
        Author {
            id,
            name: self.name,
            email: self.email,
            bio: self.bio,
            birth_date: self.birth_date,
            nationality: self.nationality,
        }
    }
}

impl TryFrom<AuthorInput> for NewAuthor {
    type Error = ValidationError;

    fn try_from(input: AuthorInput) -> Result<Self, Self::Error> {
        let birth_date = input
            .birth_date
            .as_deref()
            .map(parse_birth_date)
            .transpose()?;

        Ok(Self {
            name: ValidationError::require("name", input.name)?,
            email: ValidationError::require("email", input.email)?,
            bio: input.bio,
            birth_date,
            nationality: input.nationality,
        })
    }
}

/// Payload for creating an author.
///
/// Missing keys deserialize as empty, so an omitted `name` or `email` is
/// rejected the same way as a blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorInput {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub nationality: Option<String>,
}

/// Sparse payload for updating an author. Omitted and `null` fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorUpdateInput {
    pub name: Patch<String>,
    pub email: Patch<String>,
    pub bio: Patch<String>,
    pub birth_date: Patch<String>,
    pub nationality: Patch<String>,
}

fn parse_birth_date(raw: &str) -> Result<PrimitiveDateTime, ValidationError> {
    parse_local_date_time(raw).map_err(|err| ValidationError::invalid_date("birthDate", err))
}
