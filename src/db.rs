//! Entity store: row types and SQLite access.

pub mod authors;
pub mod books;
pub mod categories;
mod schema;
pub mod seed;

pub use schema::{Database, TableCounts};
pub(crate) use schema::table_counts;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Surrogate ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Contact email, unique case-insensitively.
    pub email: String,
    /// Short biography.
    pub biography: Option<String>,
}

impl Author {
    /// Display name as "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Surrogate ID.
    pub id: i64,
    /// Category name, unique case-insensitively.
    pub name: String,
    /// Category description.
    pub description: Option<String>,
}

/// Book row. The book owns its author and category references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Surrogate ID.
    pub id: i64,
    /// Book title.
    pub title: String,
    /// ISBN, unique case-sensitively.
    pub isbn: String,
    /// Publication date.
    pub publication_date: NaiveDate,
    /// Referenced author.
    pub author_id: i64,
    /// Referenced category.
    pub category_id: i64,
}

/// Author with its live book count.
#[derive(Debug, Clone)]
pub struct AuthorRecord {
    /// Author row.
    pub author: Author,
    /// Number of books referencing the author at query time.
    pub book_count: i64,
}

/// Category with its live book count.
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    /// Category row.
    pub category: Category,
    /// Number of books referencing the category at query time.
    pub book_count: i64,
}

/// Book joined with the fields of its author and category.
#[derive(Debug, Clone)]
pub struct BookRecord {
    /// Book row.
    pub book: Book,
    /// Author first name.
    pub author_first_name: String,
    /// Author last name.
    pub author_last_name: String,
    /// Category name.
    pub category_name: String,
}

impl BookRecord {
    /// Author display name as "First Last".
    pub fn author_name(&self) -> String {
        format!("{} {}", self.author_first_name, self.author_last_name)
    }
}
