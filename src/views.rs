//! Response shapes with denormalized display fields and live counts.

use crate::db::{AuthorRecord, BookRecord, CategoryRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Book as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookView {
    /// Book ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// ISBN.
    pub isbn: String,
    /// Publication date.
    pub publication_date: NaiveDate,
    /// Author ID.
    pub author_id: i64,
    /// Author display name ("First Last").
    pub author_name: String,
    /// Category ID.
    pub category_id: i64,
    /// Category name.
    pub category_name: String,
}

/// Author as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    /// Author ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Email.
    pub email: String,
    /// Biography.
    pub biography: Option<String>,
    /// Number of books by this author right now.
    pub book_count: i64,
    /// Books, only present on single-author reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<BookView>>,
}

/// Category as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    /// Category ID.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Number of books in this category right now.
    pub book_count: i64,
    /// Books, only present on single-category reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<BookView>>,
}

impl From<BookRecord> for BookView {
    fn from(record: BookRecord) -> Self {
        let author_name = record.author_name();
        let book = record.book;
        Self {
            id: book.id,
            title: book.title,
            isbn: book.isbn,
            publication_date: book.publication_date,
            author_id: book.author_id,
            author_name,
            category_id: book.category_id,
            category_name: record.category_name,
        }
    }
}

impl From<AuthorRecord> for AuthorView {
    fn from(record: AuthorRecord) -> Self {
        let author = record.author;
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            birth_date: author.birth_date,
            email: author.email,
            biography: author.biography,
            book_count: record.book_count,
            books: None,
        }
    }
}

impl From<CategoryRecord> for CategoryView {
    fn from(record: CategoryRecord) -> Self {
        let category = record.category;
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            book_count: record.book_count,
            books: None,
        }
    }
}

impl AuthorView {
    /// Attach the author's books.
    pub fn with_books(mut self, books: Vec<BookView>) -> Self {
        self.books = Some(books);
        self
    }
}

impl CategoryView {
    /// Attach the category's books.
    pub fn with_books(mut self, books: Vec<BookView>) -> Self {
        self.books = Some(books);
        self
    }
}
