//! List parameters, search and sort.
//!
//! Foreign-key filters are applied by the store query; search and sort run
//! here over the filtered records. Sorting is stable and total: every key
//! falls back to ascending ID on ties.

use crate::db::{AuthorRecord, BookRecord};
use serde::Deserialize;
use std::cmp::Ordering;

/// Query parameters for listing authors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorQuery {
    /// Case-insensitive substring over first name, last name and email.
    pub search: Option<String>,
    /// Sort key, see [`AuthorSort`].
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
}

/// Query parameters for listing books.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    /// Case-insensitive substring over title, ISBN, author names and category name.
    pub search: Option<String>,
    /// Sort key, see [`BookSort`].
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    /// Only books in this category.
    #[serde(alias = "categoryId", alias = "kategorijaId")]
    pub category_id: Option<i64>,
    /// Only books by this author.
    #[serde(alias = "authorId", alias = "avtorId")]
    pub author_id: Option<i64>,
}

/// Author sort keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorSort {
    /// Last name, then first name.
    #[default]
    LastName,
    /// First name.
    FirstName,
    /// Email.
    Email,
    /// Birth date.
    BirthDate,
}

impl AuthorSort {
    /// Parse a sort key; unknown or missing keys give the default.
    pub fn parse(key: Option<&str>) -> Self {
        match key.map(str::to_lowercase).as_deref() {
            Some("first_name" | "firstname" | "ime") => AuthorSort::FirstName,
            Some("last_name" | "lastname" | "priimek") => AuthorSort::LastName,
            Some("email") => AuthorSort::Email,
            Some("date" | "birth_date" | "datum") => AuthorSort::BirthDate,
            _ => AuthorSort::default(),
        }
    }
}

/// Book sort keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookSort {
    /// Title.
    #[default]
    Title,
    /// ISBN.
    Isbn,
    /// Publication date.
    PublicationDate,
    /// Author last name, then first name.
    Author,
    /// Category name.
    Category,
}

impl BookSort {
    /// Parse a sort key; unknown or missing keys give the default.
    pub fn parse(key: Option<&str>) -> Self {
        match key.map(str::to_lowercase).as_deref() {
            Some("title" | "naslov") => BookSort::Title,
            Some("isbn") => BookSort::Isbn,
            Some("date" | "publication_date" | "datum") => BookSort::PublicationDate,
            Some("author" | "avtor") => BookSort::Author,
            Some("category" | "kategorija") => BookSort::Category,
            _ => BookSort::default(),
        }
    }
}

/// Lowercased search term, or `None` when there is nothing to match.
fn search_term(search: Option<&str>) -> Option<String> {
    search.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

fn contains(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Search then sort authors.
pub fn authors(mut records: Vec<AuthorRecord>, query: &AuthorQuery) -> Vec<AuthorRecord> {
    if let Some(term) = search_term(query.search.as_deref()) {
        records.retain(|r| {
            let a = &r.author;
            contains(&a.first_name, &term)
                || contains(&a.last_name, &term)
                || contains(&a.email, &term)
        });
    }

    let sort = AuthorSort::parse(query.sort_by.as_deref());
    records.sort_by(|x, y| {
        let (a, b) = (&x.author, &y.author);
        let primary = match sort {
            AuthorSort::LastName => cmp_text(&a.last_name, &b.last_name)
                .then_with(|| cmp_text(&a.first_name, &b.first_name)),
            AuthorSort::FirstName => cmp_text(&a.first_name, &b.first_name),
            AuthorSort::Email => cmp_text(&a.email, &b.email),
            AuthorSort::BirthDate => a.birth_date.cmp(&b.birth_date),
        };
        primary.then(a.id.cmp(&b.id))
    });
    records
}

/// Search then sort books. Filters by author and category are expected to
/// have been applied already.
pub fn books(mut records: Vec<BookRecord>, query: &BookQuery) -> Vec<BookRecord> {
    if let Some(term) = search_term(query.search.as_deref()) {
        records.retain(|r| {
            contains(&r.book.title, &term)
                || contains(&r.book.isbn, &term)
                || contains(&r.author_first_name, &term)
                || contains(&r.author_last_name, &term)
                || contains(&r.category_name, &term)
        });
    }

    let sort = BookSort::parse(query.sort_by.as_deref());
    records.sort_by(|x, y| {
        let primary = match sort {
            BookSort::Title => cmp_text(&x.book.title, &y.book.title),
            BookSort::Isbn => x.book.isbn.cmp(&y.book.isbn),
            BookSort::PublicationDate => x.book.publication_date.cmp(&y.book.publication_date),
            BookSort::Author => cmp_text(&x.author_last_name, &y.author_last_name)
                .then_with(|| cmp_text(&x.author_first_name, &y.author_first_name)),
            BookSort::Category => cmp_text(&x.category_name, &y.category_name),
        };
        primary.then(x.book.id.cmp(&y.book.id))
    });
    records
}
