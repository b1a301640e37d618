//! Read-only statistics computed from the current store state.
//!
//! Ties in book count are resolved in favour of the lowest ID: rows are read
//! in ID order and sorted with a stable descending sort, so the first entry
//! of each breakdown is also the reported top entry.

use crate::db::{Database, authors, categories, table_counts};
use crate::error::Result;
use serde::Serialize;

/// Book count of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category ID.
    pub id: i64,
    /// Category name.
    pub name: String,
    /// Books in the category.
    pub book_count: i64,
}

/// Book count of one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    /// Author ID.
    pub id: i64,
    /// Author display name ("First Last").
    pub author_name: String,
    /// Books by the author.
    pub book_count: i64,
}

/// Catalog statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Total books.
    pub total_books: i64,
    /// Total authors.
    pub total_authors: i64,
    /// Total categories.
    pub total_categories: i64,
    /// Category with the most books, absent when there are no categories.
    pub top_category: Option<CategoryCount>,
    /// Author with the most books, absent when there are no authors.
    pub top_author: Option<AuthorCount>,
    /// Every category, most books first.
    pub categories: Vec<CategoryCount>,
    /// Every author, most books first.
    pub authors: Vec<AuthorCount>,
}

/// Compute statistics in one consistent read.
pub fn compute(db: &Database) -> Result<Statistics> {
    db.read(|conn| {
        let totals = table_counts(conn)?;

        let mut category_counts: Vec<CategoryCount> = categories::list(conn)?
            .into_iter()
            .map(|r| CategoryCount {
                id: r.category.id,
                name: r.category.name,
                book_count: r.book_count,
            })
            .collect();
        category_counts.sort_by(|a, b| b.book_count.cmp(&a.book_count));

        let mut author_counts: Vec<AuthorCount> = authors::list(conn)?
            .into_iter()
            .map(|r| AuthorCount {
                id: r.author.id,
                author_name: r.author.full_name(),
                book_count: r.book_count,
            })
            .collect();
        author_counts.sort_by(|a, b| b.book_count.cmp(&a.book_count));

        Ok(Statistics {
            total_books: totals.books,
            total_authors: totals.authors,
            total_categories: totals.categories,
            top_category: category_counts.first().cloned(),
            top_author: author_counts.first().cloned(),
            categories: category_counts,
            authors: author_counts,
        })
    })
}
