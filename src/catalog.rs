//! Catalog service: the operation-per-entity contract.
//!
//! Updates first confirm the target row exists. Every mutation then
//! validates its payload, runs the integrity checks and the write in a single
//! transaction, and returns the projected row read back inside that same
//! transaction. The existence check is repeated inside the transaction.

use crate::db::{Database, TableCounts, authors, books, categories};
use crate::error::{AppError, Result};
use crate::integrity::{self, Dependency};
use crate::query::{self, AuthorQuery, BookQuery};
use crate::stats::{self, Statistics};
use crate::validation::{AuthorInput, BookInput, CategoryInput};
use crate::views::{AuthorView, BookView, CategoryView};

fn author_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Author with ID {id} was not found."))
}

fn category_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Category with ID {id} was not found."))
}

fn book_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book with ID {id} was not found."))
}

/// Catalog service over the entity store.
#[derive(Clone)]
pub struct Catalog {
    db: Database,
}

impl Catalog {
    /// Create a catalog over an opened database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // ========== AUTHORS ==========

    /// List authors with optional search and sort.
    pub fn list_authors(&self, params: &AuthorQuery) -> Result<Vec<AuthorView>> {
        let records = self.db.read(authors::list)?;
        Ok(query::authors(records, params)
            .into_iter()
            .map(AuthorView::from)
            .collect())
    }

    /// Get one author together with all of their books.
    pub fn get_author(&self, id: i64) -> Result<AuthorView> {
        self.db.read(|conn| {
            let record = authors::get(conn, id)?.ok_or_else(|| author_not_found(id))?;
            let books = books::list(conn, Some(id), None)?;
            Ok(AuthorView::from(record).with_books(books.into_iter().map(BookView::from).collect()))
        })
    }

    /// Create an author.
    pub fn create_author(&self, input: AuthorInput) -> Result<AuthorView> {
        let draft = input.validate()?;

        let record = self.db.write(|conn| {
            integrity::ensure_unique_email(conn, &draft.email, None)?;
            let id = authors::insert(conn, &draft)?;
            authors::get(conn, id)?.ok_or_else(|| author_not_found(id))
        })?;

        tracing::info!(author_id = record.author.id, email = %record.author.email, "Created author");
        Ok(record.into())
    }

    /// Replace every field of an author.
    pub fn update_author(&self, id: i64, input: AuthorInput) -> Result<AuthorView> {
        if !self.db.read(|conn| authors::exists(conn, id))? {
            return Err(author_not_found(id));
        }
        let draft = input.validate()?;

        let record = self.db.write(|conn| {
            if !authors::exists(conn, id)? {
                return Err(author_not_found(id));
            }
            integrity::ensure_unique_email(conn, &draft.email, Some(id))?;
            authors::update(conn, id, &draft)?;
            authors::get(conn, id)?.ok_or_else(|| author_not_found(id))
        })?;

        tracing::info!(author_id = id, "Updated author");
        Ok(record.into())
    }

    /// Delete an author that has no books.
    pub fn delete_author(&self, id: i64) -> Result<()> {
        self.db.write(|conn| {
            if !authors::exists(conn, id)? {
                return Err(author_not_found(id));
            }
            integrity::ensure_no_dependents(conn, Dependency::Author(id))?;
            authors::delete(conn, id)?;
            Ok(())
        })?;

        tracing::info!(author_id = id, "Deleted author");
        Ok(())
    }

    // ========== CATEGORIES ==========

    /// List categories in ID order.
    pub fn list_categories(&self) -> Result<Vec<CategoryView>> {
        let records = self.db.read(categories::list)?;
        Ok(records.into_iter().map(CategoryView::from).collect())
    }

    /// Get one category together with all of its books.
    pub fn get_category(&self, id: i64) -> Result<CategoryView> {
        self.db.read(|conn| {
            let record = categories::get(conn, id)?.ok_or_else(|| category_not_found(id))?;
            let books = books::list(conn, None, Some(id))?;
            Ok(CategoryView::from(record)
                .with_books(books.into_iter().map(BookView::from).collect()))
        })
    }

    /// Create a category.
    pub fn create_category(&self, input: CategoryInput) -> Result<CategoryView> {
        let draft = input.validate()?;

        let record = self.db.write(|conn| {
            integrity::ensure_unique_category_name(conn, &draft.name, None)?;
            let id = categories::insert(conn, &draft)?;
            categories::get(conn, id)?.ok_or_else(|| category_not_found(id))
        })?;

        tracing::info!(category_id = record.category.id, name = %record.category.name, "Created category");
        Ok(record.into())
    }

    /// Replace every field of a category.
    pub fn update_category(&self, id: i64, input: CategoryInput) -> Result<CategoryView> {
        if !self.db.read(|conn| categories::exists(conn, id))? {
            return Err(category_not_found(id));
        }
        let draft = input.validate()?;

        let record = self.db.write(|conn| {
            if !categories::exists(conn, id)? {
                return Err(category_not_found(id));
            }
            integrity::ensure_unique_category_name(conn, &draft.name, Some(id))?;
            categories::update(conn, id, &draft)?;
            categories::get(conn, id)?.ok_or_else(|| category_not_found(id))
        })?;

        tracing::info!(category_id = id, "Updated category");
        Ok(record.into())
    }

    /// Delete a category that contains no books.
    pub fn delete_category(&self, id: i64) -> Result<()> {
        self.db.write(|conn| {
            if !categories::exists(conn, id)? {
                return Err(category_not_found(id));
            }
            integrity::ensure_no_dependents(conn, Dependency::Category(id))?;
            categories::delete(conn, id)?;
            Ok(())
        })?;

        tracing::info!(category_id = id, "Deleted category");
        Ok(())
    }

    // ========== BOOKS ==========

    /// List books: filter by author/category, then search, then sort.
    pub fn list_books(&self, params: &BookQuery) -> Result<Vec<BookView>> {
        let records = self
            .db
            .read(|conn| books::list(conn, params.author_id, params.category_id))?;
        Ok(query::books(records, params)
            .into_iter()
            .map(BookView::from)
            .collect())
    }

    /// Get one book.
    pub fn get_book(&self, id: i64) -> Result<BookView> {
        let record = self
            .db
            .read(|conn| books::get(conn, id))?
            .ok_or_else(|| book_not_found(id))?;
        Ok(record.into())
    }

    /// Create a book referencing an existing author and category.
    pub fn create_book(&self, input: BookInput) -> Result<BookView> {
        let draft = input.validate()?;

        let record = self.db.write(|conn| {
            integrity::ensure_unique_isbn(conn, &draft.isbn, None)?;
            integrity::ensure_author_exists(conn, draft.author_id)?;
            integrity::ensure_category_exists(conn, draft.category_id)?;
            let id = books::insert(conn, &draft)?;
            books::get(conn, id)?.ok_or_else(|| book_not_found(id))
        })?;

        tracing::info!(
            book_id = record.book.id,
            isbn = %record.book.isbn,
            author_id = record.book.author_id,
            category_id = record.book.category_id,
            "Created book"
        );
        Ok(record.into())
    }

    /// Replace every field of a book, re-checking both references.
    pub fn update_book(&self, id: i64, input: BookInput) -> Result<BookView> {
        if !self.db.read(|conn| books::exists(conn, id))? {
            return Err(book_not_found(id));
        }
        let draft = input.validate()?;

        let record = self.db.write(|conn| {
            if !books::exists(conn, id)? {
                return Err(book_not_found(id));
            }
            integrity::ensure_unique_isbn(conn, &draft.isbn, Some(id))?;
            integrity::ensure_author_exists(conn, draft.author_id)?;
            integrity::ensure_category_exists(conn, draft.category_id)?;
            books::update(conn, id, &draft)?;
            books::get(conn, id)?.ok_or_else(|| book_not_found(id))
        })?;

        tracing::info!(book_id = id, "Updated book");
        Ok(record.into())
    }

    /// Delete a book. Nothing references books, so there is no dependent check.
    pub fn delete_book(&self, id: i64) -> Result<()> {
        let deleted = self.db.write(|conn| books::delete(conn, id))?;
        if !deleted {
            return Err(book_not_found(id));
        }

        tracing::info!(book_id = id, "Deleted book");
        Ok(())
    }

    // ========== STATISTICS ==========

    /// Compute catalog statistics from the current state.
    pub fn statistics(&self) -> Result<Statistics> {
        stats::compute(&self.db)
    }

    /// Row counts, also proving the store is reachable.
    pub fn counts(&self) -> Result<TableCounts> {
        self.db.ping()?;
        self.db.counts()
    }
}
