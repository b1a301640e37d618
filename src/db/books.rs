//! `books` table access. Reads always join the author and category.

use crate::db::{Book, BookRecord};
use crate::error::Result;
use crate::validation::BookDraft;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_RECORD: &str = "SELECT b.id, b.title, b.isbn, b.publication_date, b.author_id, b.category_id,
            a.first_name, a.last_name, c.name
     FROM books b
     JOIN authors a ON a.id = b.author_id
     JOIN categories c ON c.id = b.category_id";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        book: Book {
            id: row.get(0)?,
            title: row.get(1)?,
            isbn: row.get(2)?,
            publication_date: row.get(3)?,
            author_id: row.get(4)?,
            category_id: row.get(5)?,
        },
        author_first_name: row.get(6)?,
        author_last_name: row.get(7)?,
        category_name: row.get(8)?,
    })
}

/// Insert a book and return its generated ID.
pub fn insert(conn: &Connection, draft: &BookDraft) -> Result<i64> {
    conn.execute(
        "INSERT INTO books (title, isbn, publication_date, author_id, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            draft.title,
            draft.isbn,
            draft.publication_date,
            draft.author_id,
            draft.category_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a book with a fixed ID.
pub fn insert_with_id(conn: &Connection, book: &Book) -> Result<()> {
    conn.execute(
        "INSERT INTO books (id, title, isbn, publication_date, author_id, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            book.id,
            book.title,
            book.isbn,
            book.publication_date,
            book.author_id,
            book.category_id,
        ],
    )?;
    Ok(())
}

/// Overwrite a book. Returns false if the ID is unknown.
pub fn update(conn: &Connection, id: i64, draft: &BookDraft) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE books
         SET title = ?1, isbn = ?2, publication_date = ?3, author_id = ?4, category_id = ?5
         WHERE id = ?6",
        params![
            draft.title,
            draft.isbn,
            draft.publication_date,
            draft.author_id,
            draft.category_id,
            id,
        ],
    )?;
    Ok(rows > 0)
}

/// Delete a book. Returns false if the ID is unknown.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let rows = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
    Ok(rows > 0)
}

/// Check whether a book row exists.
pub fn exists(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?)
}

/// Get one book with its joined display fields.
pub fn get(conn: &Connection, id: i64) -> Result<Option<BookRecord>> {
    let sql = format!("{SELECT_RECORD} WHERE b.id = ?1");
    Ok(conn
        .query_row(&sql, params![id], record_from_row)
        .optional()?)
}

/// List books in ID order, optionally restricted to one author and/or category.
pub fn list(
    conn: &Connection,
    author_id: Option<i64>,
    category_id: Option<i64>,
) -> Result<Vec<BookRecord>> {
    let sql = format!(
        "{SELECT_RECORD}
         WHERE (?1 IS NULL OR b.author_id = ?1) AND (?2 IS NULL OR b.category_id = ?2)
         ORDER BY b.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let books = stmt
        .query_map(params![author_id, category_id], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(books)
}
