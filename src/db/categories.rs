//! `categories` table access.

use crate::db::{Category, CategoryRecord};
use crate::error::Result;
use crate::validation::CategoryDraft;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_RECORD: &str = "SELECT c.id, c.name, c.description,
            (SELECT COUNT(*) FROM books b WHERE b.category_id = c.id)
     FROM categories c";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CategoryRecord> {
    Ok(CategoryRecord {
        category: Category {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
        },
        book_count: row.get(3)?,
    })
}

/// Insert a category and return its generated ID.
pub fn insert(conn: &Connection, draft: &CategoryDraft) -> Result<i64> {
    conn.execute(
        "INSERT INTO categories (name, description) VALUES (?1, ?2)",
        params![draft.name, draft.description],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a category with a fixed ID.
pub fn insert_with_id(conn: &Connection, category: &Category) -> Result<()> {
    conn.execute(
        "INSERT INTO categories (id, name, description) VALUES (?1, ?2, ?3)",
        params![category.id, category.name, category.description],
    )?;
    Ok(())
}

/// Overwrite a category. Returns false if the ID is unknown.
pub fn update(conn: &Connection, id: i64, draft: &CategoryDraft) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE categories SET name = ?1, description = ?2 WHERE id = ?3",
        params![draft.name, draft.description, id],
    )?;
    Ok(rows > 0)
}

/// Delete a category. Returns false if the ID is unknown.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let rows = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
    Ok(rows > 0)
}

/// Check whether a row exists.
pub fn exists(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?)
}

/// Get a category with its book count.
pub fn get(conn: &Connection, id: i64) -> Result<Option<CategoryRecord>> {
    let sql = format!("{SELECT_RECORD} WHERE c.id = ?1");
    Ok(conn
        .query_row(&sql, params![id], record_from_row)
        .optional()?)
}

/// List all categories with book counts, in ID order.
pub fn list(conn: &Connection) -> Result<Vec<CategoryRecord>> {
    let sql = format!("{SELECT_RECORD} ORDER BY c.id");
    let mut stmt = conn.prepare(&sql)?;
    let categories = stmt
        .query_map([], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(categories)
}
