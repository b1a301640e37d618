//! Cross-entity integrity rules.
//!
//! Each check is a read-only query meant to run inside the same transaction
//! as the write it guards. `excluding` names the row being updated so that
//! keeping one's own natural key is not a collision.

use crate::db::{authors, categories};
use crate::error::{AppError, Result};
use rusqlite::{Connection, params};

/// Entity whose delete is restricted while books reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// Author by ID.
    Author(i64),
    /// Category by ID.
    Category(i64),
}

/// Fail with `DuplicateKey` if another author has this email, ignoring case.
pub fn ensure_unique_email(conn: &Connection, email: &str, excluding: Option<i64>) -> Result<()> {
    if find_casefold_match(conn, "SELECT id, email FROM authors", email, excluding)?.is_some() {
        return Err(AppError::DuplicateKey(
            "An author with this email already exists.".to_string(),
        ));
    }
    Ok(())
}

/// Fail with `DuplicateKey` if another category has this name, ignoring case.
pub fn ensure_unique_category_name(
    conn: &Connection,
    name: &str,
    excluding: Option<i64>,
) -> Result<()> {
    if find_casefold_match(conn, "SELECT id, name FROM categories", name, excluding)?.is_some() {
        return Err(AppError::DuplicateKey(
            "A category with this name already exists.".to_string(),
        ));
    }
    Ok(())
}

/// Fail with `DuplicateKey` if another book has exactly this ISBN.
pub fn ensure_unique_isbn(conn: &Connection, isbn: &str, excluding: Option<i64>) -> Result<()> {
    let taken: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ?1 AND id IS NOT ?2)",
        params![isbn, excluding],
        |row| row.get(0),
    )?;
    if taken {
        return Err(AppError::DuplicateKey(
            "A book with this ISBN already exists.".to_string(),
        ));
    }
    Ok(())
}

/// Fail with `ReferenceNotFound` if no author has this ID.
pub fn ensure_author_exists(conn: &Connection, id: i64) -> Result<()> {
    if !authors::exists(conn, id)? {
        return Err(AppError::ReferenceNotFound(format!(
            "Author with ID {id} does not exist."
        )));
    }
    Ok(())
}

/// Fail with `ReferenceNotFound` if no category has this ID.
pub fn ensure_category_exists(conn: &Connection, id: i64) -> Result<()> {
    if !categories::exists(conn, id)? {
        return Err(AppError::ReferenceNotFound(format!(
            "Category with ID {id} does not exist."
        )));
    }
    Ok(())
}

/// Fail with `HasDependents` if any book references the entity.
pub fn ensure_no_dependents(conn: &Connection, entity: Dependency) -> Result<()> {
    let (sql, id) = match entity {
        Dependency::Author(id) => ("SELECT COUNT(*) FROM books WHERE author_id = ?1", id),
        Dependency::Category(id) => ("SELECT COUNT(*) FROM books WHERE category_id = ?1", id),
    };
    let count: i64 = conn.query_row(sql, params![id], |row| row.get(0))?;
    if count == 0 {
        return Ok(());
    }

    let message = match entity {
        Dependency::Author(_) => {
            format!("Author with ID {id} cannot be deleted because it has {count} book(s).")
        }
        Dependency::Category(_) => {
            format!("Category with ID {id} cannot be deleted because it contains {count} book(s).")
        }
    };
    Err(AppError::HasDependents(message))
}

/// Unicode-aware case-insensitive lookup.
///
/// SQLite's `lower()` and `NOCASE` fold ASCII only; "Čebela" and "čebela"
/// must still collide.
fn find_casefold_match(
    conn: &Connection,
    sql: &str,
    value: &str,
    excluding: Option<i64>,
) -> Result<Option<i64>> {
    let needle = value.to_lowercase();
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

    for row in rows {
        let (id, existing) = row?;
        if Some(id) != excluding && existing.to_lowercase() == needle {
            return Ok(Some(id));
        }
    }
    Ok(None)
}
