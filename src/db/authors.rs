//! `authors` table access.

use crate::db::{Author, AuthorRecord};
use crate::error::Result;
use crate::validation::AuthorDraft;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_RECORD: &str = "SELECT a.id, a.first_name, a.last_name, a.birth_date, a.email, a.biography,
            (SELECT COUNT(*) FROM books b WHERE b.author_id = a.id)
     FROM authors a";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AuthorRecord> {
    Ok(AuthorRecord {
        author: Author {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            birth_date: row.get(3)?,
            email: row.get(4)?,
            biography: row.get(5)?,
        },
        book_count: row.get(6)?,
    })
}

/// Insert an author and return its generated ID.
pub fn insert(conn: &Connection, draft: &AuthorDraft) -> Result<i64> {
    conn.execute(
        "INSERT INTO authors (first_name, last_name, birth_date, email, biography)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            draft.first_name,
            draft.last_name,
            draft.birth_date,
            draft.email,
            draft.biography,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert an author with a fixed ID.
pub fn insert_with_id(conn: &Connection, author: &Author) -> Result<()> {
    conn.execute(
        "INSERT INTO authors (id, first_name, last_name, birth_date, email, biography)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            author.id,
            author.first_name,
            author.last_name,
            author.birth_date,
            author.email,
            author.biography,
        ],
    )?;
    Ok(())
}

/// Overwrite every field of an author. Returns false if the ID is unknown.
pub fn update(conn: &Connection, id: i64, draft: &AuthorDraft) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE authors
         SET first_name = ?1, last_name = ?2, birth_date = ?3, email = ?4, biography = ?5
         WHERE id = ?6",
        params![
            draft.first_name,
            draft.last_name,
            draft.birth_date,
            draft.email,
            draft.biography,
            id,
        ],
    )?;
    Ok(rows > 0)
}

/// Delete an author. Returns false if the ID is unknown.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let rows = conn.execute("DELETE FROM authors WHERE id = ?1", params![id])?;
    Ok(rows > 0)
}

/// Check whether a row exists.
pub fn exists(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?)
}

/// Get an author with its book count.
pub fn get(conn: &Connection, id: i64) -> Result<Option<AuthorRecord>> {
    let sql = format!("{SELECT_RECORD} WHERE a.id = ?1");
    Ok(conn
        .query_row(&sql, params![id], record_from_row)
        .optional()?)
}

/// List all authors with book counts, in ID order.
pub fn list(conn: &Connection) -> Result<Vec<AuthorRecord>> {
    let sql = format!("{SELECT_RECORD} ORDER BY a.id");
    let mut stmt = conn.prepare(&sql)?;
    let authors = stmt
        .query_map([], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(authors)
}
