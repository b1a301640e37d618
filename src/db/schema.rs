use crate::error::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Database wrapper for thread-safe access.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Row counts of the three catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    /// Rows in `books`.
    pub books: i64,
    /// Rows in `authors`.
    pub authors: i64,
    /// Rows in `categories`.
    pub categories: i64,
}

impl TableCounts {
    /// True when all three tables are empty.
    pub fn is_empty(&self) -> bool {
        self.books == 0 && self.authors == 0 && self.categories == 0
    }
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize database schema. Safe to run against an existing store.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS authors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                birth_date TEXT NOT NULL,
                email TEXT NOT NULL,
                biography TEXT
            );

            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT
            );

            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                isbn TEXT NOT NULL,
                publication_date TEXT NOT NULL,
                author_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE RESTRICT,
                FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE RESTRICT
            );

            -- Natural keys
            CREATE UNIQUE INDEX IF NOT EXISTS idx_authors_email ON authors(email COLLATE NOCASE);
            CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_name ON categories(name COLLATE NOCASE);
            CREATE UNIQUE INDEX IF NOT EXISTS idx_books_isbn ON books(isbn);

            CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id);
            CREATE INDEX IF NOT EXISTS idx_books_category ON books(category_id);
            "#,
        )?;

        Ok(())
    }

    /// Run a read-only closure against the connection.
    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run a closure inside one transaction.
    ///
    /// The transaction commits only if the closure returns `Ok`; any error
    /// drops it, which rolls every statement back.
    pub fn write<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let value = f(&*tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Check that the store answers queries.
    pub fn ping(&self) -> Result<()> {
        self.read(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }

    /// Count rows in each table.
    pub fn counts(&self) -> Result<TableCounts> {
        self.read(table_counts)
    }
}

/// Count rows in each table using an existing connection or transaction.
pub(crate) fn table_counts(conn: &Connection) -> Result<TableCounts> {
    let counts = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM books),
                (SELECT COUNT(*) FROM authors),
                (SELECT COUNT(*) FROM categories)",
        [],
        |row| {
            Ok(TableCounts {
                books: row.get(0)?,
                authors: row.get(1)?,
                categories: row.get(2)?,
            })
        },
    )?;
    Ok(counts)
}
