//! Initial catalog content, loaded once into an empty store.

use crate::config::DatabaseConfig;
use crate::db::{Author, Book, Category, Database, authors, books, categories, table_counts};
use crate::error::Result;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn author(id: i64, first: &str, last: &str, born: NaiveDate, email: &str, bio: &str) -> Author {
    Author {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_date: born,
        email: email.to_string(),
        biography: Some(bio.to_string()),
    }
}

fn category(id: i64, name: &str, description: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

fn book(id: i64, title: &str, isbn: &str, published: NaiveDate, author: i64, cat: i64) -> Book {
    Book {
        id,
        title: title.to_string(),
        isbn: isbn.to_string(),
        publication_date: published,
        author_id: author,
        category_id: cat,
    }
}

/// Seed authors.
pub fn seed_authors() -> Vec<Author> {
    vec![
        author(
            1,
            "France",
            "Prešeren",
            date(1800, 12, 3),
            "france.preseren@knjiznica.si",
            "Največji slovenski pesnik, avtor Zdravljice in Krsta pri Savici.",
        ),
        author(
            2,
            "Ivan",
            "Cankar",
            date(1876, 5, 10),
            "ivan.cankar@knjiznica.si",
            "Slovenski pisatelj in dramatik, avtor novel Hiša Marije Pomočnice in Na klancu.",
        ),
        author(
            3,
            "Josip",
            "Jurčič",
            date(1844, 3, 4),
            "josip.jurcic@knjiznica.si",
            "Prvi slovenski romanopisec, avtor romana Deseti brat.",
        ),
        author(
            4,
            "Dragotin",
            "Kette",
            date(1876, 7, 19),
            "dragotin.kette@knjiznica.si",
            "Slovenski pesnik moderne, predstavnik simbolizma.",
        ),
    ]
}

/// Seed categories.
pub fn seed_categories() -> Vec<Category> {
    vec![
        category(1, "Poezija", "Pesniška dela in zbirke pesmi"),
        category(2, "Roman", "Romani in daljša prozna dela"),
        category(3, "Drama", "Dramska dela in gledališke igre"),
        category(4, "Novela", "Krajša prozna dela in novele"),
        category(5, "Esej", "Eseji in razprave"),
    ]
}

/// Seed books.
pub fn seed_books() -> Vec<Book> {
    vec![
        book(1, "Poezije", "978-9610-1234", date(1847, 12, 29), 1, 1),
        book(2, "Krst pri Savici", "978-9610-1235", date(1836, 8, 15), 1, 1),
        book(3, "Na klancu", "978-9610-1236", date(1902, 3, 20), 2, 4),
        book(4, "Hiša Marije Pomočnice", "978-9610-1237", date(1904, 5, 15), 2, 4),
        book(5, "Za narodov blagor", "978-9610-1238", date(1901, 11, 10), 2, 3),
        book(6, "Deseti brat", "978-9610-1239", date(1866, 6, 1), 3, 2),
        book(7, "Moja pomlad", "978-9610-1240", date(1899, 4, 12), 4, 1),
        book(8, "Zadnja postaja", "978-9610-1241", date(1900, 9, 18), 4, 1),
    ]
}

/// Load the seed set if every table is empty.
///
/// Returns whether rows were inserted. Running it against a populated store
/// is a no-op.
pub fn seed_if_empty(db: &Database) -> Result<bool> {
    let seeded = db.write(|conn| {
        if !table_counts(conn)?.is_empty() {
            return Ok(false);
        }

        for a in seed_authors() {
            authors::insert_with_id(conn, &a)?;
        }
        for c in seed_categories() {
            categories::insert_with_id(conn, &c)?;
        }
        for b in seed_books() {
            books::insert_with_id(conn, &b)?;
        }
        Ok(true)
    })?;

    if seeded {
        tracing::info!("Seeded empty store with initial catalog");
    } else {
        tracing::debug!("Store already populated, skipping seed");
    }
    Ok(seeded)
}

/// Open the configured store, seeding it when `seed` is enabled.
///
/// Returns the handle and whether the seed set was loaded.
pub fn open_configured(config: &DatabaseConfig) -> Result<(Database, bool)> {
    let db = Database::open(&config.path)?;
    let seeded = if config.seed {
        seed_if_empty(&db)?
    } else {
        false
    };
    Ok((db, seeded))
}
