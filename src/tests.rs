use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::{Database, seed};
use crate::error::AppError;
use crate::query::{AuthorQuery, BookQuery};
use crate::server::{AppState, create_router};
use crate::validation::{AuthorInput, BookInput, CategoryInput};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

fn test_catalog() -> Catalog {
    Catalog::new(Database::open_memory().unwrap())
}

fn seeded_catalog() -> Catalog {
    let db = Database::open_memory().unwrap();
    seed::seed_if_empty(&db).unwrap();
    Catalog::new(db)
}

fn author_input(first: &str, last: &str, email: &str) -> AuthorInput {
    AuthorInput {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        birth_date: Some("1900-01-01".to_string()),
        email: Some(email.to_string()),
        biography: None,
    }
}

fn category_input(name: &str) -> CategoryInput {
    CategoryInput {
        name: Some(name.to_string()),
        description: None,
    }
}

fn book_input(title: &str, isbn: &str, author_id: i64, category_id: i64) -> BookInput {
    BookInput {
        title: Some(title.to_string()),
        isbn: Some(isbn.to_string()),
        publication_date: Some("1950-06-15".to_string()),
        author_id: Some(author_id),
        category_id: Some(category_id),
    }
}

// ========== STORE ==========

#[test]
fn db_seed_loads_fixed_rows() {
    let catalog = seeded_catalog();
    let counts = catalog.counts().unwrap();
    assert_eq!(counts.authors, 4);
    assert_eq!(counts.categories, 5);
    assert_eq!(counts.books, 8);
}

#[test]
fn db_seed_is_idempotent() {
    let db = Database::open_memory().unwrap();
    assert!(seed::seed_if_empty(&db).unwrap());
    assert!(!seed::seed_if_empty(&db).unwrap());
    assert_eq!(db.counts().unwrap().books, 8);
}

#[test]
fn db_seed_skips_partially_populated_store() {
    let catalog = test_catalog();
    catalog.create_category(category_input("Esej")).unwrap();
    assert!(!seed::seed_if_empty(catalog.database()).unwrap());
    assert_eq!(catalog.counts().unwrap().categories, 1);
}

#[test]
fn db_seed_rows_pass_payload_validation() {
    for b in seed::seed_books() {
        let input = BookInput {
            title: Some(b.title.clone()),
            isbn: Some(b.isbn.clone()),
            publication_date: Some(b.publication_date.to_string()),
            author_id: Some(b.author_id),
            category_id: Some(b.category_id),
        };
        assert!(input.validate().is_ok(), "seed book {} rejected", b.id);
    }
    for a in seed::seed_authors() {
        let input = AuthorInput {
            first_name: Some(a.first_name.clone()),
            last_name: Some(a.last_name.clone()),
            birth_date: Some(a.birth_date.to_string()),
            email: Some(a.email.clone()),
            biography: a.biography.clone(),
        };
        assert!(input.validate().is_ok(), "seed author {} rejected", a.id);
    }
    for c in seed::seed_categories() {
        let input = CategoryInput {
            name: Some(c.name.clone()),
            description: c.description.clone(),
        };
        assert!(input.validate().is_ok(), "seed category {} rejected", c.id);
    }
}

#[test]
fn db_seeded_book_can_be_reassigned_without_new_isbn() {
    let catalog = seeded_catalog();
    let seeded = catalog.get_book(6).unwrap();
    let moved = catalog
        .update_book(6, book_input(&seeded.title, &seeded.isbn, 3, 5))
        .unwrap();
    assert_eq!(moved.isbn, seeded.isbn);
    assert_eq!(moved.category_name, "Esej");
}

#[test]
fn db_reopen_keeps_data_and_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");

    {
        let db = Database::open(&path).unwrap();
        assert!(seed::seed_if_empty(&db).unwrap());
        let catalog = Catalog::new(db);
        catalog
            .create_author(author_input("Srečko", "Kosovel", "srecko.kosovel@knjiznica.si"))
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert!(!seed::seed_if_empty(&db).unwrap());
    let counts = db.counts().unwrap();
    assert_eq!(counts.authors, 5);
    assert_eq!(counts.books, 8);
}

#[test]
fn db_foreign_keys_restrict_deletes_at_sql_level() {
    let catalog = seeded_catalog();
    let result = catalog.database().write(|conn| {
        conn.execute("DELETE FROM authors WHERE id = 1", [])?;
        Ok(())
    });
    assert!(matches!(result, Err(AppError::Store(_))));
    assert!(catalog.get_author(1).is_ok());
}

#[test]
fn db_failed_write_rolls_back() {
    let catalog = test_catalog();
    let result: crate::Result<()> = catalog.database().write(|conn| {
        conn.execute("INSERT INTO categories (name) VALUES ('Roman')", [])?;
        Err(AppError::DuplicateKey("forced".to_string()))
    });
    assert!(result.is_err());
    assert!(catalog.list_categories().unwrap().is_empty());
}

// ========== AUTHORS ==========

#[test]
fn author_create_then_get_round_trips() {
    let catalog = test_catalog();
    let mut input = author_input("Srečko", "Kosovel", "srecko.kosovel@knjiznica.si");
    input.biography = Some("Pesnik Krasa.".to_string());

    let created = catalog.create_author(input).unwrap();
    assert_eq!(created.book_count, 0);

    let fetched = catalog.get_author(created.id).unwrap();
    assert_eq!(fetched.first_name, "Srečko");
    assert_eq!(fetched.last_name, "Kosovel");
    assert_eq!(fetched.email, "srecko.kosovel@knjiznica.si");
    assert_eq!(fetched.biography.as_deref(), Some("Pesnik Krasa."));
    assert_eq!(fetched.birth_date.to_string(), "1900-01-01");
    assert_eq!(fetched.book_count, 0);
    assert_eq!(fetched.books, Some(Vec::new()));
}

#[test]
fn author_email_is_unique_ignoring_case() {
    let catalog = seeded_catalog();
    let err = catalog
        .create_author(author_input("Ivan", "Drugi", "IVAN.Cankar@Knjiznica.SI"))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
    assert_eq!(catalog.counts().unwrap().authors, 4);
}

#[test]
fn author_update_to_own_email_succeeds() {
    let catalog = seeded_catalog();
    let mut input = author_input("Ivan", "Cankar", "ivan.cankar@knjiznica.si");
    input.biography = Some("Posodobljeno.".to_string());

    let updated = catalog.update_author(2, input).unwrap();
    assert_eq!(updated.biography.as_deref(), Some("Posodobljeno."));
    assert_eq!(updated.book_count, 3);
}

#[test]
fn author_update_to_another_authors_email_fails() {
    let catalog = seeded_catalog();
    let err = catalog
        .update_author(2, author_input("Ivan", "Cankar", "france.preseren@knjiznica.si"))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
    assert_eq!(
        catalog.get_author(2).unwrap().email,
        "ivan.cankar@knjiznica.si"
    );
}

#[test]
fn author_update_missing_id_is_not_found() {
    let catalog = seeded_catalog();
    let err = catalog
        .update_author(99, author_input("Nihče", "Nobeden", "nihce@knjiznica.si"))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn update_missing_id_reports_not_found_before_validation() {
    let catalog = seeded_catalog();

    let err = catalog
        .update_author(99, AuthorInput::default())
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = catalog
        .update_category(99, CategoryInput::default())
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = catalog.update_book(99, BookInput::default()).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Existing rows still get the full validation report.
    let err = catalog.update_book(1, BookInput::default()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn author_create_update_fetch_returns_new_values() {
    let catalog = test_catalog();
    let created = catalog
        .create_author(author_input("Anton", "Aškerc", "anton@knjiznica.si"))
        .unwrap();

    let mut change = author_input("Anton", "Aškerc", "anton.askerc@knjiznica.si");
    change.birth_date = Some("1856-01-09".to_string());
    catalog.update_author(created.id, change).unwrap();

    let fetched = catalog.get_author(created.id).unwrap();
    assert_eq!(fetched.email, "anton.askerc@knjiznica.si");
    assert_eq!(fetched.birth_date.to_string(), "1856-01-09");
}

#[test]
fn author_validation_errors_are_reported_together() {
    let catalog = test_catalog();
    let input = AuthorInput {
        email: Some("not-an-email".to_string()),
        ..Default::default()
    };
    match catalog.create_author(input).unwrap_err() {
        AppError::Validation(messages) => assert_eq!(messages.len(), 4),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn author_delete_blocked_while_books_exist() {
    let catalog = seeded_catalog();
    let err = catalog.delete_author(1).unwrap_err();
    assert!(matches!(err, AppError::HasDependents(_)));

    catalog.delete_book(1).unwrap();
    catalog.delete_book(2).unwrap();
    catalog.delete_author(1).unwrap();
    assert!(matches!(
        catalog.get_author(1).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn author_list_search_and_sort() {
    let catalog = seeded_catalog();

    let all = catalog.list_authors(&AuthorQuery::default()).unwrap();
    let last_names: Vec<&str> = all.iter().map(|a| a.last_name.as_str()).collect();
    assert_eq!(last_names, vec!["Cankar", "Jurčič", "Kette", "Prešeren"]);
    assert!(all.iter().all(|a| a.books.is_none()));
    assert_eq!(all[0].book_count, 3);

    let by_date = catalog
        .list_authors(&AuthorQuery {
            search: None,
            sort_by: Some("date".to_string()),
        })
        .unwrap();
    assert_eq!(by_date[0].last_name, "Prešeren");

    let found = catalog
        .list_authors(&AuthorQuery {
            search: Some("KETTE".to_string()),
            sort_by: None,
        })
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name, "Dragotin");
}

#[test]
fn author_get_includes_books_with_category_names() {
    let catalog = seeded_catalog();
    let cankar = catalog.get_author(2).unwrap();
    let books = cankar.books.unwrap();
    assert_eq!(books.len(), 3);
    assert!(books.iter().all(|b| b.author_name == "Ivan Cankar"));
    assert!(books.iter().any(|b| b.category_name == "Drama"));
}

// ========== CATEGORIES ==========

#[test]
fn category_name_is_unique_ignoring_case() {
    let catalog = seeded_catalog();
    let err = catalog.create_category(category_input("poEZIJA")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[test]
fn category_unique_name_folds_non_ascii() {
    let catalog = test_catalog();
    catalog.create_category(category_input("Čarovnija")).unwrap();
    let err = catalog.create_category(category_input("čarovnija")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[test]
fn category_rename_to_own_name_in_other_case_succeeds() {
    let catalog = seeded_catalog();
    let updated = catalog.update_category(2, category_input("ROMAN")).unwrap();
    assert_eq!(updated.name, "ROMAN");
    assert_eq!(updated.book_count, 1);
}

#[test]
fn category_delete_restricted_until_books_move() {
    let catalog = seeded_catalog();

    // Category 3 (Drama) holds book 5.
    let err = catalog.delete_category(3).unwrap_err();
    assert!(matches!(err, AppError::HasDependents(_)));

    let mut moved = book_input("Za narodov blagor", "978-9610-1238", 2, 4);
    moved.publication_date = Some("1901-11-10".to_string());
    catalog.update_book(5, moved).unwrap();

    catalog.delete_category(3).unwrap();
    assert!(matches!(
        catalog.get_category(3).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn category_delete_missing_is_not_found() {
    let catalog = test_catalog();
    assert!(matches!(
        catalog.delete_category(7).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn category_get_returns_all_books_list_only_counts() {
    let catalog = seeded_catalog();

    let poetry = catalog.get_category(1).unwrap();
    assert_eq!(poetry.book_count, 4);
    assert_eq!(poetry.books.as_ref().map(Vec::len), Some(4));

    let list = catalog.list_categories().unwrap();
    let ids: Vec<i64> = list.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(list.iter().all(|c| c.books.is_none()));
    assert_eq!(list[4].book_count, 0);
}

// ========== BOOKS ==========

#[test]
fn book_with_missing_author_is_rejected_and_not_persisted() {
    let catalog = seeded_catalog();
    let err = catalog
        .create_book(book_input("Nova", "978-0000-0001", 42, 1))
        .unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound(_)));
    assert_eq!(catalog.counts().unwrap().books, 8);
}

#[test]
fn book_with_missing_category_is_rejected() {
    let catalog = seeded_catalog();
    let err = catalog
        .create_book(book_input("Nova", "978-0000-0001", 1, 42))
        .unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound(_)));
}

#[test]
fn book_isbn_is_unique_case_sensitively() {
    let catalog = seeded_catalog();
    let err = catalog
        .create_book(book_input("Kopija", "978-9610-1234", 1, 1))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[test]
fn book_create_projects_display_fields() {
    let catalog = seeded_catalog();
    let book = catalog
        .create_book(book_input("Sosedov sin", "978-9610-9999", 3, 2))
        .unwrap();
    assert_eq!(book.author_name, "Josip Jurčič");
    assert_eq!(book.category_name, "Roman");
    assert_eq!(catalog.get_author(3).unwrap().book_count, 2);
    assert_eq!(catalog.get_category(2).unwrap().book_count, 2);
}

#[test]
fn book_update_keeps_own_isbn_and_rechecks_references() {
    let catalog = seeded_catalog();

    let same_isbn = book_input("Poezije (ponatis)", "978-9610-1234", 1, 1);
    let updated = catalog.update_book(1, same_isbn).unwrap();
    assert_eq!(updated.title, "Poezije (ponatis)");

    let bad_author = book_input("Poezije", "978-9610-1234", 77, 1);
    let err = catalog.update_book(1, bad_author).unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound(_)));
    assert_eq!(catalog.get_book(1).unwrap().title, "Poezije (ponatis)");
}

#[test]
fn book_delete_missing_is_not_found() {
    let catalog = seeded_catalog();
    assert!(matches!(
        catalog.delete_book(100).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn book_search_by_author_last_name_substring() {
    let catalog = seeded_catalog();
    catalog
        .create_author(author_input("Janez", "Cankarjev", "janez@knjiznica.si"))
        .unwrap();
    catalog
        .create_book(book_input("Spomini", "978-9610-5000", 5, 5))
        .unwrap();

    let found = catalog
        .list_books(&BookQuery {
            search: Some("cAnKaR".to_string()),
            ..Default::default()
        })
        .unwrap();
    let mut ids: Vec<i64> = found.iter().map(|b| b.id).collect();
    ids.sort();
    assert_eq!(ids, vec![3, 4, 5, 9]);
}

#[test]
fn book_unknown_sort_falls_back_to_title() {
    let catalog = seeded_catalog();
    let books = catalog
        .list_books(&BookQuery {
            sort_by: Some("popularity".to_string()),
            ..Default::default()
        })
        .unwrap();
    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Deseti brat",
            "Hiša Marije Pomočnice",
            "Krst pri Savici",
            "Moja pomlad",
            "Na klancu",
            "Poezije",
            "Za narodov blagor",
            "Zadnja postaja",
        ]
    );
}

#[test]
fn book_filters_apply_before_search() {
    let catalog = seeded_catalog();

    let poetry = catalog
        .list_books(&BookQuery {
            category_id: Some(1),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(poetry.len(), 4);

    let kette_poetry = catalog
        .list_books(&BookQuery {
            category_id: Some(1),
            author_id: Some(4),
            sort_by: Some("date".to_string()),
            ..Default::default()
        })
        .unwrap();
    let titles: Vec<&str> = kette_poetry.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Moja pomlad", "Zadnja postaja"]);

    let none = catalog
        .list_books(&BookQuery {
            category_id: Some(4),
            search: Some("Prešeren".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn book_sort_by_author_uses_last_then_first_name() {
    let catalog = seeded_catalog();
    let books = catalog
        .list_books(&BookQuery {
            sort_by: Some("author".to_string()),
            ..Default::default()
        })
        .unwrap();
    let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![3, 4, 5, 6, 7, 8, 1, 2]);
}

// ========== STATISTICS ==========

#[test]
fn stats_on_seed_data() {
    let catalog = seeded_catalog();
    let stats = catalog.statistics().unwrap();

    assert_eq!(stats.total_books, 8);
    assert_eq!(stats.total_authors, 4);
    assert_eq!(stats.total_categories, 5);

    let top_category = stats.top_category.unwrap();
    assert_eq!(top_category.name, "Poezija");
    assert_eq!(top_category.book_count, 4);

    let top_author = stats.top_author.unwrap();
    assert_eq!(top_author.author_name, "Ivan Cankar");
    assert_eq!(top_author.book_count, 3);
}

#[test]
fn stats_breakdown_sorted_descending_with_zero_counts() {
    let catalog = test_catalog();
    let author = catalog
        .create_author(author_input("Ana", "Novak", "ana@knjiznica.si"))
        .unwrap();
    let big = catalog.create_category(category_input("Big")).unwrap();
    let small = catalog.create_category(category_input("Small")).unwrap();
    let empty = catalog.create_category(category_input("Empty")).unwrap();

    // Insert the small category's book first so counts, not order, decide.
    catalog
        .create_book(book_input("S1", "1000000001", author.id, small.id))
        .unwrap();
    for (i, title) in ["B1", "B2", "B3"].iter().enumerate() {
        let isbn = format!("200000000{i}");
        catalog
            .create_book(book_input(title, &isbn, author.id, big.id))
            .unwrap();
    }

    let stats = catalog.statistics().unwrap();
    assert_eq!(stats.top_category.as_ref().unwrap().id, big.id);
    assert_eq!(stats.top_category.as_ref().unwrap().book_count, 3);

    let breakdown: Vec<(i64, i64)> = stats
        .categories
        .iter()
        .map(|c| (c.id, c.book_count))
        .collect();
    assert_eq!(
        breakdown,
        vec![(big.id, 3), (small.id, 1), (empty.id, 0)]
    );
}

#[test]
fn stats_ties_go_to_lowest_id() {
    let catalog = seeded_catalog();
    // Without book 5, Prešeren, Cankar and Kette all have 2 books.
    catalog.delete_book(5).unwrap();
    let stats = catalog.statistics().unwrap();
    let top = stats.top_author.unwrap();
    assert_eq!(top.id, 1);
    let ids: Vec<i64> = stats.authors.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 3]);
}

#[test]
fn stats_on_empty_store() {
    let catalog = test_catalog();
    let stats = catalog.statistics().unwrap();
    assert_eq!(stats.total_books, 0);
    assert!(stats.top_category.is_none());
    assert!(stats.top_author.is_none());
    assert!(stats.categories.is_empty());
}

// ========== CONFIG ==========

#[test]
fn config_parse_toml() {
    let toml = r#"
[server]
bind = "127.0.0.1:9090"
title = "Mestna knjižnica"

[database]
path = "/tmp/catalog.db"
seed = false
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.server.bind.port(), 9090);
    assert_eq!(config.server.title, "Mestna knjižnica");
    assert_eq!(config.database.path.to_str(), Some("/tmp/catalog.db"));
    assert!(!config.database.seed);
}

#[test]
fn config_default_values() {
    let config = Config::default();
    assert_eq!(config.server.bind.port(), 8080);
    assert!(config.database.seed);
    assert_eq!(config.database.path.to_str(), Some("data/catalog.db"));
}

#[test]
fn config_database_path_and_seed_flag_are_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!(
        "[database]\npath = \"{}\"\nseed = false\n",
        dir.path().join("custom").join("store.db").display()
    );
    let mut config: Config = toml::from_str(&toml).unwrap();

    let (db, seeded) = seed::open_configured(&config.database).unwrap();
    assert!(!seeded);
    assert!(db.counts().unwrap().is_empty());
    assert!(config.database.path.exists());
    drop(db);

    config.database.seed = true;
    let (db, seeded) = seed::open_configured(&config.database).unwrap();
    assert!(seeded);
    assert_eq!(db.counts().unwrap().books, 8);
}

#[test]
fn config_generated_default_parses() {
    let config: Config = toml::from_str(&Config::generate_default()).unwrap();
    assert_eq!(config.server.title, "Library Catalog");
    assert!(config.database.seed);
}

// ========== HTTP ==========

fn test_app() -> axum::Router {
    create_router(AppState::new(Config::default(), seeded_catalog()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn http_health_reports_counts() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["database"], "connected");
    assert_eq!(body["counts"]["books"], 8);
    assert_eq!(body["counts"]["authors"], 4);
    assert_eq!(body["counts"]["categories"], 5);
}

#[tokio::test]
async fn http_list_books_with_query_params() {
    let response = test_app()
        .oneshot(get("/api/books?categoryId=4&sort_by=date"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Na klancu", "Hiša Marije Pomočnice"]);
    assert_eq!(body[0]["author_name"], "Ivan Cankar");
    assert_eq!(body[0]["category_name"], "Novela");
}

#[tokio::test]
async fn http_create_author_returns_created_with_location() {
    let payload = serde_json::json!({
        "first_name": "Oton",
        "last_name": "Župančič",
        "birth_date": "1878-01-23T00:00:00",
        "email": "oton.zupancic@knjiznica.si",
    });
    let response = test_app()
        .oneshot(json_request("POST", "/api/authors", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/authors/5"
    );
    let body = body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["birth_date"], "1878-01-23");
    assert_eq!(body["book_count"], 0);
    assert!(body.get("books").is_none());
}

#[tokio::test]
async fn http_validation_failure_lists_messages() {
    let payload = serde_json::json!({ "isbn": "abc" });
    let response = test_app()
        .oneshot(json_request("POST", "/api/books", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let messages = body.as_array().unwrap();
    assert!(messages.len() >= 5);
    assert!(messages.contains(&serde_json::json!("Title is required.")));
}

#[tokio::test]
async fn http_delete_with_dependents_is_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/categories/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_delete_unreferenced_category_returns_no_content() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/categories/5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn http_missing_id_is_not_found() {
    let response = test_app().oneshot(get("/api/books/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_statistics() {
    let response = test_app().oneshot(get("/api/statistics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_books"], 8);
    assert_eq!(body["top_category"]["name"], "Poezija");
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);
}
