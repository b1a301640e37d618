//! Structural validation of create/update payloads.
//!
//! Validation never touches the store. Every field is checked and all
//! messages are returned together; a missing required field skips the
//! remaining checks for that field only.

use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));
static ISBN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9-]+$").expect("valid isbn regex"));

/// Maximum lengths, in characters.
pub mod limits {
    /// Author first name.
    pub const FIRST_NAME: usize = 50;
    /// Author last name.
    pub const LAST_NAME: usize = 50;
    /// Author email.
    pub const EMAIL: usize = 100;
    /// Author biography.
    pub const BIOGRAPHY: usize = 1000;
    /// Category name.
    pub const CATEGORY_NAME: usize = 100;
    /// Category description.
    pub const DESCRIPTION: usize = 500;
    /// Book title.
    pub const TITLE: usize = 200;
    /// Shortest accepted ISBN.
    pub const ISBN_MIN: usize = 10;
    /// Longest accepted ISBN.
    pub const ISBN_MAX: usize = 13;
}

/// Author create/update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInput {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Birth date, `YYYY-MM-DD` or an ISO date-time.
    pub birth_date: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Biography.
    pub biography: Option<String>,
}

/// Validated author fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Email address.
    pub email: String,
    /// Biography.
    pub biography: Option<String>,
}

/// Category create/update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryInput {
    /// Category name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Validated category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    /// Category name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

/// Book create/update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInput {
    /// Title.
    pub title: Option<String>,
    /// ISBN.
    pub isbn: Option<String>,
    /// Publication date, `YYYY-MM-DD` or an ISO date-time.
    pub publication_date: Option<String>,
    /// Referenced author.
    pub author_id: Option<i64>,
    /// Referenced category.
    pub category_id: Option<i64>,
}

/// Validated book fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    /// Title.
    pub title: String,
    /// ISBN.
    pub isbn: String,
    /// Publication date.
    pub publication_date: NaiveDate,
    /// Referenced author.
    pub author_id: i64,
    /// Referenced category.
    pub category_id: i64,
}

impl AuthorInput {
    /// Validate the payload into a draft.
    pub fn validate(self) -> Result<AuthorDraft> {
        let mut v = Validator::default();

        let first_name = v.required_text(self.first_name, "First name");
        v.max_len(first_name.as_deref(), "First name", limits::FIRST_NAME);

        let last_name = v.required_text(self.last_name, "Last name");
        v.max_len(last_name.as_deref(), "Last name", limits::LAST_NAME);

        let birth_date = v.required_date(self.birth_date, "Birth date");

        let email = v.required_text(self.email, "Email");
        if let Some(email) = email.as_deref()
            && !is_valid_email(email)
        {
            v.fail("Email must be a valid email address.");
        }
        v.max_len(email.as_deref(), "Email", limits::EMAIL);

        v.max_len(self.biography.as_deref(), "Biography", limits::BIOGRAPHY);

        match (first_name, last_name, birth_date, email) {
            (Some(first_name), Some(last_name), Some(birth_date), Some(email)) if v.is_ok() => {
                Ok(AuthorDraft {
                    first_name,
                    last_name,
                    birth_date,
                    email,
                    biography: self.biography,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

impl CategoryInput {
    /// Validate the payload into a draft.
    pub fn validate(self) -> Result<CategoryDraft> {
        let mut v = Validator::default();

        let name = v.required_text(self.name, "Category name");
        v.max_len(name.as_deref(), "Category name", limits::CATEGORY_NAME);
        v.max_len(
            self.description.as_deref(),
            "Description",
            limits::DESCRIPTION,
        );

        match name {
            Some(name) if v.is_ok() => Ok(CategoryDraft {
                name,
                description: self.description,
            }),
            _ => Err(v.into_error()),
        }
    }
}

impl BookInput {
    /// Validate the payload into a draft.
    pub fn validate(self) -> Result<BookDraft> {
        let mut v = Validator::default();

        let title = v.required_text(self.title, "Title");
        v.max_len(title.as_deref(), "Title", limits::TITLE);

        let isbn = v.required_text(self.isbn, "ISBN");
        if let Some(isbn) = isbn.as_deref() {
            let len = isbn.chars().count();
            if !(limits::ISBN_MIN..=limits::ISBN_MAX).contains(&len) {
                v.fail(format!(
                    "ISBN must be between {} and {} characters.",
                    limits::ISBN_MIN,
                    limits::ISBN_MAX
                ));
            }
            if !ISBN_RE.is_match(isbn) {
                v.fail("ISBN may contain only digits and hyphens.");
            }
        }

        let publication_date = v.required_date(self.publication_date, "Publication date");
        let author_id = v.required_ref(self.author_id, "Author", "author");
        let category_id = v.required_ref(self.category_id, "Category", "category");

        match (title, isbn, publication_date, author_id, category_id) {
            (
                Some(title),
                Some(isbn),
                Some(publication_date),
                Some(author_id),
                Some(category_id),
            ) if v.is_ok() => Ok(BookDraft {
                title,
                isbn,
                publication_date,
                author_id,
                category_id,
            }),
            _ => Err(v.into_error()),
        }
    }
}

/// Collects field messages in check order.
#[derive(Default)]
struct Validator {
    errors: Vec<String>,
}

impl Validator {
    fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_error(self) -> AppError {
        AppError::Validation(self.errors)
    }

    /// Blank strings count as missing.
    fn required_text(&mut self, value: Option<String>, field: &str) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.fail(format!("{field} is required."));
                None
            }
        }
    }

    fn max_len(&mut self, value: Option<&str>, field: &str, max: usize) {
        if let Some(value) = value
            && value.chars().count() > max
        {
            self.fail(format!("{field} must not exceed {max} characters."));
        }
    }

    fn required_date(&mut self, value: Option<String>, field: &str) -> Option<NaiveDate> {
        let raw = self.required_text(value, field)?;
        let date = parse_date(&raw);
        if date.is_none() {
            self.fail(format!("{field} must be a valid date (YYYY-MM-DD)."));
        }
        date
    }

    fn required_ref(&mut self, value: Option<i64>, field: &str, noun: &str) -> Option<i64> {
        match value {
            None => {
                self.fail(format!("{field} is required."));
                None
            }
            Some(id) if id < 1 => {
                self.fail(format!("A valid {noun} must be selected."));
                None
            }
            Some(id) => Some(id),
        }
    }
}

/// One `@`, non-empty on both sides, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse a plain date or the date part of an ISO date-time.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
