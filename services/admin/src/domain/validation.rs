//! Form validation with per-field messages in the shape the admin panel renders.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use corporate_domain::auth::FieldErrors;

use crate::domain::types::{ImageKind, Upload};
use crate::error::AdminServiceError;

/// Largest accepted avatar, in KiB.
pub const AVATAR_MAX_KIB: usize = 1024;

/// Largest accepted content photo, in KiB.
pub const PHOTO_MAX_KIB: usize = 2048;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Sniff the image format from magic bytes; the client-supplied content type is ignored.
pub fn detect_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageKind::Jpeg)
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(ImageKind::Png)
    } else {
        None
    }
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

/// Collects field errors; `conclude` turns them into a 422.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Trimmed non-empty value, or a "required" error.
    pub fn required(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v.to_owned()),
            None => {
                self.add(field, format!("The {} field is required.", label(field)));
                None
            }
        }
    }

    /// `None` when absent, `Some(None)` when submitted blank, `Some(Some(_))` otherwise.
    pub fn nullable(value: Option<&str>) -> Option<Option<String>> {
        value.map(|v| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_owned())
        })
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!("The {} field must not be greater than {max} characters.", label(field)),
            );
        }
    }

    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(
                field,
                format!("The {} field must be at least {min} characters.", label(field)),
            );
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !valid_email(value) {
            self.add(
                field,
                format!("The {} field must be a valid email address.", label(field)),
            );
        }
    }

    pub fn confirmed(&mut self, field: &str, value: &str, confirmation: Option<&str>) {
        if confirmation != Some(value) {
            self.add(
                field,
                format!("The {} field confirmation does not match.", label(field)),
            );
        }
    }

    /// Parse a `YYYY-MM-DD` date.
    pub fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.add(
                    field,
                    format!("The {} field must be a valid date.", label(field)),
                );
                None
            }
        }
    }

    pub fn integer(&mut self, field: &str, value: &str) -> Option<i32> {
        match value.trim().parse::<i32>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.add(field, format!("The {} field must be an integer.", label(field)));
                None
            }
        }
    }

    /// Parse a value against a fixed set of options.
    pub fn one_of<T: std::str::FromStr>(&mut self, field: &str, value: &str) -> Option<T> {
        match value.trim().parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.add(field, format!("The selected {} is invalid.", label(field)));
                None
            }
        }
    }

    /// A jpg/jpeg/png image no larger than `max_kib`.
    pub fn image(&mut self, field: &str, upload: &Upload, max_kib: usize) -> Option<ImageKind> {
        let kind = detect_image(&upload.bytes);
        if kind.is_none() {
            self.add(
                field,
                format!("The {} field must be a file of type: jpg, jpeg, png.", label(field)),
            );
        }
        if upload.size_kib() > max_kib {
            self.add(
                field,
                format!(
                    "The {} field must not be greater than {max_kib} kilobytes.",
                    label(field)
                ),
            );
            return None;
        }
        kind
    }

    pub fn conclude(self) -> Result<(), AdminServiceError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AdminServiceError::Validation(self.errors))
        }
    }
}
