//! Field checks shared by the store and order services. Each returns the trimmed value.

use crate::error::{AppError, AppResult, ValidationReason};

pub fn required(field: &'static str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, ValidationReason::Required));
    }
    Ok(value.to_string())
}

fn digits(field: &'static str, value: &str, len: usize) -> AppResult<String> {
    let value = required(field, value)?;
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(field, ValidationReason::InvalidFormat));
    }
    Ok(value)
}

/// Exactly 10 ASCII digits.
pub fn phone(field: &'static str, value: &str) -> AppResult<String> {
    digits(field, value, 10)
}

pub fn pincode(field: &'static str, value: &str) -> AppResult<String> {
    digits(field, value, 6)
}

pub fn email(field: &'static str, value: &str) -> AppResult<String> {
    let value = required(field, value)?;
    match value.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(value)
        }
        _ => Err(AppError::validation(field, ValidationReason::InvalidFormat)),
    }
}

/// Blank optional references are stored as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

const KEY_SEPARATOR: char = '\u{1f}';

/// Lowercased searchable text for a row. Listings match against it instead of SQL
/// `lower()`, which folds only ASCII on SQLite.
pub fn search_key(parts: &[&str]) -> String {
    let mut key = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(&part.to_lowercase());
    }
    key
}

/// Lowercased `%text%` LIKE pattern over a `search_key`, wildcards escaped by `\`.
pub fn search_pattern(text: Option<&str>) -> Option<String> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.to_lowercase().chars() {
        if ch == KEY_SEPARATOR {
            continue;
        }
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}
