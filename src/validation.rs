use crate::error::{ContactError, ContactResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ContactResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ContactError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that a value fits on one line of the contact file.
pub fn single_line(value: &str, field: &str) -> ContactResult<()> {
    forbid(value, field, &['\n', '\r'])
}

/// Validates a phone number type: one line, and no `,` since the contact
/// file splits `type,number` at the first comma.
pub fn no_separator(value: &str, field: &str) -> ContactResult<()> {
    forbid(value, field, &[',', '\n', '\r'])
}

fn forbid(value: &str, field: &str, chars: &[char]) -> ContactResult<()> {
    match value.chars().find(|c| chars.contains(c)) {
        Some(found) => Err(ContactError::ForbiddenCharacter {
            field: field.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

/// Validates that a count is positive (> 0).
pub fn positive(value: usize, field: &str) -> ContactResult<usize> {
    if value == 0 {
        Err(ContactError::NonPositive {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
