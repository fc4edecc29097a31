//! Input validation for claude-key-switch operations.
//!
//! Validates keys, labels and environment variable names, and masks keys
//! for display.

use crate::error::{Result, ValidationError};

/// Validate an API key.
///
/// Keys are opaque, but must be usable as a single shell word:
/// - Cannot be empty
/// - No whitespace or control characters
///
/// # Errors
///
/// Returns `ValidationError` if the key is malformed.
pub fn validate_secret(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(ValidationError::EmptySecret.into());
    }

    if let Some(pos) = secret
        .chars()
        .position(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::InvalidSecret(format!(
            "whitespace or control character at position {}",
            pos + 1
        ))
        .into());
    }

    Ok(())
}

/// Validate a key label.
///
/// Labels cannot be empty, cannot contain control characters, and cannot
/// be purely numeric (numbers address keys by position).
pub fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::InvalidLabel("label cannot be empty".to_string()).into());
    }
    if label.chars().any(char::is_control) {
        return Err(ValidationError::InvalidLabel(format!(
            "'{}' contains control characters",
            label.escape_default()
        ))
        .into());
    }
    if label.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidLabel(format!(
            "'{}' is numeric; numbers are reserved for positions",
            label
        ))
        .into());
    }
    Ok(())
}

/// Validate the name of the environment variable used in export mode.
///
/// Must be a valid environment variable name:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
pub fn validate_var_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::InvalidVarName("name cannot be empty".to_string()).into());
    }

    if let Some(first_char) = name.chars().next() {
        if first_char.is_ascii_digit() {
            return Err(ValidationError::InvalidVarName(format!(
                "'{}' cannot start with a digit",
                name
            ))
            .into());
        }
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidVarName(format!(
                "invalid character '{}' at position {} in '{}'",
                ch,
                i + 1,
                name
            ))
            .into());
        }
    }

    Ok(())
}

/// Mask a key for display.
///
/// Shows the first 7 and last 4 characters of long keys
/// (`sk-ant-…WXYZ`); anything of 12 characters or fewer is fully hidden.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
