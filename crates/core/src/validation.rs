//! Input validation utilities.
//!
//! Document-store collections and ids end up as path components of the local file store,
//! so they are checked before any filesystem access.

use crate::constants::MAX_DOCUMENT_ID_LEN;
use crate::{StoreError, StoreResult};

/// Validates that a collection name or document id is safe to use as a single path
/// component.
///
/// - Rejects empty or whitespace-only strings
/// - Bounds the length
/// - Restricts characters to ASCII alphanumerics plus `.`, `-`, `_`
/// - Rejects the relative components `.` and `..`
///
/// # Errors
///
/// Returns [`StoreError::InvalidPath`] describing the first failed rule.
pub fn validate_path_component(kind: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidPath(format!("{kind} cannot be empty")));
    }

    if value.len() > MAX_DOCUMENT_ID_LEN {
        return Err(StoreError::InvalidPath(format!(
            "{kind} exceeds maximum length of {MAX_DOCUMENT_ID_LEN} characters"
        )));
    }

    if value == "." || value == ".." {
        return Err(StoreError::InvalidPath(format!(
            "{kind} cannot be a relative path component"
        )));
    }

    let ok = value
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(StoreError::InvalidPath(format!(
            "{kind} contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
        )));
    }

    Ok(())
}
