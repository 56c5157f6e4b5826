//! Validation for quest ids and player free text.
//!
//! Quest ids name files inside the quest directory, so every path built from an
//! id goes through [`secure_record_path`].

use std::path::{Path, PathBuf};

/// Upper bound for quest ids; generated ids are 18 characters.
pub const MAX_QUEST_ID_LEN: usize = 64;

/// Upper bound for a single note or memory moment field.
pub const MAX_NOTE_BYTES: usize = 4096;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Quest id cannot be empty")]
    Empty,

    #[error("Quest id is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Quest id contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },

    #[error("Quest id contains path separators or parent references")]
    PathTraversal,

    #[error("Content too long (max {max_length} bytes)")]
    ContentTooLong { max_length: usize },
}

/// Validate a quest id for filesystem safety. Returns the trimmed id.
pub fn validate_quest_id(id: &str) -> Result<String, ValidationError> {
    let trimmed = id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.len() > MAX_QUEST_ID_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_QUEST_ID_LEN,
        });
    }
    if trimmed.contains('/') || trimmed.contains('\\') || trimmed.contains("..") {
        return Err(ValidationError::PathTraversal);
    }

    // Only allow ASCII alphanumerics, underscore, and hyphen
    let invalid: String = trimmed
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        .collect();
    if !invalid.is_empty() {
        return Err(ValidationError::InvalidCharacters { chars: invalid });
    }

    Ok(trimmed.to_string())
}

/// `<dir>/<id><suffix>` for a validated id, e.g. suffix `".json"`.
pub fn secure_record_path(dir: &Path, id: &str, suffix: &str) -> Result<PathBuf, ValidationError> {
    let validated = validate_quest_id(id)?;
    let path = dir.join(format!("{}{}", validated, suffix));

    // Ensure the path is still within the quest directory
    if path.parent() != Some(dir) {
        return Err(ValidationError::PathTraversal);
    }

    Ok(path)
}

/// Strip control characters (keeping newlines and tabs) and enforce a size limit.
pub fn sanitize_note(content: &str, max_bytes: usize) -> Result<String, ValidationError> {
    if content.len() > max_bytes {
        return Err(ValidationError::ContentTooLong {
            max_length: max_bytes,
        });
    }

    Ok(content
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect())
}
