/// Entity validation layer
///
/// Pure functions with no I/O. Every rule runs before a store call; a request
/// that fails here never reaches the document store. Lengths are counted in
/// characters, matching the limits exposed to API callers.
use mongodb::bson::oid::ObjectId;

use crate::error::{AppError, Result};

/// Longest accepted tag, in characters, after normalization.
pub const MAX_TAG_LENGTH: usize = 50;

/// Reject empty content and content longer than `max` characters.
pub fn validate_content_length(content: &str, max: usize) -> Result<()> {
    if content.is_empty() {
        return Err(AppError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > max {
        return Err(AppError::Validation("content too long".to_string()));
    }
    Ok(())
}

/// Reject tag lists longer than `max`.
pub fn validate_tag_count(tags: &[String], max: usize) -> Result<()> {
    if tags.len() > max {
        return Err(AppError::Validation("too many tags".to_string()));
    }
    Ok(())
}

/// Normalize a feed tag filter: trim whitespace, lowercase, bound the length.
pub fn normalize_tag_filter(tag: &str) -> Result<String> {
    let normalized = tag.trim().to_lowercase();
    if normalized.chars().count() > MAX_TAG_LENGTH {
        return Err(AppError::Validation("tag too long".to_string()));
    }
    Ok(normalized)
}

/// Normalize a tag attached to a new post.
///
/// Same rules as the filter, plus a non-empty requirement so the stored
/// invariant (lowercase, short, meaningful tags) always holds.
pub fn normalize_post_tag(tag: &str) -> Result<String> {
    let normalized = normalize_tag_filter(tag)?;
    if normalized.is_empty() {
        return Err(AppError::Validation("tag must not be empty".to_string()));
    }
    Ok(normalized)
}

/// Parse a caller-supplied identifier into the store's native id type.
///
/// Accepts exactly the 24-character hex shape of an ObjectId.
pub fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::Validation("invalid id format".to_string()))
}

/// Bound a caller-supplied page size to `[1, max]`.
pub fn validate_page_params(limit: u32, max: u32) -> Result<()> {
    if limit < 1 || limit > max {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {max}"
        )));
    }
    Ok(())
}
