use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Per-type reaction tallies embedded in every post.
///
/// The key set is closed by construction: exactly `same`, `helpful` and
/// `upvote`, always present, never negative. Stored values are the
/// creation-time snapshot (all zero); live tallies are computed read-side
/// from the reactions collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub same: i64,
    pub helpful: i64,
    pub upvote: i64,
}

/// An anonymous post as persisted in the `posts` collection.
///
/// `id` is `None` until the store assigns one on insert. `created_at` is set
/// server-side and defines feed ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub content: String,
    pub tags: Vec<String>,
    pub is_private: bool,
    pub is_flagged: bool,
    pub reaction_counts: ReactionCounts,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post ready for insertion. Inputs are assumed validated.
    pub fn new(content: String, tags: Vec<String>, is_private: bool) -> Self {
        Self {
            id: None,
            content,
            tags,
            is_private,
            is_flagged: false,
            reaction_counts: ReactionCounts::default(),
            created_at: Utc::now(),
        }
    }
}
