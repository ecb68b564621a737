use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The closed set of reaction types.
///
/// Serialized lowercase both in BSON and at the API boundary, so an invalid
/// value is rejected at deserialization rather than checked downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Same,
    Helpful,
    Upvote,
}

impl ReactionType {
    pub const ALL: [ReactionType; 3] =
        [ReactionType::Same, ReactionType::Helpful, ReactionType::Upvote];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::Same => "same",
            ReactionType::Helpful => "helpful",
            ReactionType::Upvote => "upvote",
        }
    }

    /// Parse free-form caller input into a member of the closed set.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "same" => Ok(ReactionType::Same),
            "helpful" => Ok(ReactionType::Helpful),
            "upvote" => Ok(ReactionType::Upvote),
            _ => Err(AppError::Validation("invalid reaction type".to_string())),
        }
    }
}

/// A reaction as persisted in the `reactions` collection.
///
/// `post_id` is a weak reference: the store does not enforce that the post
/// exists and never cascades deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub post_id: ObjectId,
    pub reaction_type: ReactionType,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(post_id: ObjectId, reaction_type: ReactionType) -> Self {
        Self {
            id: None,
            post_id,
            reaction_type,
            created_at: Utc::now(),
        }
    }
}
