/// Reaction handlers - HTTP endpoints for reaction operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Reaction, ReactionCounts, ReactionType};
use crate::services::ReactionService;

#[derive(Debug, Deserialize)]
pub struct CreateReactionRequest {
    pub post_id: String,
    pub reaction_type: String,
}

#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    pub id: String,
    pub post_id: String,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self {
            id: reaction.id.map(|id| id.to_hex()).unwrap_or_default(),
            post_id: reaction.post_id.to_hex(),
            reaction_type: reaction.reaction_type,
            created_at: reaction.created_at,
        }
    }
}

/// React to a post with one of the three fixed types
pub async fn create_reaction(
    service: web::Data<ReactionService>,
    req: web::Json<CreateReactionRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let reaction_type = ReactionType::parse(&req.reaction_type)?;
    let reaction = service.create_reaction(&req.post_id, reaction_type).await?;

    Ok(HttpResponse::Ok().json(ReactionResponse::from(reaction)))
}

#[derive(Debug, Serialize)]
pub struct ReactionCountsResponse {
    pub post_id: String,
    pub reaction_counts: ReactionCounts,
}

/// Tally reactions per type for a post
pub async fn get_reaction_counts(
    service: web::Data<ReactionService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let reaction_counts = service.count_reactions(&post_id).await?;

    Ok(HttpResponse::Ok().json(ReactionCountsResponse {
        post_id,
        reaction_counts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn response_serializes_reaction_type_lowercase() {
        let mut reaction = Reaction::new(ObjectId::new(), ReactionType::Helpful);
        reaction.id = Some(ObjectId::new());

        let value = serde_json::to_value(ReactionResponse::from(reaction)).unwrap();
        assert_eq!(value["reaction_type"], "helpful");
        assert_eq!(value["post_id"].as_str().unwrap().len(), 24);
    }
}
