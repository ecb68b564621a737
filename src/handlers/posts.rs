/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Post, ReactionCounts};
use crate::services::PostService;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_private: bool,
    pub is_flagged: bool,
    pub reaction_counts: ReactionCounts,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: post.content,
            tags: post.tags,
            is_private: post.is_private,
            is_flagged: post.is_flagged,
            reaction_counts: post.reaction_counts,
            created_at: post.created_at,
        }
    }
}

/// Create a new anonymous post
pub async fn create_post(
    service: web::Data<PostService>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let post = service
        .create_post(&req.content, req.tags, req.is_private)
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u32>,
    pub tag: Option<String>,
}

/// Get the public feed, newest first
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let posts = service
        .list_posts(query.skip, query.limit, query.tag.as_deref())
        .await?;

    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Get a specific post by id
pub async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post = service.get_post(&path).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}
