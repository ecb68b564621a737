/// Post service - creation, feed listing and lookup.
use futures::stream::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection};

use crate::config::LimitsConfig;
use crate::db::DocumentStore;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::validation;

#[derive(Clone)]
pub struct PostService {
    posts: Collection<Post>,
    limits: LimitsConfig,
}

impl PostService {
    pub fn new(store: &DocumentStore, limits: LimitsConfig) -> Self {
        Self {
            posts: store.posts(),
            limits,
        }
    }

    /// Validate, normalize and persist a new post.
    ///
    /// Validation runs before any store call; the stored document always
    /// satisfies the entity invariants (normalized tags, zeroed counts,
    /// unflagged, server-side timestamp).
    pub async fn create_post(
        &self,
        content: &str,
        tags: Vec<String>,
        is_private: bool,
    ) -> Result<Post> {
        validation::validate_content_length(content, self.limits.max_content_length)?;
        validation::validate_tag_count(&tags, self.limits.max_tags_per_post)?;
        let tags = tags
            .iter()
            .map(|tag| validation::normalize_post_tag(tag))
            .collect::<Result<Vec<_>>>()?;

        let mut post = Post::new(content.to_string(), tags, is_private);
        let result = self.posts.insert_one(&post, None).await?;
        post.id = result.inserted_id.as_object_id();

        Ok(post)
    }

    /// Page through the public feed, newest first.
    ///
    /// Private posts are always excluded. Ties on `created_at` break on the
    /// store-assigned id so a fixed data set pages deterministically. No
    /// total count is reported; callers probe the next page with
    /// `skip += limit`.
    pub async fn list_posts(
        &self,
        skip: u64,
        limit: Option<u32>,
        tag_filter: Option<&str>,
    ) -> Result<Vec<Post>> {
        let limit = limit.unwrap_or(self.limits.default_page_size);
        validation::validate_page_params(limit, self.limits.max_page_size)?;

        let mut filter = doc! { "is_private": false };
        if let Some(tag) = tag_filter {
            let tag = validation::normalize_tag_filter(tag)?;
            filter.insert("tags", tag);
        }

        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(skip)
            .limit(i64::from(limit))
            .build();

        let cursor = self.posts.find(filter, options).await?;
        let posts = cursor.try_collect().await?;
        Ok(posts)
    }

    /// Fetch a single post by its identifier.
    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let oid = validation::parse_object_id(id)?;

        let post = self.posts.find_one(doc! { "_id": oid }, None).await?;
        post.ok_or_else(|| AppError::NotFound(format!("post {id} not found")))
    }
}
