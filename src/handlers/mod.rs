/// HTTP handlers for the Unlinked API
///
/// This module contains handlers for:
/// - Posts: create, paginated public feed, lookup by id
/// - Reactions: create, per-post counts
/// - Health: liveness of the API and its backing database
pub mod health;
pub mod posts;
pub mod reactions;

// Re-export handler functions at module level
pub use health::health_check;
pub use posts::{create_post, get_post, list_posts};
pub use reactions::{create_reaction, get_reaction_counts};
