/// Business logic layer
///
/// This module provides the high-level operations behind the HTTP surface:
/// - Post service: creation, feed listing, lookup by id
/// - Reaction service: creation and read-side count aggregation
pub mod posts;
pub mod reactions;

pub use posts::PostService;
pub use reactions::ReactionService;
