/// Reaction service - creation and read-side count aggregation.
use mongodb::{bson::doc, Collection};

use crate::db::DocumentStore;
use crate::error::Result;
use crate::models::{Reaction, ReactionCounts, ReactionType};
use crate::validation;

#[derive(Clone)]
pub struct ReactionService {
    reactions: Collection<Reaction>,
}

impl ReactionService {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            reactions: store.reactions(),
        }
    }

    /// Persist a reaction against a post.
    ///
    /// The referenced post is not checked for existence: reactions are weak
    /// references and the store never cascades.
    pub async fn create_reaction(
        &self,
        post_id: &str,
        reaction_type: ReactionType,
    ) -> Result<Reaction> {
        let oid = validation::parse_object_id(post_id)?;

        let mut reaction = Reaction::new(oid, reaction_type);
        let result = self.reactions.insert_one(&reaction, None).await?;
        reaction.id = result.inserted_id.as_object_id();

        Ok(reaction)
    }

    /// Tally reactions per type for one post.
    ///
    /// Counts come from the reactions collection via the compound
    /// `(post_id, reaction_type)` index; the snapshot embedded in the post
    /// document is not consulted.
    pub async fn count_reactions(&self, post_id: &str) -> Result<ReactionCounts> {
        let oid = validation::parse_object_id(post_id)?;

        let mut counts = ReactionCounts::default();
        for reaction_type in ReactionType::ALL {
            let filter = doc! { "post_id": oid, "reaction_type": reaction_type.as_str() };
            let count = self.reactions.count_documents(filter, None).await? as i64;
            match reaction_type {
                ReactionType::Same => counts.same = count,
                ReactionType::Helpful => counts.helpful = count,
                ReactionType::Upvote => counts.upvote = count,
            }
        }

        Ok(counts)
    }
}
