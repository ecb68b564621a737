/// Idempotent collection and index provisioning.
///
/// Run once at provisioning time via the `schema-setup` subcommand, never on
/// the request path. Creating an index that already exists with the same
/// definition is a no-op on the server side; a conflicting definition under
/// the same name is logged and recorded in the report while the remaining
/// indexes are still attempted.
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use tracing::{error, info};

use super::{DocumentStore, FLAGS, POSTS, REACTIONS, TAGS};

/// Outcome of a provisioning run.
#[derive(Debug, Default)]
pub struct SchemaReport {
    pub ensured: Vec<String>,
    pub failed: Vec<String>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Declare the four collections and their indexes.
pub async fn ensure_indexes(store: &DocumentStore) -> SchemaReport {
    info!("ensuring collections and indexes");
    let mut report = SchemaReport::default();

    ensure(store.collection(POSTS), post_indexes(), &mut report).await;
    ensure(store.collection(REACTIONS), reaction_indexes(), &mut report).await;
    ensure(store.collection(FLAGS), flag_indexes(), &mut report).await;
    ensure(store.collection(TAGS), tag_indexes(), &mut report).await;

    info!(
        ensured = report.ensured.len(),
        failed = report.failed.len(),
        "schema provisioning finished"
    );
    report
}

fn post_indexes() -> Vec<IndexModel> {
    vec![
        // Chronological feed ordering
        named_index(doc! { "created_at": -1 }, "posts_created_at_desc"),
        // Tag equality filter
        named_index(doc! { "tags": 1 }, "posts_tags"),
        // Moderation queries
        named_index(doc! { "is_flagged": 1 }, "posts_is_flagged"),
        // Public-feed exclusion
        named_index(doc! { "is_private": 1 }, "posts_is_private"),
    ]
}

fn reaction_indexes() -> Vec<IndexModel> {
    vec![
        named_index(doc! { "post_id": 1 }, "reactions_post_id"),
        named_index(doc! { "reaction_type": 1 }, "reactions_reaction_type"),
        // Count aggregation per post and type
        named_index(
            doc! { "post_id": 1, "reaction_type": 1 },
            "reactions_post_id_reaction_type",
        ),
    ]
}

fn flag_indexes() -> Vec<IndexModel> {
    vec![
        named_index(doc! { "post_id": 1 }, "flags_post_id"),
        named_index(doc! { "created_at": -1 }, "flags_created_at_desc"),
        named_index(doc! { "status": 1 }, "flags_status"),
    ]
}

fn tag_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name("tags_name_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build(),
        named_index(doc! { "usage_count": -1 }, "tags_usage_count_desc"),
    ]
}

fn named_index(keys: Document, name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(name.to_string()).build())
        .build()
}

async fn ensure(
    collection: Collection<Document>,
    models: Vec<IndexModel>,
    report: &mut SchemaReport,
) {
    for model in models {
        let name = model
            .options
            .as_ref()
            .and_then(|o| o.name.clone())
            .unwrap_or_else(|| "unnamed".to_string());
        let label = format!("{}.{}", collection.name(), name);

        match collection.create_index(model, None).await {
            Ok(_) => {
                info!(index = %label, "index ensured");
                report.ensured.push(label);
            }
            Err(e) => {
                error!(index = %label, error = %e, "index creation failed");
                report.failed.push(label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_carries_a_stable_name() {
        let all = post_indexes()
            .into_iter()
            .chain(reaction_indexes())
            .chain(flag_indexes())
            .chain(tag_indexes());

        for model in all {
            let name = model.options.as_ref().and_then(|o| o.name.clone());
            assert!(name.is_some_and(|n| !n.is_empty()));
        }
    }

    #[test]
    fn tag_name_index_is_unique() {
        let unique = tag_indexes()
            .into_iter()
            .find(|m| {
                m.options
                    .as_ref()
                    .and_then(|o| o.name.as_deref())
                    .is_some_and(|n| n == "tags_name_unique")
            })
            .and_then(|m| m.options.and_then(|o| o.unique));
        assert_eq!(unique, Some(true));
    }

    #[test]
    fn reaction_compound_index_covers_post_and_type() {
        let compound = reaction_indexes()
            .into_iter()
            .find(|m| m.keys.len() == 2)
            .expect("compound index present");
        assert!(compound.keys.contains_key("post_id"));
        assert!(compound.keys.contains_key("reaction_type"));
    }
}
