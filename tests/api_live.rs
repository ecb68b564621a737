//! Live-database integration suite.
//!
//! These tests exercise the services against a real MongoDB instance and are
//! ignored by default. Point `MONGODB_URI` at a running server (defaults to
//! `mongodb://localhost:27017`) and run:
//!
//! ```sh
//! cargo test -- --ignored
//! ```
//!
//! Every test provisions its own throwaway database and drops it afterwards.

use mongodb::bson::oid::ObjectId;
use unlinked_api::config::{AppConfig, Config, CorsConfig, DatabaseConfig, LimitsConfig};
use unlinked_api::db::{schema, DocumentStore};
use unlinked_api::models::ReactionType;
use unlinked_api::services::{PostService, ReactionService};
use unlinked_api::AppError;

fn test_config() -> Config {
    Config {
        app: AppConfig {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            trusted_hosts: vec!["*".to_string()],
        },
        cors: CorsConfig {
            allowed_origins: "*".to_string(),
        },
        database: DatabaseConfig {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            name: format!("unlinked_test_{}", ObjectId::new().to_hex()),
            max_pool_size: 10,
            min_pool_size: 1,
            max_idle_time_ms: 30_000,
            server_selection_timeout_ms: 5_000,
            connect_timeout_ms: 10_000,
            operation_timeout_ms: 5_000,
        },
        limits: LimitsConfig::default(),
    }
}

async fn connect() -> DocumentStore {
    DocumentStore::connect(&test_config())
        .await
        .expect("test MongoDB must be reachable")
}

async fn teardown(store: &DocumentStore) {
    store.database().drop(None).await.ok();
    store.disconnect().await;
}

#[tokio::test]
#[ignore]
async fn create_then_get_round_trips() {
    let store = connect().await;
    let service = PostService::new(&store, LimitsConfig::default());

    let created = service
        .create_post(
            "third interview this week, running on fumes",
            vec!["Interviews ".to_string(), "BURNOUT".to_string()],
            false,
        )
        .await
        .unwrap();

    let id = created.id.expect("store assigns an id").to_hex();
    let fetched = service.get_post(&id).await.unwrap();

    assert_eq!(fetched.content, "third interview this week, running on fumes");
    assert_eq!(fetched.tags, vec!["interviews", "burnout"]);
    assert!(!fetched.is_private);
    assert!(!fetched.is_flagged);
    assert_eq!(fetched.reaction_counts.same, 0);
    assert_eq!(fetched.reaction_counts.helpful, 0);
    assert_eq!(fetched.reaction_counts.upvote, 0);

    teardown(&store).await;
}

#[tokio::test]
#[ignore]
async fn feed_is_newest_first_and_pages_are_disjoint() {
    let store = connect().await;
    let service = PostService::new(&store, LimitsConfig::default());

    for i in 0..5 {
        service
            .create_post(&format!("post number {i}"), vec![], false)
            .await
            .unwrap();
    }

    let full = service.list_posts(0, Some(10), None).await.unwrap();
    assert_eq!(full.len(), 5);
    for pair in full.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let first = service.list_posts(0, Some(2), None).await.unwrap();
    let second = service.list_posts(2, Some(2), None).await.unwrap();
    let third = service.list_posts(4, Some(2), None).await.unwrap();

    let paged: Vec<_> = first
        .iter()
        .chain(&second)
        .chain(&third)
        .map(|p| p.id.unwrap())
        .collect();
    let expected: Vec<_> = full.iter().map(|p| p.id.unwrap()).collect();
    assert_eq!(paged, expected);

    teardown(&store).await;
}

#[tokio::test]
#[ignore]
async fn private_posts_never_appear_in_the_feed() {
    let store = connect().await;
    let service = PostService::new(&store, LimitsConfig::default());

    service
        .create_post("public thoughts", vec!["career".to_string()], false)
        .await
        .unwrap();
    let private = service
        .create_post("private journaling", vec!["career".to_string()], true)
        .await
        .unwrap();

    let feed = service.list_posts(0, Some(10), None).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert!(feed.iter().all(|p| p.id != private.id));

    let filtered = service.list_posts(0, Some(10), Some("career")).await.unwrap();
    assert_eq!(filtered.len(), 1);

    // The private post is still reachable directly by id.
    let direct = service
        .get_post(&private.id.unwrap().to_hex())
        .await
        .unwrap();
    assert!(direct.is_private);

    teardown(&store).await;
}

#[tokio::test]
#[ignore]
async fn tag_filter_is_case_insensitive_and_trimmed() {
    let store = connect().await;
    let service = PostService::new(&store, LimitsConfig::default());

    service
        .create_post("burned out again", vec!["burnout".to_string()], false)
        .await
        .unwrap();
    service
        .create_post("unrelated", vec!["mentorship".to_string()], false)
        .await
        .unwrap();

    let exact = service.list_posts(0, Some(10), Some("burnout")).await.unwrap();
    let cased = service.list_posts(0, Some(10), Some("Burnout")).await.unwrap();
    let padded = service
        .list_posts(0, Some(10), Some("  burnout "))
        .await
        .unwrap();

    assert_eq!(exact.len(), 1);
    let ids: Vec<_> = exact.iter().map(|p| p.id).collect();
    assert_eq!(cased.iter().map(|p| p.id).collect::<Vec<_>>(), ids);
    assert_eq!(padded.iter().map(|p| p.id).collect::<Vec<_>>(), ids);

    teardown(&store).await;
}

#[tokio::test]
#[ignore]
async fn lookup_distinguishes_malformed_and_unknown_ids() {
    let store = connect().await;
    let service = PostService::new(&store, LimitsConfig::default());

    let malformed = service.get_post("not-an-id").await.unwrap_err();
    assert!(matches!(malformed, AppError::Validation(_)));

    let absent = ObjectId::new().to_hex();
    let unknown = service.get_post(&absent).await.unwrap_err();
    assert!(matches!(unknown, AppError::NotFound(_)));

    teardown(&store).await;
}

#[tokio::test]
#[ignore]
async fn reactions_are_created_and_counted_per_type() {
    let store = connect().await;
    let posts = PostService::new(&store, LimitsConfig::default());
    let reactions = ReactionService::new(&store);

    let post = posts
        .create_post("press the button", vec![], false)
        .await
        .unwrap();
    let post_id = post.id.unwrap().to_hex();

    reactions
        .create_reaction(&post_id, ReactionType::Upvote)
        .await
        .unwrap();
    reactions
        .create_reaction(&post_id, ReactionType::Upvote)
        .await
        .unwrap();
    reactions
        .create_reaction(&post_id, ReactionType::Helpful)
        .await
        .unwrap();

    let counts = reactions.count_reactions(&post_id).await.unwrap();
    assert_eq!(counts.same, 0);
    assert_eq!(counts.helpful, 1);
    assert_eq!(counts.upvote, 2);

    // Weak reference: reacting to a well-formed but absent post id succeeds.
    let orphan = ObjectId::new().to_hex();
    let reaction = reactions
        .create_reaction(&orphan, ReactionType::Same)
        .await
        .unwrap();
    assert!(reaction.id.is_some());

    let malformed = reactions.count_reactions("nope").await.unwrap_err();
    assert!(matches!(malformed, AppError::Validation(_)));

    teardown(&store).await;
}

#[tokio::test]
#[ignore]
async fn schema_provisioning_is_idempotent() {
    let store = connect().await;

    let first = schema::ensure_indexes(&store).await;
    assert!(first.is_clean(), "first run failed: {:?}", first.failed);

    let second = schema::ensure_indexes(&store).await;
    assert!(second.is_clean(), "re-run failed: {:?}", second.failed);
    assert_eq!(first.ensured.len(), second.ensured.len());

    teardown(&store).await;
}
