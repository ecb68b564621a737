/// Development fixture data.
///
/// Loaded via the `seed-data` subcommand. Posts are stored with zeroed
/// reaction counts; the matching reaction documents are inserted separately
/// so the read-side tallies reflect real data. Tag usage counts are derived
/// from the seeded posts.
use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::DocumentStore;
use crate::error::Result;
use crate::models::{Post, Reaction, ReactionType, Tag};

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub posts: usize,
    pub reactions: usize,
    pub tags: usize,
}

pub async fn run(store: &DocumentStore) -> Result<SeedSummary> {
    let posts = store.posts();
    let reactions = store.reactions();
    let tags = store.tags();

    let now = Utc::now();
    let mut summary = SeedSummary::default();

    let mut inserted = Vec::new();
    for mut post in sample_posts(now) {
        let result = posts.insert_one(&post, None).await?;
        post.id = result.inserted_id.as_object_id();
        let preview: String = post.content.chars().take(50).collect();
        debug!(content = %preview, "seeded post");
        inserted.push(post);
    }
    summary.posts = inserted.len();

    // A handful of reactions of every type on the most recent posts.
    let mut reaction_docs = Vec::new();
    for post in inserted.iter().take(4) {
        let Some(post_id) = post.id else { continue };
        for reaction_type in ReactionType::ALL {
            for i in 0..3i64 {
                let mut reaction = Reaction::new(post_id, reaction_type);
                reaction.created_at = now - Duration::minutes(i * 10);
                reaction_docs.push(reaction);
            }
        }
    }
    if !reaction_docs.is_empty() {
        reactions.insert_many(&reaction_docs, None).await?;
    }
    summary.reactions = reaction_docs.len();

    let mut usage: BTreeMap<String, i64> = BTreeMap::new();
    for post in &inserted {
        for tag in &post.tags {
            *usage.entry(tag.clone()).or_default() += 1;
        }
    }
    for (name, usage_count) in usage {
        let tag = Tag {
            id: None,
            name,
            usage_count,
        };
        // The unique index on name makes re-runs collide; that is fine.
        match tags.insert_one(&tag, None).await {
            Ok(_) => summary.tags += 1,
            Err(e) => debug!(tag = %tag.name, error = %e, "tag already present, skipping"),
        }
    }

    info!(
        posts = summary.posts,
        reactions = summary.reactions,
        tags = summary.tags,
        "sample data loaded"
    );
    Ok(summary)
}

fn sample_posts(now: DateTime<Utc>) -> Vec<Post> {
    let entries: [(&str, &[&str], i64); 6] = [
        (
            "Just had my third interview this week and I'm exhausted. Why do companies \
             make you jump through so many hoops just to get a job?",
            &["interviews", "burnout", "jobsearch"],
            2,
        ),
        (
            "Finally got promoted after 2 years! But now I'm terrified I'm not good \
             enough for the new role. Anyone else feel like this?",
            &["promotion", "impostersyndrome", "career"],
            5,
        ),
        (
            "My manager just told me to 'be more positive' when I raised concerns about \
             workload. I'm already working 60+ hours a week. What am I supposed to do?",
            &["management", "workload", "burnout"],
            8,
        ),
        (
            "Quit my toxic job today. Scared but relieved. Sometimes you just need to \
             prioritize your mental health over a paycheck.",
            &["quitting", "mentalhealth", "career"],
            12,
        ),
        (
            "Had a great conversation with my mentor today. Sometimes you just need \
             someone to remind you that you're doing better than you think.",
            &["mentorship", "career", "growth"],
            15,
        ),
        (
            "Why do job descriptions ask for 5+ years of experience for entry-level \
             positions? How are we supposed to get experience if no one will hire us?",
            &["jobsearch", "entrylevel", "frustration"],
            18,
        ),
    ];

    entries
        .iter()
        .map(|(content, tags, hours_ago)| {
            let mut post = Post::new(
                content.to_string(),
                tags.iter().map(|t| t.to_string()).collect(),
                false,
            );
            post.created_at = now - Duration::hours(*hours_ago);
            post
        })
        .collect()
}
