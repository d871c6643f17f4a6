//! Full re-index of forum content.

use forum_search_core::Result;
use serde::{Deserialize, Serialize};

use crate::records::{ForumPost, ForumTopic};
use crate::sync::ForumSearchSync;

/// Outcome of [`ForumSearchSync::rebuild`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildStats {
    /// Topics written to the index.
    pub topics_indexed: usize,
    /// Posts written to the index.
    pub posts_indexed: usize,
    /// Topics and posts skipped because their metadata was missing.
    pub skipped: usize,
}

impl RebuildStats {
    /// Total content items seen.
    pub fn total(&self) -> usize {
        self.topics_indexed + self.posts_indexed + self.skipped
    }
}

impl ForumSearchSync {
    /// Purge every forum entry and index `topics` and `posts` from scratch.
    ///
    /// Topics are written first, then posts, so a topic entry ends up
    /// carrying the text of the last post indexed for it. A topic whose
    /// moderation state is not approved is deactivated after it is written.
    /// Items whose topic, group or section cannot be resolved are skipped
    /// and counted.
    ///
    /// # Errors
    ///
    /// Index and lookup failures abort the rebuild and leave the index
    /// partially populated.
    pub async fn rebuild(&self, topics: &[ForumTopic], posts: &[ForumPost]) -> Result<RebuildStats> {
        log::info!(
            "Rebuilding forum index: {} topics, {} posts",
            topics.len(),
            posts.len()
        );
        self.purge_all().await?;

        let mut stats = RebuildStats::default();

        for topic in topics {
            match self.index_topic(topic).await {
                Ok(()) => stats.topics_indexed += 1,
                Err(e) if e.is_not_found() => {
                    log::warn!("Skipping topic {}: {e}", topic.id);
                    stats.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        for post in posts {
            match self.upsert_post(post).await {
                Ok(()) => stats.posts_indexed += 1,
                Err(e) if e.is_not_found() => {
                    log::warn!("Skipping post {}: {e}", post.id);
                    stats.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Rebuilt forum index: {} topics, {} posts, {} skipped",
            stats.topics_indexed,
            stats.posts_indexed,
            stats.skipped
        );
        Ok(stats)
    }

    async fn index_topic(&self, topic: &ForumTopic) -> Result<()> {
        let info = self.resolve_topic(topic.id).await?;
        self.add_topic(topic).await?;
        if !info.status.is_approved() {
            self.set_topic_status(topic.id, false).await?;
        }
        Ok(())
    }
}
