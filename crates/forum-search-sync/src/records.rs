//! Forum records consumed by the sync layer.
//!
//! `ForumPost` and `ForumTopic` are the content items handed in by the
//! surrounding content workflow. `TopicInfo`, `GroupInfo` and `SectionInfo`
//! are the metadata resolved through a
//! [`ForumMetadataLookup`](crate::lookup::ForumMetadataLookup).

use std::fmt;

use forum_search_core::{GroupId, PostId, SectionId, TopicId, UserId};
use serde::{Deserialize, Serialize};

/// A post inside a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    /// Post identifier.
    pub id: PostId,
    /// Topic the post belongs to.
    pub topic_id: TopicId,
    /// Author.
    pub user_id: UserId,
    /// Post body.
    pub text: String,
    /// Creation time, seconds since the Unix epoch.
    pub create_stamp: i64,
}

/// A topic inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumTopic {
    /// Topic identifier.
    pub id: TopicId,
    /// Group the topic belongs to.
    pub group_id: GroupId,
    /// Author.
    pub user_id: UserId,
    /// Topic title; this is what gets indexed for the topic itself.
    pub title: String,
}

/// Moderation state of a topic.
///
/// Defaults to [`ModerationStatus::AwaitingApproval`] so that content of
/// unknown standing is indexed inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum ModerationStatus {
    /// Visible to everyone.
    #[serde(rename = "approved")]
    Approved,
    /// Waiting for a moderator.
    #[default]
    #[serde(rename = "approval")]
    AwaitingApproval,
}

impl ModerationStatus {
    /// True for [`ModerationStatus::Approved`].
    pub fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::AwaitingApproval => write!(f, "approval"),
        }
    }
}

/// Resolved topic metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInfo {
    /// Topic identifier.
    pub id: TopicId,
    /// Owning group.
    pub group_id: GroupId,
    /// Current moderation state.
    pub status: ModerationStatus,
}

/// Resolved group metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Group identifier.
    pub id: GroupId,
    /// Owning section.
    pub section_id: SectionId,
    /// Private groups are never tagged public.
    #[serde(default)]
    pub is_private: bool,
}

/// Resolved section metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Section identifier.
    pub id: SectionId,
    /// Hidden sections are never tagged public.
    #[serde(default)]
    pub is_hidden: bool,
}
