//! Forum tag vocabulary.
//!
//! Every tag the sync layer writes or queries is built here, so the writer
//! (index maintenance) and the reader (scoped search) cannot drift apart.
//!
//! # Tag namespace
//!
//! `<kind>` is `forum_topic` or `forum_post`.
//!
//! | Tag | Purpose |
//! |-----|---------|
//! | `<kind>` | global scope |
//! | `<kind>_user_id_<uid>` | author scope |
//! | `<kind>_group_id_<gid>` | group scope |
//! | `<kind>_group_id_<gid>_user_id_<uid>` | group + author scope |
//! | `<kind>_section_id_<sid>` | section scope |
//! | `<kind>_section_id_<sid>_user_id_<uid>` | section + author scope |
//! | `<kind>_public` | visible outside private groups / hidden sections |
//! | `forum_topic_id_<tid>` | topic identity |
//! | `forum_post_id_<pid>` | post identity |
//! | `forum_post_topic_id_<tid>` | links post entries to their topic (cascade) |

use std::fmt;

use forum_search_core::{GroupId, PostId, SectionId, TopicId, UserId};
use forum_search_index::{EntityType, TagSet};

use crate::records::{ForumPost, ForumTopic, GroupInfo, SectionInfo, TopicInfo};

/// One forum tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForumTag {
    /// Every entity of a kind.
    Global(EntityType),
    /// Entities of a kind written by a user.
    User(EntityType, UserId),
    /// Entities of a kind inside a group.
    Group(EntityType, GroupId),
    /// Entities of a kind inside a group written by a user.
    GroupUser(EntityType, GroupId, UserId),
    /// Entities of a kind inside a section.
    Section(EntityType, SectionId),
    /// Entities of a kind inside a section written by a user.
    SectionUser(EntityType, SectionId, UserId),
    /// Entities of a kind visible to everyone.
    Public(EntityType),
    /// The topic's own entry.
    TopicIdentity(TopicId),
    /// A post's entries (both the post and its topic contribution).
    PostIdentity(PostId),
    /// Every post entry filed under a topic.
    PostTopic(TopicId),
}

impl fmt::Display for ForumTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global(kind) => write!(f, "{kind}"),
            Self::User(kind, user) => write!(f, "{kind}_user_id_{user}"),
            Self::Group(kind, group) => write!(f, "{kind}_group_id_{group}"),
            Self::GroupUser(kind, group, user) => {
                write!(f, "{kind}_group_id_{group}_user_id_{user}")
            }
            Self::Section(kind, section) => write!(f, "{kind}_section_id_{section}"),
            Self::SectionUser(kind, section, user) => {
                write!(f, "{kind}_section_id_{section}_user_id_{user}")
            }
            Self::Public(kind) => write!(f, "{kind}_public"),
            Self::TopicIdentity(topic) => write!(f, "forum_topic_id_{topic}"),
            Self::PostIdentity(post) => write!(f, "forum_post_id_{post}"),
            Self::PostTopic(topic) => write!(f, "forum_post_topic_id_{topic}"),
        }
    }
}

impl From<ForumTag> for String {
    fn from(tag: ForumTag) -> Self {
        tag.to_string()
    }
}

/// Build a `TagSet` from forum tags.
pub fn tag_set<I: IntoIterator<Item = ForumTag>>(tags: I) -> TagSet {
    tags.into_iter().collect()
}

/// Where a piece of content lives and who wrote it.
///
/// This is everything the scope tags depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagContext {
    /// Author.
    pub user_id: UserId,
    /// Owning group.
    pub group_id: GroupId,
    /// Section of the owning group.
    pub section_id: SectionId,
    /// Whether the content carries the public visibility tag.
    pub public: bool,
}

impl TagContext {
    /// Derive the context from resolved metadata.
    ///
    /// Content is public only when its group is not private and its section
    /// is not hidden.
    pub fn new(user_id: UserId, group: &GroupInfo, section: &SectionInfo) -> Self {
        Self {
            user_id,
            group_id: group.id,
            section_id: group.section_id,
            public: !group.is_private && !section.is_hidden,
        }
    }

    /// Scope tags for entities of `kind`.
    pub fn scope_tags(&self, kind: EntityType) -> TagSet {
        let mut tags = tag_set([
            ForumTag::Global(kind),
            ForumTag::User(kind, self.user_id),
            ForumTag::Group(kind, self.group_id),
            ForumTag::GroupUser(kind, self.group_id, self.user_id),
            ForumTag::Section(kind, self.section_id),
            ForumTag::SectionUser(kind, self.section_id, self.user_id),
        ]);
        if self.public {
            tags.insert(ForumTag::Public(kind));
        }
        tags
    }
}

/// Tags for a post's own `forum_post` entry.
pub fn post_tags(post: &ForumPost, topic: &TopicInfo, context: &TagContext) -> TagSet {
    let mut tags = context.scope_tags(EntityType::Post);
    tags.insert(ForumTag::PostTopic(topic.id));
    tags.insert(ForumTag::PostIdentity(post.id));
    tags
}

/// Tags for the `forum_topic` entry a post writes on behalf of its topic.
///
/// It carries the post's identity and the topic cascade tag, but not the
/// topic identity tag.
pub fn post_topic_tags(post: &ForumPost, topic: &TopicInfo, context: &TagContext) -> TagSet {
    let mut tags = context.scope_tags(EntityType::Topic);
    tags.insert(ForumTag::PostTopic(topic.id));
    tags.insert(ForumTag::PostIdentity(post.id));
    tags
}

/// Tags for a topic's own `forum_topic` entry.
pub fn topic_tags(topic: &ForumTopic, context: &TagContext) -> TagSet {
    let mut tags = context.scope_tags(EntityType::Topic);
    tags.insert(ForumTag::TopicIdentity(topic.id));
    tags
}

/// Tags addressing a topic's own entry and every post entry under it.
pub fn topic_family_tags(topic_id: TopicId) -> TagSet {
    tag_set([ForumTag::TopicIdentity(topic_id), ForumTag::PostTopic(topic_id)])
}

/// Tags addressing every forum entity.
pub fn all_forum_tags() -> TagSet {
    tag_set([
        ForumTag::Global(EntityType::Topic),
        ForumTag::Global(EntityType::Post),
    ])
}

// ============================================================================
// Tests
// ============================================================================
