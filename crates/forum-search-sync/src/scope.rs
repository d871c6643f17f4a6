//! Search scopes.
//!
//! A scope narrows a forum search to one slice of the tag vocabulary the
//! sync layer writes. Each scope resolves to exactly one tag, so searching a
//! scope returns precisely the entities that were tagged for it.

use forum_search_core::{GroupId, SectionId, TopicId, UserId};
use forum_search_index::EntityType;

use crate::tags::ForumTag;

/// Which slice of forum content to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchScope {
    /// Every entity of the searched kind.
    Global,
    /// Content outside private groups and hidden sections.
    #[default]
    Public,
    /// Content written by one user.
    User(UserId),
    /// Content inside a group.
    Group(GroupId),
    /// Content written by a user inside a group.
    GroupUser(GroupId, UserId),
    /// Content inside a section.
    Section(SectionId),
    /// Content written by a user inside a section.
    SectionUser(SectionId, UserId),
    /// Post entries filed under a topic.
    Topic(TopicId),
}

impl SearchScope {
    /// The tag an entity of `kind` must carry to be in this scope.
    pub fn tag(self, kind: EntityType) -> ForumTag {
        match self {
            Self::Global => ForumTag::Global(kind),
            Self::Public => ForumTag::Public(kind),
            Self::User(user) => ForumTag::User(kind, user),
            Self::Group(group) => ForumTag::Group(kind, group),
            Self::GroupUser(group, user) => ForumTag::GroupUser(kind, group, user),
            Self::Section(section) => ForumTag::Section(kind, section),
            Self::SectionUser(section, user) => ForumTag::SectionUser(kind, section, user),
            Self::Topic(topic) => ForumTag::PostTopic(topic),
        }
    }
}
