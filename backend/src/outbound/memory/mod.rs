//! Process-local content store.
//!
//! [`InMemoryBlogStore`] implements every driven repository port over a single
//! mutex-guarded state. The server uses it when no database is configured and
//! the HTTP integration tests use it as a deterministic double. It mirrors the
//! relational rules of the PostgreSQL schema: unique slugs and usernames,
//! unique follow edges and newest-first post ordering.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, FIXTURE_USER_ID, FIXTURE_USERNAME,
    FollowPersistenceError, FollowRepository, GroupPersistenceError, GroupRepository,
    PostPersistenceError, PostRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, FeedScope, Group, GroupId, GroupSlug, ImagePath, NewGroup, Post, PostDraft, PostId,
    PostText, User, UserId, Username,
};

#[derive(Debug, Clone)]
struct PostRecord {
    id: PostId,
    text: PostText,
    pub_date: DateTime<Utc>,
    author: UserId,
    group: Option<GroupId>,
    image: Option<ImagePath>,
}

#[derive(Debug, Clone)]
struct CommentRecord {
    id: i64,
    post: PostId,
    author: UserId,
    text: PostText,
    created: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    groups: Vec<Group>,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    follows: BTreeSet<(String, String)>,
    last_post_id: i64,
    last_group_id: i64,
    last_comment_id: i64,
}

impl StoreState {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id() == id)
    }

    fn follows(&self, follower: &UserId, author: &UserId) -> bool {
        self.follows
            .contains(&(follower.to_string(), author.to_string()))
    }

    fn in_scope(&self, record: &PostRecord, scope: &FeedScope) -> bool {
        match scope {
            FeedScope::All => true,
            FeedScope::Group(group) => record.group == Some(*group),
            FeedScope::Author(author) => &record.author == author,
            FeedScope::FollowedBy(follower) => self.follows(follower, &record.author),
        }
    }

    fn hydrate(&self, record: &PostRecord) -> Result<Post, PostPersistenceError> {
        let author = self.user(&record.author).cloned().ok_or_else(|| {
            PostPersistenceError::query(format!("post {} references a missing author", record.id))
        })?;
        Ok(Post {
            id: record.id,
            text: record.text.clone(),
            pub_date: record.pub_date,
            author,
            group: record.group.and_then(|id| self.group(id).cloned()),
            image: record.image.clone(),
        })
    }

    fn scoped_newest_first(&self, scope: &FeedScope) -> Vec<&PostRecord> {
        let mut selected: Vec<&PostRecord> = self
            .posts
            .iter()
            .filter(|record| self.in_scope(record, scope))
            .collect();
        selected.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        selected
    }
}

/// In-memory implementation of the content and subscription ports.
#[derive(Clone)]
pub struct InMemoryBlogStore {
    state: Arc<Mutex<StoreState>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryBlogStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            clock,
        }
    }

    /// Create a store seeded with the fixture login account.
    ///
    /// The account matches [`crate::domain::ports::FixtureLoginService`], so a
    /// database-less server can log in and publish.
    pub fn with_fixture_user() -> Self {
        let store = Self::default();
        if let (Ok(id), Ok(username)) = (
            UserId::new(FIXTURE_USER_ID),
            Username::new(FIXTURE_USERNAME),
        ) {
            store.add_user(User::new(id, username));
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user. An existing user with the same id or username is replaced.
    pub fn add_user(&self, user: User) {
        let mut state = self.lock();
        state
            .users
            .retain(|existing| existing.id() != user.id() && existing.username() != user.username());
        state.users.push(user);
    }

    /// Number of stored posts.
    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }

    /// Number of stored follow edges.
    pub fn follow_count(&self) -> usize {
        self.lock().follows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }
}

#[async_trait]
impl GroupRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>, GroupPersistenceError> {
        Ok(self
            .lock()
            .groups
            .iter()
            .find(|group| group.slug() == slug)
            .cloned())
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupPersistenceError> {
        Ok(self.lock().group(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupPersistenceError> {
        let mut groups = self.lock().groups.clone();
        groups.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        Ok(groups)
    }

    async fn create(&self, group: &NewGroup) -> Result<Group, GroupPersistenceError> {
        let mut state = self.lock();
        if state.groups.iter().any(|existing| existing.slug() == group.slug()) {
            return Err(GroupPersistenceError::duplicate_slug(group.slug().as_ref()));
        }
        state.last_group_id += 1;
        let stored = Group::new(GroupId::new(state.last_group_id), group.clone());
        state.groups.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn count(&self, scope: &FeedScope) -> Result<u64, PostPersistenceError> {
        let state = self.lock();
        let count = state
            .posts
            .iter()
            .filter(|record| state.in_scope(record, scope))
            .count();
        u64::try_from(count).map_err(|err| PostPersistenceError::query(err.to_string()))
    }

    async fn list(
        &self,
        scope: &FeedScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let state = self.lock();
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        state
            .scoped_newest_first(scope)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| state.hydrate(record))
            .collect()
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let state = self.lock();
        state
            .posts
            .iter()
            .find(|record| record.id == id)
            .map(|record| state.hydrate(record))
            .transpose()
    }

    async fn create(
        &self,
        author: &UserId,
        draft: &PostDraft,
    ) -> Result<Post, PostPersistenceError> {
        let pub_date = self.clock.utc();
        let mut state = self.lock();
        if state.user(author).is_none() {
            return Err(PostPersistenceError::query(format!(
                "author {author} does not exist"
            )));
        }
        state.last_post_id += 1;
        let record = PostRecord {
            id: PostId::new(state.last_post_id),
            text: draft.text().clone(),
            pub_date,
            author: author.clone(),
            group: draft.group(),
            image: draft.image().cloned(),
        };
        let post = state.hydrate(&record)?;
        state.posts.push(record);
        Ok(post)
    }

    async fn update(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut state = self.lock();
        let Some(record) = state.posts.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };
        record.text = draft.text().clone();
        record.group = draft.group();
        record.image = draft.image().cloned();
        let updated = record.clone();
        state.hydrate(&updated).map(Some)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, CommentPersistenceError> {
        let state = self.lock();
        let mut records: Vec<&CommentRecord> = state
            .comments
            .iter()
            .filter(|record| record.post == post)
            .collect();
        records.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        records
            .into_iter()
            .map(|record| {
                let author = state.user(&record.author).cloned().ok_or_else(|| {
                    CommentPersistenceError::query(format!(
                        "comment {} references a missing author",
                        record.id
                    ))
                })?;
                Ok(Comment {
                    id: record.id,
                    post_id: record.post,
                    author,
                    text: record.text.clone(),
                    created: record.created,
                })
            })
            .collect()
    }

    async fn create(
        &self,
        post: PostId,
        author: &UserId,
        text: &PostText,
    ) -> Result<Comment, CommentPersistenceError> {
        let created = self.clock.utc();
        let mut state = self.lock();
        let commenter = state.user(author).cloned().ok_or_else(|| {
            CommentPersistenceError::query(format!("author {author} does not exist"))
        })?;
        if !state.posts.iter().any(|record| record.id == post) {
            return Err(CommentPersistenceError::query(format!(
                "post {post} does not exist"
            )));
        }
        state.last_comment_id += 1;
        let record = CommentRecord {
            id: state.last_comment_id,
            post,
            author: author.clone(),
            text: text.clone(),
            created,
        };
        state.comments.push(record.clone());
        Ok(Comment {
            id: record.id,
            post_id: post,
            author: commenter,
            text: record.text,
            created,
        })
    }
}

#[async_trait]
impl FollowRepository for InMemoryBlogStore {
    async fn exists(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowPersistenceError> {
        Ok(self.lock().follows(follower, author))
    }

    async fn insert_if_absent(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowPersistenceError> {
        Ok(self
            .lock()
            .follows
            .insert((follower.to_string(), author.to_string())))
    }

    async fn delete(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowPersistenceError> {
        Ok(self
            .lock()
            .follows
            .remove(&(follower.to_string(), author.to_string())))
    }
}

#[cfg(test)]
mod tests;
