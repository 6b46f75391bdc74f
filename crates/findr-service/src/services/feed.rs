//! Status feed screen
//!
//! Keeps the local post list in step with the live feed and sends every
//! mutation to the store. Nothing is applied optimistically: the list only
//! changes when the feed redelivers.

use std::future;

use tracing::{debug, error, info, instrument, warn};

use findr_core::{
    Comment, DocumentId, DomainError, NonEmptyText, ReactionKind, RepoResult, StatusPost,
    Subscription,
};

use crate::shell::HomeTab;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::slot::SubscriptionSlot;

/// What the composer saves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerMode {
    Create,
    Edit(DocumentId),
}

/// Create/edit modal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    pub visible: bool,
    pub mode: ComposerMode,
    pub draft: String,
}

impl Composer {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            visible: false,
            mode: ComposerMode::Create,
            draft: String::new(),
        }
    }
}

/// What a live delivery did to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    /// The post list was replaced
    Posts { count: usize },
    /// The feed listener failed; the last list is kept
    FeedFailed(DomainError),
    /// The feed listener stopped delivering
    FeedClosed,
    /// The open thread's comment list was replaced
    Comments { status_id: DocumentId, count: usize },
    CommentsFailed {
        status_id: DocumentId,
        error: DomainError,
    },
    ThreadClosed { status_id: DocumentId },
}

enum Delivery {
    Feed(Option<RepoResult<Vec<StatusPost>>>),
    Thread(DocumentId, Option<RepoResult<Vec<Comment>>>),
}

/// Feed screen state
pub struct FeedScreen {
    ctx: ServiceContext,
    feed: Option<Subscription<Vec<StatusPost>>>,
    loading: bool,
    posts: Vec<StatusPost>,
    composer: Composer,
    menu: Option<DocumentId>,
    thread: SubscriptionSlot<DocumentId, Vec<Comment>>,
    comments: Vec<Comment>,
    comment_draft: String,
}

impl FeedScreen {
    /// Mount the screen and open the live feed
    pub fn mount(ctx: ServiceContext) -> Self {
        let feed = ctx.status_repo().watch_feed();
        debug!("Feed screen mounted");
        Self {
            ctx,
            feed: Some(feed),
            loading: true,
            posts: Vec::new(),
            composer: Composer::default(),
            menu: None,
            thread: SubscriptionSlot::new(),
            comments: Vec::new(),
            comment_draft: String::new(),
        }
    }

    /// Release the feed and any open thread
    pub fn unmount(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.unsubscribe();
        }
        self.thread.clear();
        debug!("Feed screen unmounted");
    }

    // === State ===

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Posts, newest first
    pub fn posts(&self) -> &[StatusPost] {
        &self.posts
    }

    pub fn post(&self, id: DocumentId) -> Option<&StatusPost> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// No posts to show ("No statuses yet")
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn is_subscribed(&self) -> bool {
        self.feed.is_some()
    }

    /// Count shown on a reaction button; missing kinds read as zero
    pub fn reaction_count(post: &StatusPost, kind: ReactionKind) -> i64 {
        post.reaction_count(kind)
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Post whose context menu is open
    pub fn open_menu(&self) -> Option<DocumentId> {
        self.menu
    }

    /// Post whose comment thread is open
    pub fn active_thread(&self) -> Option<DocumentId> {
        self.thread.key()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    // === Composer ===

    pub fn open_composer(&mut self) {
        self.composer = Composer {
            visible: true,
            ..Composer::default()
        };
        self.menu = None;
    }

    pub fn open_editor(&mut self, post: &StatusPost) {
        self.composer = Composer {
            visible: true,
            mode: ComposerMode::Edit(post.id),
            draft: post.text.clone(),
        };
        self.menu = None;
    }

    pub fn close_composer(&mut self) {
        self.composer.reset();
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.composer.draft = text.into();
    }

    /// Create or edit from the composer; it closes only after a write
    /// went through
    pub async fn save_draft(&mut self) -> ServiceResult<bool> {
        let draft = self.composer.draft.clone();
        let saved = match self.composer.mode {
            ComposerMode::Create => self.create_post(&draft).await?.is_some(),
            ComposerMode::Edit(id) => self.edit_post(id, &draft).await?,
        };
        if saved {
            self.composer.reset();
        }
        Ok(saved)
    }

    // === Posts ===

    /// Add a post; blank text is ignored without a write
    #[instrument(skip(self, text))]
    pub async fn create_post(&mut self, text: &str) -> ServiceResult<Option<DocumentId>> {
        let Some(text) = non_blank(text) else {
            debug!("Ignoring blank post");
            return Ok(None);
        };

        match self.ctx.status_repo().create(&text).await {
            Ok(id) => {
                info!(id = %id, "Post created");
                Ok(Some(id))
            }
            Err(e) => Err(self.report("Error saving status", e)),
        }
    }

    /// Overwrite a post's text; blank text is ignored without a write
    #[instrument(skip(self, text))]
    pub async fn edit_post(&mut self, id: DocumentId, text: &str) -> ServiceResult<bool> {
        let Some(text) = non_blank(text) else {
            debug!("Ignoring blank edit");
            return Ok(false);
        };

        match self.ctx.status_repo().update_text(id, &text).await {
            Ok(()) => {
                info!(id = %id, "Post edited");
                Ok(true)
            }
            Err(e) => Err(self.report("Error saving status", e)),
        }
    }

    /// Delete a post and drop the menu or thread that pointed at it
    #[instrument(skip(self))]
    pub async fn delete_post(&mut self, id: DocumentId) -> ServiceResult<()> {
        if let Err(e) = self.ctx.status_repo().delete(id).await {
            return Err(self.report("Error deleting status", e));
        }

        if self.thread.is_watching(id) {
            self.thread.clear();
            self.comments.clear();
        }
        if self.menu == Some(id) {
            self.menu = None;
        }
        info!(id = %id, "Post deleted");
        Ok(())
    }

    /// Add one to a reaction count
    #[instrument(skip(self))]
    pub async fn react(&mut self, id: DocumentId, kind: ReactionKind) -> ServiceResult<()> {
        self.ctx
            .status_repo()
            .increment_reaction(id, kind)
            .await
            .map_err(|e| self.report("Error reacting to status", e))
    }

    /// Open the menu for `id`, or close it if it is already open
    pub fn toggle_menu(&mut self, id: DocumentId) {
        self.menu = if self.menu == Some(id) { None } else { Some(id) };
    }

    // === Comments ===

    /// Open the thread for `id`, or close it if it is already open. The
    /// comment draft is cleared either way.
    pub fn toggle_comments(&mut self, id: DocumentId) {
        if self.thread.is_watching(id) {
            self.thread.clear();
        } else {
            let comments = self.ctx.comment_repo();
            self.thread.replace(id, |status_id| comments.watch_thread(status_id));
        }
        self.comments.clear();
        self.comment_draft.clear();
    }

    pub fn set_comment_draft(&mut self, text: impl Into<String>) {
        self.comment_draft = text.into();
    }

    /// Post the comment draft to the open thread; the draft is cleared once
    /// both writes went through
    pub async fn submit_comment(&mut self) -> ServiceResult<Option<DocumentId>> {
        let draft = self.comment_draft.clone();
        let added = self.add_comment(&draft).await?;
        if added.is_some() {
            self.comment_draft.clear();
        }
        Ok(added)
    }

    /// Store a comment on the open thread, then bump the post's comment
    /// count. The two writes are independent.
    #[instrument(skip(self, text))]
    pub async fn add_comment(&mut self, text: &str) -> ServiceResult<Option<DocumentId>> {
        let Some(status_id) = self.thread.key() else {
            debug!("No open thread");
            return Ok(None);
        };
        let Some(text) = non_blank(text) else {
            debug!("Ignoring blank comment");
            return Ok(None);
        };

        let comment_id = match self.ctx.comment_repo().create(status_id, &text).await {
            Ok(id) => id,
            Err(e) => return Err(self.report("Error adding comment", e)),
        };

        if let Err(e) = self.ctx.status_repo().increment_comments(status_id).await {
            warn!(
                comment_id = %comment_id,
                status_id = %status_id,
                error = %e,
                "Comment stored but comment count not updated"
            );
            return Err(self.report("Error adding comment", e));
        }

        info!(comment_id = %comment_id, status_id = %status_id, "Comment added");
        Ok(Some(comment_id))
    }

    // === Tabs ===

    /// Tab bar press; this screen is the Home tab
    pub fn select_tab(&self, tab: HomeTab) -> bool {
        tab.press(HomeTab::Home, self.ctx.shell())
    }

    // === Live deliveries ===

    /// Wait for the next feed or thread delivery and apply it
    ///
    /// Returns `None` once neither listener is live.
    pub async fn next_update(&mut self) -> Option<FeedUpdate> {
        if self.feed.is_none() && !self.thread.is_live() {
            return None;
        }

        let delivery = tokio::select! {
            delivery = next_feed(&mut self.feed) => Delivery::Feed(delivery),
            (status_id, delivery) = self.thread.next() => Delivery::Thread(status_id, delivery),
        };
        Some(self.apply(delivery))
    }

    /// Apply every delivery already queued, without waiting; a listener
    /// that has ended is applied as closed
    pub fn drain(&mut self) -> Vec<FeedUpdate> {
        let mut updates = Vec::new();
        loop {
            let delivery = if let Some(posts) =
                self.feed.as_mut().and_then(Subscription::next_ready)
            {
                Delivery::Feed(posts)
            } else if let Some((status_id, comments)) = self.thread.next_ready() {
                Delivery::Thread(status_id, comments)
            } else {
                break;
            };
            updates.push(self.apply(delivery));
        }
        updates
    }

    fn apply(&mut self, delivery: Delivery) -> FeedUpdate {
        match delivery {
            Delivery::Feed(Some(Ok(posts))) => {
                self.posts = posts;
                self.loading = false;
                FeedUpdate::Posts {
                    count: self.posts.len(),
                }
            }
            Delivery::Feed(Some(Err(e))) => {
                error!(error = %e, "Error loading statuses");
                self.loading = false;
                FeedUpdate::FeedFailed(e)
            }
            Delivery::Feed(None) => {
                self.feed = None;
                self.loading = false;
                FeedUpdate::FeedClosed
            }
            Delivery::Thread(status_id, Some(Ok(comments))) => {
                self.comments = comments;
                FeedUpdate::Comments {
                    status_id,
                    count: self.comments.len(),
                }
            }
            Delivery::Thread(status_id, Some(Err(error))) => {
                error!(status_id = %status_id, error = %error, "Error loading comments");
                FeedUpdate::CommentsFailed { status_id, error }
            }
            Delivery::Thread(status_id, None) => {
                self.thread.release();
                FeedUpdate::ThreadClosed { status_id }
            }
        }
    }

    /// Log a failed write and show its message
    fn report(&self, context: &'static str, err: DomainError) -> ServiceError {
        error!(error = %err, code = err.code(), "{context}");
        let err = ServiceError::from(err);
        self.ctx.shell().alert(err.to_alert());
        err
    }
}

impl Drop for FeedScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn non_blank(text: &str) -> Option<NonEmptyText> {
    NonEmptyText::parse(text).ok()
}

async fn next_feed(
    feed: &mut Option<Subscription<Vec<StatusPost>>>,
) -> Option<RepoResult<Vec<StatusPost>>> {
    match feed {
        Some(feed) => feed.next().await,
        None => future::pending().await,
    }
}
