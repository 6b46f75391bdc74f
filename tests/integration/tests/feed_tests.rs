//! Feed Integration Tests
//!
//! Drive the feed screen against the in-memory document store.
//!
//! Run with: cargo test -p integration-tests --test feed_tests

use findr_core::{CommentRepository, DomainError, NonEmptyText, ReactionKind};
use findr_service::{ComposerMode, FeedScreen, FeedUpdate};
use integration_tests::{texts, TestApp};

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_blank_post_makes_no_write() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let writes = app.store.write_count();

    for blank in texts::BLANKS {
        let created = feed.create_post(blank).await.expect("blank create failed");
        assert!(created.is_none());
    }

    assert_eq!(app.store.write_count(), writes);
    assert_eq!(app.store.document_count(app.statuses()), 0);
    assert!(feed.drain().is_empty());
}

#[tokio::test]
async fn test_create_post_stores_one_fresh_record() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    assert!(feed.is_empty());

    let id = feed
        .create_post("  Hello world  ")
        .await
        .expect("create failed")
        .expect("post not created");

    assert_eq!(app.store.document_count(app.statuses()), 1);
    assert_eq!(feed.drain(), vec![FeedUpdate::Posts { count: 1 }]);

    let post = feed.post(id).expect("post missing from feed");
    assert_eq!(post.text, "Hello world");
    assert!(post.reactions.is_empty());
    assert_eq!(post.comments_count, 0);
    assert!(!post.is_edited());
}

#[tokio::test]
async fn test_feed_is_newest_first() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;

    let first = feed.create_post("first").await.unwrap().unwrap();
    let second = feed.create_post("second").await.unwrap().unwrap();
    let third = feed.create_post("third").await.unwrap().unwrap();
    feed.drain();

    let ids: Vec<_> = feed.posts().iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[tokio::test]
async fn test_composer_edit_flow() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;

    feed.open_composer();
    feed.set_draft("Original");
    assert!(feed.save_draft().await.expect("save failed"));
    assert!(!feed.composer().visible);
    feed.drain();

    let post = feed.posts()[0].clone();
    feed.open_editor(&post);
    assert_eq!(feed.composer().mode, ComposerMode::Edit(post.id));
    assert_eq!(feed.composer().draft, "Original");

    // Blank edits keep the composer open and write nothing
    feed.set_draft("   ");
    let writes = app.store.write_count();
    assert!(!feed.save_draft().await.expect("blank save failed"));
    assert!(feed.composer().visible);
    assert_eq!(app.store.write_count(), writes);

    feed.set_draft("Edited");
    assert!(feed.save_draft().await.expect("save failed"));
    feed.drain();

    let edited = feed.post(post.id).expect("post missing");
    assert_eq!(edited.text, "Edited");
    assert!(edited.is_edited());
    assert_eq!(edited.created_at, post.created_at);
}

#[tokio::test]
async fn test_reactions_accumulate() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let id = feed.create_post("React to me").await.unwrap().unwrap();

    for _ in 0..5 {
        feed.react(id, ReactionKind::Love).await.expect("react failed");
    }
    feed.react(id, ReactionKind::Laugh).await.expect("react failed");
    feed.drain();

    let post = feed.post(id).expect("post missing");
    assert_eq!(FeedScreen::reaction_count(post, ReactionKind::Love), 5);
    assert_eq!(FeedScreen::reaction_count(post, ReactionKind::Laugh), 1);
    assert_eq!(FeedScreen::reaction_count(post, ReactionKind::Like), 0);
}

#[tokio::test]
async fn test_react_on_missing_post_alerts() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let id = feed.create_post("Short lived").await.unwrap().unwrap();
    app.store.delete(app.statuses(), id).expect("delete failed");

    let err = feed.react(id, ReactionKind::Like).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
    let alert = app.shell.last_alert().expect("no alert shown");
    assert_eq!(alert.title, "Error");
    assert!(alert.message.starts_with("No document to update:"));
}

// ============================================================================
// Menu and delete
// ============================================================================

#[tokio::test]
async fn test_delete_clears_thread_and_menu() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let id = feed.create_post("Doomed").await.unwrap().unwrap();
    feed.drain();

    feed.toggle_menu(id);
    assert_eq!(feed.open_menu(), Some(id));
    feed.toggle_comments(id);
    feed.add_comment("first!").await.unwrap();
    feed.drain();
    assert_eq!(feed.comments().len(), 1);
    assert_eq!(app.store.listener_count(app.comments()), 1);

    feed.delete_post(id).await.expect("delete failed");

    assert_eq!(feed.active_thread(), None);
    assert_eq!(feed.open_menu(), None);
    assert!(feed.comments().is_empty());
    assert_eq!(app.store.listener_count(app.comments()), 0);

    feed.drain();
    assert!(feed.is_empty());
}

// ============================================================================
// Comment threads
// ============================================================================

#[tokio::test]
async fn test_one_thread_at_a_time() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let a = feed.create_post("A").await.unwrap().unwrap();
    let b = feed.create_post("B").await.unwrap().unwrap();
    feed.drain();

    feed.toggle_comments(a);
    feed.add_comment("on A").await.unwrap();
    feed.drain();
    assert_eq!(feed.comments().len(), 1);

    feed.toggle_comments(b);
    assert_eq!(feed.active_thread(), Some(b));
    assert!(feed.comments().is_empty());
    assert_eq!(app.store.listener_count(app.comments()), 1);

    // A's thread keeps changing but nothing reaches the screen
    let text = NonEmptyText::parse("late comment on A").expect("blank text");
    app.ctx()
        .comment_repo()
        .create(a, &text)
        .await
        .expect("comment failed");

    let updates = feed.drain();
    assert!(updates.iter().all(|update| !matches!(
        update,
        FeedUpdate::Comments { status_id, .. } | FeedUpdate::CommentsFailed { status_id, .. }
            if *status_id == a
    )));
    assert!(feed.comments().iter().all(|comment| comment.belongs_to(b)));
    assert!(feed.comments().is_empty());
}

#[tokio::test]
async fn test_toggle_same_thread_closes_it() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let id = feed.create_post("Toggle").await.unwrap().unwrap();

    feed.toggle_comments(id);
    feed.set_comment_draft("half written");
    feed.toggle_comments(id);

    assert_eq!(feed.active_thread(), None);
    assert_eq!(feed.comment_draft(), "");
    assert_eq!(app.store.listener_count(app.comments()), 0);
}

#[tokio::test]
async fn test_comment_without_open_thread_is_ignored() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    feed.create_post("Lonely").await.unwrap();
    let writes = app.store.write_count();

    assert!(feed.add_comment("hello?").await.unwrap().is_none());
    assert_eq!(app.store.write_count(), writes);
}

#[tokio::test]
async fn test_comment_stored_but_count_fails() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let id = feed.create_post("Gone soon").await.unwrap().unwrap();
    feed.drain();
    feed.toggle_comments(id);

    // Deleted elsewhere while the thread is open
    app.store.delete(app.statuses(), id).expect("delete failed");

    let err = feed.add_comment("orphan").await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
    assert_eq!(app.store.document_count(app.comments()), 1);
    assert_eq!(app.shell.last_alert().expect("no alert").title, "Error");
}

#[tokio::test]
async fn test_submit_comment_keeps_draft_on_failure() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    let id = feed.create_post("Offline").await.unwrap().unwrap();
    feed.toggle_comments(id);
    feed.set_comment_draft("not yet");

    app.store.set_available(false);
    assert!(feed.submit_comment().await.is_err());
    assert_eq!(feed.comment_draft(), "not yet");

    app.store.set_available(true);
    assert!(feed.submit_comment().await.unwrap().is_some());
    assert_eq!(feed.comment_draft(), "");
}

// ============================================================================
// Live deliveries
// ============================================================================

#[tokio::test]
async fn test_feed_error_keeps_last_list() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;
    feed.create_post("Keep me").await.unwrap();
    feed.drain();

    let error = DomainError::Unavailable("listen stream reset".to_string());
    app.store.fail_listeners(app.statuses(), error.clone());

    assert_eq!(
        feed.drain(),
        vec![FeedUpdate::FeedFailed(error), FeedUpdate::FeedClosed]
    );
    assert_eq!(feed.posts().len(), 1);
    assert!(!feed.is_loading());
    assert!(!feed.is_subscribed());
    assert!(app.shell.alerts().is_empty());

    assert_eq!(feed.next_update().await, None);
    assert_eq!(feed.posts().len(), 1);
}

#[tokio::test]
async fn test_feeds_stay_in_sync_across_screens() {
    let app = TestApp::start().expect("Failed to start app");
    let mut mine = app.feed().await;
    let mut theirs = app.feed().await;

    let id = mine.create_post("Shared").await.unwrap().unwrap();
    theirs.react(id, ReactionKind::Like).await.unwrap();
    theirs.toggle_comments(id);
    theirs.add_comment("Nice").await.unwrap();

    mine.drain();
    theirs.drain();

    let post = mine.post(id).expect("post missing");
    assert_eq!(post.reaction_count(ReactionKind::Like), 1);
    assert_eq!(post.comments_count, 1);
    assert_eq!(mine.posts(), theirs.posts());
    assert_eq!(theirs.comments().len(), 1);
}

#[tokio::test]
async fn test_unmount_releases_listeners() {
    let app = TestApp::start().expect("Failed to start app");
    {
        let mut feed = app.feed().await;
        let id = feed.create_post("Bye").await.unwrap().unwrap();
        feed.toggle_comments(id);
        assert_eq!(app.store.listener_count(app.statuses()), 1);
        assert_eq!(app.store.listener_count(app.comments()), 1);
    }
    assert_eq!(app.store.listener_count(app.statuses()), 0);
    assert_eq!(app.store.listener_count(app.comments()), 0);
}

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test]
async fn test_paris_trip_scenario() {
    let app = TestApp::start().expect("Failed to start app");
    let mut feed = app.feed().await;

    feed.open_composer();
    feed.set_draft(texts::PARIS_TRIP);
    assert!(feed.save_draft().await.unwrap());
    feed.drain();
    let id = feed.posts()[0].id;

    feed.react(id, ReactionKind::Like).await.unwrap();
    feed.toggle_comments(id);
    feed.set_comment_draft(texts::BEAUTIFUL);
    feed.submit_comment().await.unwrap();
    feed.drain();

    let post = feed.post(id).expect("post missing");
    assert_eq!(post.text, texts::PARIS_TRIP);
    assert_eq!(post.reaction_count(ReactionKind::Like), 1);
    assert_eq!(post.comments_count, 1);
    assert_eq!(feed.comments().len(), 1);
    assert_eq!(feed.comments()[0].text, texts::BEAUTIFUL);

    feed.delete_post(id).await.unwrap();
    feed.drain();
    assert!(feed.is_empty());
    assert_eq!(feed.active_thread(), None);
    assert!(app.shell.alerts().is_empty());
}
