//! Scripted session
//!
//! Walks the client through landing, sign-up, profile and feed the way a
//! first-time user would, and reports what each screen ended up showing.

use findr_common::AppError;
use findr_core::ReactionKind;
use findr_service::{
    Alert, FeedScreen, GateUpdate, HomeTab, IdentityGate, ProfileScreen, Route, SignInScreen,
    SignUpScreen,
};
use tracing::{info, instrument};

use crate::state::AppState;

const EMAIL: &str = "traveler@findr.app";
const PASSWORD: &str = "bonjour-paris";
const DISPLAY_NAME: &str = "Traveler";
const PICKED_AVATAR: &str = "file:///DCIM/eiffel.jpg";

/// What the screens showed during the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub display_name: Option<String>,
    pub avatar_uri: String,
    pub post_text: String,
    pub likes: i64,
    pub comments_count: i64,
    pub comments: Vec<String>,
    pub posts_after_delete: usize,
    pub final_route: Route,
    pub alerts: Vec<Alert>,
}

/// Run the scripted session against `state`
#[instrument(skip(state))]
pub async fn run_session(state: &AppState) -> Result<SessionReport, AppError> {
    let ctx = state.service_context().clone();

    // Landing
    let mut gate = IdentityGate::mount(ctx.clone());
    if gate.next_update().await == Some(GateUpdate::ShowLanding) {
        gate.get_started();
    }
    gate.unmount();

    // Sign-in has no account yet; follow the link to sign-up
    SignInScreen::mount(ctx.clone()).go_to_sign_up();

    // Sign-up, with a typo in the confirmation first
    let mut sign_up = SignUpScreen::mount(ctx.clone());
    sign_up.set_email(EMAIL);
    sign_up.set_password(PASSWORD);
    sign_up.set_confirm_password("bonjour-pari");
    if sign_up.submit().await.is_ok() {
        return Err(AppError::internal(anyhow::anyhow!(
            "mismatched confirmation was accepted"
        )));
    }
    sign_up.set_confirm_password(PASSWORD);
    let user = sign_up.submit().await?;
    info!(uid = %user.uid, route = %state.shell().current_route(), "Signed up");

    // Profile
    let mut profile = ProfileScreen::mount(ctx.clone());
    profile.next_update().await;
    profile.start_editing();
    profile.set_name_draft(DISPLAY_NAME);
    profile.save_name().await?;
    state.media().queue_pick(PICKED_AVATAR);
    profile.pick_avatar().await?;
    profile.select_tab(HomeTab::Home);

    // Feed
    let mut feed = FeedScreen::mount(ctx);
    feed.next_update().await;
    feed.open_composer();
    feed.set_draft("Paris trip");
    feed.save_draft().await?;
    feed.drain();

    let post_id = feed
        .posts()
        .first()
        .map(|post| post.id)
        .ok_or_else(|| AppError::not_found("created post"))?;
    feed.react(post_id, ReactionKind::Like).await?;
    feed.toggle_comments(post_id);
    feed.set_comment_draft("Beautiful!");
    feed.submit_comment().await?;
    feed.drain();

    let post = feed
        .post(post_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("status {post_id}")))?;
    let comments: Vec<String> = feed.comments().iter().map(|c| c.text.clone()).collect();
    info!(
        id = %post.id,
        likes = post.reaction_count(ReactionKind::Like),
        comments = post.comments_count,
        "Post after reacting and commenting"
    );

    feed.delete_post(post_id).await?;
    feed.drain();
    let posts_after_delete = feed.posts().len();
    feed.select_tab(HomeTab::Profile);
    feed.unmount();

    profile.drain();
    let display_name = profile.user().and_then(|u| u.display_name.clone());
    let avatar_uri = profile.avatar().uri().to_string();
    profile.sign_out().await;
    profile.drain();

    Ok(SessionReport {
        display_name,
        avatar_uri,
        post_text: post.text.clone(),
        likes: FeedScreen::reaction_count(&post, ReactionKind::Like),
        comments_count: post.comments_count,
        comments,
        posts_after_delete,
        final_route: state.shell().current_route(),
        alerts: state.shell().alerts(),
    })
}
