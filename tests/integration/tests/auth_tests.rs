//! Identity Integration Tests
//!
//! Landing gate, sign-in, sign-up, profile and the scripted session, against
//! the in-memory identity provider.
//!
//! Run with: cargo test -p integration-tests --test auth_tests

use findr_app::{create_app_state, run_session};
use findr_core::{IdentityProvider, ImagePickerOptions};
use findr_service::{
    Alert, Avatar, FeedScreen, GateUpdate, HomeTab, IdentityGate, Navigation, ProfileScreen,
    ProfileSection, ProfileUpdate, Route, SignInScreen, SignUpScreen, DEFAULT_AVATAR,
};
use integration_tests::{test_config, Credentials, TestApp};

// ============================================================================
// Landing gate
// ============================================================================

#[tokio::test]
async fn test_gate_without_session_shows_landing() {
    let app = TestApp::start().expect("Failed to start app");
    let mut gate = IdentityGate::mount(app.ctx());
    assert!(gate.is_checking());

    assert_eq!(gate.next_update().await, Some(GateUpdate::ShowLanding));
    assert!(!gate.is_checking());
    assert_eq!(app.shell.current_route(), Route::Landing);

    gate.get_started();
    assert_eq!(app.shell.current_route(), Route::SignIn);
}

#[tokio::test]
async fn test_gate_with_session_opens_profile() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.identity
        .create_account(&credentials.email, &credentials.password)
        .await
        .expect("account creation failed");

    let mut gate = IdentityGate::mount(app.ctx());
    assert_eq!(gate.next_update().await, Some(GateUpdate::RedirectedToProfile));
    assert_eq!(app.shell.current_route(), Route::Profile);
}

#[tokio::test]
async fn test_gate_follows_later_sign_in() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.register(&credentials).await.expect("register failed");

    let mut gate = IdentityGate::mount(app.ctx());
    assert_eq!(gate.drain(), vec![GateUpdate::ShowLanding]);

    app.identity
        .sign_in(&credentials.email, &credentials.password)
        .await
        .expect("sign in failed");
    assert_eq!(gate.drain(), vec![GateUpdate::RedirectedToProfile]);
}

#[tokio::test]
async fn test_gate_unmount_stops_listening() {
    let app = TestApp::start().expect("Failed to start app");
    let watchers = app.identity.watcher_count();
    {
        let gate = IdentityGate::mount(app.ctx());
        assert!(gate.is_listening());
        assert_eq!(app.identity.watcher_count(), watchers + 1);
    }
    assert_eq!(app.identity.watcher_count(), watchers);
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn test_sign_in_success_replaces_route() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.register(&credentials).await.expect("register failed");

    let mut screen = SignInScreen::mount(app.ctx());
    screen.set_email(credentials.email.as_str());
    screen.set_password(credentials.password.as_str());
    let user = screen.submit().await.expect("sign in failed");

    assert_eq!(user.email, credentials.email);
    assert!(!screen.is_submitting());
    assert_eq!(app.shell.current_route(), Route::Profile);
    assert!(app.shell.alerts().is_empty());
}

#[tokio::test]
async fn test_sign_in_wrong_password_alerts() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.register(&credentials).await.expect("register failed");

    let mut screen = SignInScreen::mount(app.ctx());
    screen.set_email(credentials.email.as_str());
    screen.set_password("not-the-password");
    assert!(screen.submit().await.is_err());

    assert_eq!(
        app.shell.last_alert(),
        Some(Alert::new(
            "Login Error",
            "The email or password is incorrect. (auth/invalid-credential)"
        ))
    );
    assert_eq!(app.shell.current_route(), Route::Landing);
    assert!(app.identity.current_user().is_none());
}

#[tokio::test]
async fn test_sign_in_screen_links_to_sign_up() {
    let app = TestApp::start().expect("Failed to start app");
    SignInScreen::mount(app.ctx()).go_to_sign_up();
    assert_eq!(app.shell.current_route(), Route::SignUp);
}

// ============================================================================
// Sign-up
// ============================================================================

#[tokio::test]
async fn test_sign_up_mismatch_never_reaches_provider() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();

    let mut screen = SignUpScreen::mount(app.ctx());
    screen.set_email(credentials.email.as_str());
    screen.set_password(credentials.password.as_str());
    screen.set_confirm_password("something else");
    assert!(screen.submit().await.is_err());

    assert_eq!(app.identity_calls.calls(), 0);
    assert_eq!(app.identity.account_count(), 0);
    assert_eq!(
        app.shell.last_alert(),
        Some(Alert::new("Password Error", "Passwords do not match."))
    );
}

#[tokio::test]
async fn test_sign_up_creates_account_and_signs_in() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();

    let mut screen = SignUpScreen::mount(app.ctx());
    screen.set_email(credentials.email.as_str());
    screen.set_password(credentials.password.as_str());
    screen.set_confirm_password(credentials.password.as_str());
    let user = screen.submit().await.expect("sign up failed");

    assert_eq!(app.identity_calls.calls(), 1);
    assert_eq!(app.identity.account_count(), 1);
    assert_eq!(app.identity.current_user(), Some(user));
    assert_eq!(app.shell.current_route(), Route::Profile);
}

#[tokio::test]
async fn test_sign_up_rejections_alert_provider_message() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.register(&credentials).await.expect("register failed");

    let mut screen = SignUpScreen::mount(app.ctx());
    screen.set_email(credentials.email.as_str());
    screen.set_password(credentials.password.as_str());
    screen.set_confirm_password(credentials.password.as_str());
    assert!(screen.submit().await.is_err());
    let alert = app.shell.last_alert().expect("no alert");
    assert_eq!(alert.title, "Signup Error");
    assert!(alert.message.contains("auth/email-already-in-use"));

    let mut screen = SignUpScreen::mount(app.ctx());
    screen.set_email(Credentials::unique().email);
    screen.set_password("123");
    screen.set_confirm_password("123");
    assert!(screen.submit().await.is_err());
    let alert = app.shell.last_alert().expect("no alert");
    assert_eq!(alert.title, "Signup Error");
    assert_eq!(
        alert.message,
        "Password should be at least 6 characters. (auth/weak-password)"
    );
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_without_session_redirects() {
    let app = TestApp::start().expect("Failed to start app");
    let mut profile = ProfileScreen::mount(app.ctx());

    assert_eq!(
        profile.next_update().await,
        Some(ProfileUpdate::RedirectedToSignIn)
    );
    assert!(profile.is_auth_ready());
    assert_eq!(app.shell.current_route(), Route::SignIn);
}

#[tokio::test]
async fn test_profile_rename_and_avatar() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.identity
        .create_account(&credentials.email, &credentials.password)
        .await
        .expect("account creation failed");

    let mut profile = ProfileScreen::mount(app.ctx());
    assert!(matches!(
        profile.next_update().await,
        Some(ProfileUpdate::User(_))
    ));
    assert!(matches!(profile.avatar(), Avatar::Default));
    assert_eq!(DEFAULT_AVATAR, "assets/images/user.png");
    assert_eq!(profile.header_name(), "Your Name");

    profile.start_editing();
    profile.set_name_draft("   ");
    assert!(profile.save_name().await.is_err());
    assert_eq!(
        app.shell.last_alert(),
        Some(Alert::new("Invalid", "Name cannot be empty."))
    );

    profile.set_name_draft("  Traveler  ");
    profile.save_name().await.expect("rename failed");
    assert!(!profile.is_editing());
    assert_eq!(profile.header_name(), "Traveler");
    assert_eq!(
        app.identity.current_user().and_then(|u| u.display_name),
        Some("Traveler".to_string())
    );
    assert_eq!(
        app.shell.last_alert(),
        Some(Alert::new("Success", "Username updated."))
    );

    app.media.queue_pick("file:///gallery/me.jpg");
    let picked = profile.pick_avatar().await.expect("pick failed");
    assert_eq!(picked.as_deref(), Some("file:///gallery/me.jpg"));
    assert_eq!(profile.avatar().uri(), "file:///gallery/me.jpg");
    assert_eq!(app.media.last_options(), Some(ImagePickerOptions::avatar()));

    profile.open_section(ProfileSection::MyProfile);
    let (title, lines) = profile.section_content(ProfileSection::MyProfile);
    assert_eq!(title, "My Profile");
    assert_eq!(lines[0], "Name: Traveler");
    assert_eq!(lines[1], format!("Email: {}", credentials.email));
}

#[tokio::test]
async fn test_home_tabs_switch_between_feed_and_profile() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.identity
        .create_account(&credentials.email, &credentials.password)
        .await
        .expect("account creation failed");

    let mut profile = ProfileScreen::mount(app.ctx());
    profile.drain();
    assert!(profile.select_tab(HomeTab::Home));
    assert_eq!(app.shell.current_route(), Route::Feed);

    let feed = FeedScreen::mount(app.ctx());
    assert!(!feed.select_tab(HomeTab::Home));
    assert!(feed.select_tab(HomeTab::Profile));
    assert_eq!(app.shell.current_route(), Route::Profile);
    assert_eq!(
        app.shell.navigations(),
        vec![
            Navigation::Replace(Route::Feed),
            Navigation::Replace(Route::Profile)
        ]
    );
    assert_eq!(HomeTab::ALL.map(HomeTab::route), [Route::Feed, Route::Profile]);
}

#[tokio::test]
async fn test_avatar_permission_refused() {
    let app = TestApp::start().expect("Failed to start app");
    let mut profile = ProfileScreen::mount(app.ctx());
    app.media.set_granted(false);

    assert!(profile.pick_avatar().await.is_err());
    assert_eq!(app.media.picker_launches(), 0);
    assert_eq!(
        app.shell.last_alert(),
        Some(Alert::new(
            "Permission required",
            "Permission to access gallery is required!"
        ))
    );
}

#[tokio::test]
async fn test_profile_sign_out_returns_to_sign_in() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.identity
        .create_account(&credentials.email, &credentials.password)
        .await
        .expect("account creation failed");

    let mut profile = ProfileScreen::mount(app.ctx());
    profile.drain();

    profile.sign_out().await;
    assert!(app.identity.current_user().is_none());
    assert_eq!(app.shell.current_route(), Route::SignIn);
    assert_eq!(profile.drain(), vec![ProfileUpdate::RedirectedToSignIn]);
}

#[tokio::test]
async fn test_sign_out_redirects_even_when_provider_fails() {
    let app = TestApp::start().expect("Failed to start app");
    let credentials = Credentials::unique();
    app.identity
        .create_account(&credentials.email, &credentials.password)
        .await
        .expect("account creation failed");
    app.identity.set_available(false);

    let mut profile = ProfileScreen::mount(app.ctx());
    profile.sign_out().await;

    assert_eq!(app.shell.current_route(), Route::SignIn);
    assert!(app.identity.current_user().is_some());
}

// ============================================================================
// Scripted session
// ============================================================================

#[tokio::test]
async fn test_scripted_session_end_to_end() {
    integration_tests::init_test_tracing();
    let state = create_app_state(test_config()).expect("Failed to build app state");

    let report = run_session(&state).await.expect("session failed");

    assert_eq!(report.display_name.as_deref(), Some("Traveler"));
    assert_eq!(report.likes, 1);
    assert_eq!(report.comments_count, 1);
    assert_eq!(report.comments, vec!["Beautiful!".to_string()]);
    assert_eq!(report.posts_after_delete, 0);
    assert_eq!(report.final_route, Route::SignIn);
    let titles: Vec<_> = report.alerts.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Password Error", "Success"]);
}
