//! Authentication service and the sign-in / sign-up screens
//!
//! Credentials go to the identity provider as typed; the only local check
//! is that the sign-up password and its confirmation are identical.

use tracing::{info, instrument, warn};
use validator::Validate;

use findr_core::{DomainError, UserProfile};

use crate::dto::{SignInRequest, SignUpRequest};
use crate::shell::Route;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const LOGIN_ERROR: &str = "Login Error";
const SIGNUP_ERROR: &str = "Signup Error";
const PASSWORD_ERROR: &str = "Password Error";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sign in with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_in(&self, request: &SignInRequest) -> ServiceResult<UserProfile> {
        let user = self
            .ctx
            .identity()
            .sign_in(&request.email, &request.password)
            .await?;
        info!(uid = %user.uid, "User signed in");
        Ok(user)
    }

    /// Create an account; a mismatched confirmation never reaches the provider
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&self, request: &SignUpRequest) -> ServiceResult<UserProfile> {
        request
            .validate()
            .map_err(|_| ServiceError::Domain(DomainError::PasswordMismatch))?;

        let user = self
            .ctx
            .identity()
            .create_account(&request.email, &request.password)
            .await?;
        info!(uid = %user.uid, "Account created");
        Ok(user)
    }

    /// End the session and go to sign-in, whatever the provider answers
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if let Err(e) = self.ctx.identity().sign_out().await {
            warn!(error = %e, code = e.code(), "Sign-out failed");
        } else {
            info!("User signed out");
        }
        self.ctx.shell().replace(Route::SignIn);
    }
}

// ============================================================================
// Sign-in screen
// ============================================================================

/// Sign-in form state
pub struct SignInScreen {
    ctx: ServiceContext,
    form: SignInRequest,
    submitting: bool,
}

impl SignInScreen {
    pub fn mount(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            form: SignInRequest::default(),
            submitting: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn form(&self) -> &SignInRequest {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit the form; success replaces the route with Profile
    pub async fn submit(&mut self) -> ServiceResult<UserProfile> {
        self.submitting = true;
        let result = AuthService::new(&self.ctx).sign_in(&self.form).await;
        self.submitting = false;

        match result {
            Ok(user) => {
                self.ctx.shell().replace(Route::Profile);
                Ok(user)
            }
            Err(e) => {
                self.ctx.shell().alert(e.to_alert_titled(LOGIN_ERROR));
                Err(e)
            }
        }
    }

    pub fn go_to_sign_up(&self) {
        self.ctx.shell().replace(Route::SignUp);
    }
}

// ============================================================================
// Sign-up screen
// ============================================================================

/// Sign-up form state
pub struct SignUpScreen {
    ctx: ServiceContext,
    form: SignUpRequest,
    submitting: bool,
}

impl SignUpScreen {
    pub fn mount(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            form: SignUpRequest::default(),
            submitting: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn set_confirm_password(&mut self, confirm_password: impl Into<String>) {
        self.form.confirm_password = confirm_password.into();
    }

    pub fn form(&self) -> &SignUpRequest {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit the form; success replaces the route with Profile
    pub async fn submit(&mut self) -> ServiceResult<UserProfile> {
        self.submitting = true;
        let result = AuthService::new(&self.ctx).sign_up(&self.form).await;
        self.submitting = false;

        match result {
            Ok(user) => {
                self.ctx.shell().replace(Route::Profile);
                Ok(user)
            }
            Err(e @ ServiceError::Domain(DomainError::PasswordMismatch)) => {
                self.ctx.shell().alert(e.to_alert_titled(PASSWORD_ERROR));
                Err(e)
            }
            Err(e) => {
                self.ctx.shell().alert(e.to_alert_titled(SIGNUP_ERROR));
                Err(e)
            }
        }
    }

    pub fn go_to_sign_in(&self) {
        self.ctx.shell().replace(Route::SignIn);
    }
}
