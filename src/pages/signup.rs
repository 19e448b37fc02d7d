use crate::{
    errors::AppError,
    pages::{
        validate::{validate_signup, ValidationError},
        Page, PageContext, CONNECTIVITY_MESSAGE,
    },
    ui::ids,
    users::{NewUser, User},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument};

pub const PROCESSING_LABEL: &str = "Processing...";
pub const DEFAULT_SUBMIT_LABEL: &str = "Sign Up";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account created successfully! Redirecting to login...";
pub const USER_TAKEN_MESSAGE: &str = "Username or email already exists!";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating account. Please try again.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Stored; login follows after the redirect delay.
    Created(User),
    Invalid(ValidationError),
    /// The username or the email is already registered.
    Taken,
    Unreachable(AppError),
    Failed(AppError),
}

/// True when any record shares the username or the email.
#[must_use]
pub fn collides(users: &[User], username: &str, email: &str) -> bool {
    users
        .iter()
        .any(|user| user.username == username || user.email == email)
}

#[derive(Debug)]
pub struct SignupPage {
    context: PageContext,
}

impl SignupPage {
    #[must_use]
    pub fn new(context: PageContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Existence check that fails closed: an unreadable collection counts as
    /// a collision.
    pub async fn user_exists(&self, username: &str, email: &str) -> bool {
        self.lookup_collision(username, email)
            .await
            .unwrap_or_else(|err| {
                error!("Existence check failed: {err}");
                true
            })
    }

    async fn lookup_collision(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let users = self.context.users.list_users().await?;
        Ok(collides(&users, username, email))
    }

    /// # Errors
    /// Transport, status and decode failures of the `POST`.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.context.users.create_user(user).await
    }

    #[instrument(skip(self, form), fields(username = %form.username.trim()))]
    pub async fn submit(&self, form: SignupForm) -> SignupOutcome {
        let ctx = &self.context;
        let label = ctx
            .surface
            .text(ids::SIGNUP_SUBMIT)
            .unwrap_or_else(|| DEFAULT_SUBMIT_LABEL.to_string());
        ctx.surface.set_disabled(ids::SIGNUP_SUBMIT, true);
        ctx.surface.set_text(ids::SIGNUP_SUBMIT, PROCESSING_LABEL);

        let outcome = self.register(form).await;

        if let SignupOutcome::Created(user) = &outcome {
            info!(user_id = %user.id, "account created");
            ctx.notifier.success(SIGNUP_SUCCESS_MESSAGE);
            ctx.surface.reset_form(ids::SIGNUP_FORM);
            ctx.redirect_after(ctx.timings.signup_redirect, Page::Login);
        } else {
            ctx.surface.set_disabled(ids::SIGNUP_SUBMIT, false);
            ctx.surface.set_text(ids::SIGNUP_SUBMIT, &label);
        }

        outcome
    }

    async fn register(&self, form: SignupForm) -> SignupOutcome {
        let notifier = &self.context.notifier;
        let username = form.username.trim();
        let email = form.email.trim();

        if let Err(err) = validate_signup(
            username,
            email,
            form.password.expose_secret(),
            form.confirm_password.expose_secret(),
        ) {
            debug!(%err, "signup form rejected");
            notifier.error(err.to_string());
            return SignupOutcome::Invalid(err);
        }

        match self.lookup_collision(username, email).await {
            Ok(false) => {}
            Ok(true) => {
                notifier.error(USER_TAKEN_MESSAGE);
                return SignupOutcome::Taken;
            }
            Err(err) => {
                error!("Existence check failed: {err}");
                notifier.error(CONNECTIVITY_MESSAGE);
                return SignupOutcome::Unreachable(err);
            }
        }

        let record = NewUser::new(
            username.to_string(),
            email.to_string(),
            form.password.expose_secret().to_string(),
        );

        match self.create_user(&record).await {
            Ok(user) => SignupOutcome::Created(user),
            Err(err @ AppError::Network(_)) => {
                error!("Create request failed: {err}");
                notifier.error(CONNECTIVITY_MESSAGE);
                SignupOutcome::Unreachable(err)
            }
            Err(err @ AppError::Serialization(_)) => {
                error!("Create request could not be encoded: {err}");
                notifier.error(UNEXPECTED_MESSAGE);
                SignupOutcome::Failed(err)
            }
            Err(err) => {
                error!("Create request rejected: {err}");
                notifier.error(CREATE_FAILED_MESSAGE);
                SignupOutcome::Failed(err)
            }
        }
    }
}
