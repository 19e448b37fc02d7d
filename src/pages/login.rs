use crate::{
    errors::AppError,
    pages::{
        validate::{validate_login, ValidationError},
        Page, PageContext, CONNECTIVITY_MESSAGE,
    },
    ui::{ids, Animation},
    users::User,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const LOGIN_REJECTED_MESSAGE: &str = "Invalid username or password";

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Marker set; welcome follows after the redirect delay.
    SignedIn(User),
    Invalid(ValidationError),
    /// No record matches both fields.
    Rejected,
    /// The users collection could not be read.
    Unreachable(AppError),
    /// The session marker could not be written.
    Failed(AppError),
}

/// Returns the first record whose username and password both match exactly.
#[must_use]
pub fn find_user<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|user| user.username == username && user.password == password)
}

#[derive(Debug)]
pub struct LoginPage {
    context: PageContext,
}

impl LoginPage {
    #[must_use]
    pub fn new(context: PageContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Scans the whole collection for a credential match.
    ///
    /// # Errors
    /// Any failure to fetch or decode the collection.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<User>, AppError> {
        let users = self.context.users.list_users().await?;
        debug!(candidates = users.len(), "scanning users");
        Ok(find_user(&users, username, password.expose_secret()).cloned())
    }

    #[instrument(skip(self, form), fields(username = %form.username.trim()))]
    pub async fn submit(&self, form: LoginForm) -> LoginOutcome {
        let ctx = &self.context;
        let username = form.username.trim();

        if let Err(err) = validate_login(username, form.password.expose_secret()) {
            ctx.notifier.error(err.to_string());
            return LoginOutcome::Invalid(err);
        }

        match self.authenticate(username, &form.password).await {
            Ok(Some(user)) => {
                if let Err(err) = ctx.session.sign_in(&user.id) {
                    error!("Failed to persist session: {err}");
                    ctx.notifier.error(err.to_string());
                    return LoginOutcome::Failed(err);
                }

                info!(user_id = %user.id, "signed in");
                ctx.notifier.success(LOGIN_SUCCESS_MESSAGE);
                ctx.redirect_after(ctx.timings.login_redirect, Page::Welcome);
                LoginOutcome::SignedIn(user)
            }
            Ok(None) => {
                debug!("credentials rejected");
                ctx.notifier.error(LOGIN_REJECTED_MESSAGE);
                self.shake();
                LoginOutcome::Rejected
            }
            Err(err) => {
                error!("Login request failed: {err}");
                ctx.notifier.error(CONNECTIVITY_MESSAGE);
                LoginOutcome::Unreachable(err)
            }
        }
    }

    fn shake(&self) {
        let ctx = &self.context;
        ctx.surface.animate(ids::LOGIN_FORM, Some(Animation::Shake));

        let surface = Arc::clone(&ctx.surface);
        ctx.scheduler.after(ctx.timings.shake, move || {
            surface.animate(ids::LOGIN_FORM, None);
        });
    }
}
