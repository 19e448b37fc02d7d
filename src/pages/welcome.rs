//! The signed-in landing page: restores the session, renders the user, runs a
//! live clock and hosts a handful of decorative controls.

use crate::{
    errors::AppError,
    pages::{Page, PageContext, CONNECTIVITY_MESSAGE},
    ui::{
        format::{long_date, long_date_time, parse_timestamp},
        ids, Animation,
    },
    users::{User, UserId},
};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const LOAD_FAILED_MESSAGE: &str = "Error loading user data";
pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";
pub const LOGOUT_MESSAGE: &str = "Logging out...";
pub const DELETE_ACCOUNT_LABEL: &str = "Delete Account";
pub const DELETE_ACCOUNT_PROMPT: &str =
    "Are you sure you want to delete your account? This action cannot be undone.";
pub const DELETE_ACCOUNT_MESSAGE: &str = "Account deletion feature coming soon!";

#[derive(Debug, PartialEq, Eq)]
pub enum WelcomeOutcome {
    /// No session marker; sent straight back to login.
    Redirected,
    /// The marker pointed at a record that could not be loaded.
    Failed(AppError),
    Ready(User),
}

/// `"<label> feature coming soon!"`
#[must_use]
pub fn coming_soon(label: &str) -> String {
    format!("{label} feature coming soon!")
}

#[derive(Debug)]
pub struct WelcomePage {
    context: PageContext,
}

impl WelcomePage {
    #[must_use]
    pub fn new(context: PageContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    #[instrument(skip(self))]
    pub async fn mount(&self) -> WelcomeOutcome {
        let ctx = &self.context;
        let Some(id) = ctx.session.current_user_id() else {
            debug!("no session marker");
            ctx.navigator.navigate(Page::Login);
            return WelcomeOutcome::Redirected;
        };

        match self.load_user(&id).await {
            Ok(user) => {
                info!(user_id = %user.id, "session restored");
                self.render(&user);
                self.start_clock();
                WelcomeOutcome::Ready(user)
            }
            Err(err) => {
                error!("Failed to load user {id}: {err}");
                if let Err(clear) = ctx.session.sign_out() {
                    warn!("Failed to clear session marker: {clear}");
                }
                let message = match err {
                    AppError::Network(_) => CONNECTIVITY_MESSAGE,
                    _ => LOAD_FAILED_MESSAGE,
                };
                ctx.notifier.error(message);
                ctx.redirect_after(ctx.timings.restore_failure_redirect, Page::Login);
                WelcomeOutcome::Failed(err)
            }
        }
    }

    /// # Errors
    /// Any failure to fetch the record, including 404.
    pub async fn load_user(&self, id: &UserId) -> Result<User, AppError> {
        self.context.users.get_user(id).await
    }

    fn render(&self, user: &User) {
        let surface = &self.context.surface;
        for slot in ids::USERNAME_SLOTS {
            surface.set_text(slot, &user.username);
        }
        surface.set_text(ids::INFO_EMAIL, &user.email);

        match user.created_at.as_deref().and_then(parse_timestamp) {
            Some(created) => {
                surface.set_text(ids::INFO_DATE, &long_date(&created.with_timezone(&Local)));
            }
            None => debug!(created_at = ?user.created_at, "no usable creation date"),
        }
    }

    fn start_clock(&self) {
        let surface = Arc::clone(&self.context.surface);
        let tick = move || surface.set_text(ids::CURRENT_TIME, &long_date_time(&Local::now()));
        tick();
        self.context.scheduler.every(self.context.timings.clock_tick, tick);
    }

    /// Returns whether the user confirmed.
    pub async fn logout(&self) -> bool {
        let ctx = &self.context;
        if !ctx.confirm.confirm(LOGOUT_PROMPT).await {
            debug!("logout declined");
            return false;
        }

        if let Err(err) = ctx.session.sign_out() {
            error!("Failed to clear session marker: {err}");
        }
        info!("signed out");
        ctx.notifier.success(LOGOUT_MESSAGE);
        ctx.redirect_after(ctx.timings.logout_redirect, Page::Landing);
        true
    }

    pub fn press_card(&self, card: &str) {
        let ctx = &self.context;
        ctx.surface.animate(card, Some(Animation::Press));

        let surface = Arc::clone(&ctx.surface);
        let card = card.to_string();
        ctx.scheduler.after(ctx.timings.card_press, move || {
            surface.animate(&card, None);
        });
    }

    pub async fn trigger_action(&self, label: &str) {
        let ctx = &self.context;
        let label = label.trim();
        if label.contains(DELETE_ACCOUNT_LABEL) {
            if ctx.confirm.confirm(DELETE_ACCOUNT_PROMPT).await {
                ctx.notifier.error(DELETE_ACCOUNT_MESSAGE);
            }
            return;
        }
        ctx.notifier.success(coming_soon(label));
    }

    /// A button inside a card; it does not press the card itself.
    pub fn trigger_card_button(&self, label: &str) {
        self.context.notifier.success(coming_soon(label.trim()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::testing::{user, FakeDirectory, Harness};
    use crate::ui::{NotificationKind, Surface};
    use std::time::Duration;
    use tokio::time::sleep;

    fn signed_in(directory: FakeDirectory, id: &str, confirm: bool) -> (Harness, WelcomePage) {
        let harness = Harness::with_confirm(directory, confirm);
        harness.session().sign_in(&UserId::new(id)).unwrap();
        let page = WelcomePage::new(harness.shell.mount(Page::Welcome));
        (harness, page)
    }

    fn ann() -> FakeDirectory {
        FakeDirectory::with_users(vec![user("7", "ann", "ann@x.com", "abc123")])
    }

    #[tokio::test(start_paused = true)]
    async fn no_marker_redirects_without_network() {
        let mut harness = Harness::new(ann());
        let page = WelcomePage::new(harness.shell.mount(Page::Welcome));

        assert_eq!(page.mount().await, WelcomeOutcome::Redirected);
        assert_eq!(harness.navigation.try_recv().ok(), Some(Page::Login));
        assert_eq!(harness.directory.calls(), 0);
        assert!(harness.surface.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn renders_user_and_ticks_clock() {
        let (harness, page) = signed_in(ann(), "7", true);

        let outcome = page.mount().await;
        assert!(matches!(outcome, WelcomeOutcome::Ready(ref user) if user.username == "ann"));

        for slot in ids::USERNAME_SLOTS {
            assert_eq!(harness.surface.text(slot).as_deref(), Some("ann"));
        }
        assert_eq!(
            harness.surface.text(ids::INFO_EMAIL).as_deref(),
            Some("ann@x.com")
        );
        let date = harness.surface.text(ids::INFO_DATE).unwrap();
        assert!(date.ends_with(", 2024"), "{date}");

        let clock = harness.surface.text(ids::CURRENT_TIME).unwrap();
        assert!(clock.contains(" at "), "{clock}");
        assert_eq!(page.context().scheduler.pending(), 1);

        drop(page);
        sleep(Duration::from_secs(2)).await;
        assert!(harness.surface.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unparsable_creation_date_is_skipped() {
        let mut record = user("7", "ann", "ann@x.com", "abc123");
        record.created_at = Some("not a date".to_string());
        let (harness, page) = signed_in(FakeDirectory::with_users(vec![record]), "7", true);

        assert!(matches!(page.mount().await, WelcomeOutcome::Ready(_)));
        assert_eq!(harness.surface.text(ids::INFO_DATE), None);
        assert_eq!(harness.surface.text(ids::USER_NAME).as_deref(), Some("ann"));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_record_clears_marker_and_returns_to_login() {
        let (mut harness, page) = signed_in(ann(), "404", true);

        let outcome = page.mount().await;
        assert!(matches!(
            outcome,
            WelcomeOutcome::Failed(AppError::Http { status: 404, .. })
        ));
        assert_eq!(harness.session().current_user_id(), None);
        assert_eq!(harness.last_message().as_deref(), Some(LOAD_FAILED_MESSAGE));

        sleep(Duration::from_millis(1900)).await;
        assert!(harness.navigation.try_recv().is_err());
        assert_eq!(harness.navigation.recv().await, Some(Page::Login));
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_backend_reports_connectivity() {
        let (harness, page) = signed_in(FakeDirectory::offline(), "7", true);

        assert!(matches!(
            page.mount().await,
            WelcomeOutcome::Failed(AppError::Network(_))
        ));
        assert_eq!(harness.last_message().as_deref(), Some(CONNECTIVITY_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_logout_clears_marker_and_goes_home() {
        let (mut harness, page) = signed_in(ann(), "7", true);
        page.mount().await;

        assert!(page.logout().await);
        assert_eq!(harness.session().current_user_id(), None);
        assert_eq!(harness.last_message().as_deref(), Some(LOGOUT_MESSAGE));

        sleep(Duration::from_millis(900)).await;
        assert!(harness.navigation.try_recv().is_err());
        assert_eq!(harness.navigation.recv().await, Some(Page::Landing));
    }

    #[tokio::test(start_paused = true)]
    async fn declined_logout_changes_nothing() {
        let (mut harness, page) = signed_in(ann(), "7", false);
        page.mount().await;

        assert!(!page.logout().await);
        assert_eq!(harness.session().current_user_id(), Some(UserId::new("7")));
        assert!(harness.surface.history().is_empty());

        sleep(Duration::from_secs(3)).await;
        assert!(harness.navigation.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn card_press_is_cleared() {
        let (harness, page) = signed_in(ann(), "7", true);
        page.press_card("profile-card");

        assert_eq!(
            harness.surface.element("profile-card").animation,
            Some(Animation::Press)
        );
        sleep(Duration::from_millis(250)).await;
        assert_eq!(harness.surface.element("profile-card").animation, None);
    }

    #[tokio::test(start_paused = true)]
    async fn action_buttons_are_placeholders() {
        let (harness, page) = signed_in(ann(), "7", true);

        page.trigger_action("Edit Profile").await;
        let last = harness.surface.last_notification().unwrap();
        assert_eq!(last.message, "Edit Profile feature coming soon!");
        assert_eq!(last.kind, NotificationKind::Success);

        page.trigger_action("🗑️ Delete Account").await;
        let last = harness.surface.last_notification().unwrap();
        assert_eq!(last.message, DELETE_ACCOUNT_MESSAGE);
        assert_eq!(last.kind, NotificationKind::Error);

        page.trigger_card_button("Settings");
        assert_eq!(
            harness.last_message().as_deref(),
            Some("Settings feature coming soon!")
        );
        assert!(harness.surface.animations().is_empty());
        assert_eq!(harness.directory.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn labels_are_trimmed() {
        let (harness, page) = signed_in(ann(), "7", true);

        page.trigger_action("  Edit Profile \n").await;
        assert_eq!(
            harness.last_message().as_deref(),
            Some("Edit Profile feature coming soon!")
        );

        page.trigger_card_button(" Settings ");
        assert_eq!(
            harness.last_message().as_deref(),
            Some("Settings feature coming soon!")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn declined_delete_shows_nothing() {
        let (harness, page) = signed_in(ann(), "7", false);
        page.trigger_action("Delete Account").await;
        assert!(harness.surface.history().is_empty());
    }
}
