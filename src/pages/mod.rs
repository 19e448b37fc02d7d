//! Page controllers and the plumbing they share.
//!
//! Flow Overview: a host mounts a page by asking the [`Shell`] for a fresh
//! [`PageContext`], hands it to the page's controller, and forwards user input
//! (a submit, a click) to it. Controllers validate, talk to the users backend,
//! update the session marker and the surface, and request navigation through
//! the [`Navigator`]. The host mounts whatever page arrives next and drops the
//! previous context, which cancels that page's timers and takes down its banner.
//!
//! Pages never call each other; they share only the backend and the session.

pub mod login;
pub mod signup;
pub mod validate;
pub mod welcome;

pub use login::{LoginForm, LoginOutcome, LoginPage};
pub use signup::{SignupForm, SignupOutcome, SignupPage};
pub use validate::ValidationError;
pub use welcome::{WelcomeOutcome, WelcomePage};

use crate::{
    config::{AppConfig, Timings},
    session::Session,
    ui::{BannerSlot, Confirm, NotificationConfig, Notifier, Scheduler, Surface},
    users::UserDirectory,
};
use std::{fmt, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Shown whenever the backend cannot be reached or answers with something
/// that is not a users resource.
pub const CONNECTIVITY_MESSAGE: &str =
    "Error connecting to server. Please make sure the users backend is running.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Login,
    Signup,
    Welcome,
}

impl Page {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Welcome => "welcome",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sends navigation requests to the host.
#[derive(Clone, Debug)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Page>,
}

impl Navigator {
    /// A navigator and the receiving end the host listens on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Page>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn navigate(&self, page: Page) {
        debug!(%page, "navigate");
        if self.tx.send(page).is_err() {
            warn!(%page, "navigation dropped: host is gone");
        }
    }
}

/// Dependencies that outlive individual pages.
#[derive(Clone)]
pub struct Shell {
    pub config: Arc<AppConfig>,
    pub session: Session,
    pub users: Arc<dyn UserDirectory>,
    pub surface: Arc<dyn Surface>,
    /// Banner state of `surface`, shared by every page mounted on it.
    pub banners: Arc<BannerSlot>,
    pub confirm: Arc<dyn Confirm>,
    pub navigator: Navigator,
}

impl Shell {
    /// Builds the context for a freshly mounted `page`.
    #[must_use]
    pub fn mount(&self, page: Page) -> PageContext {
        let scheduler = Scheduler::new();
        let notifier = Notifier::new(
            Arc::clone(&self.surface),
            NotificationConfig::for_page(page, &self.config.timings),
            scheduler.clone(),
            Arc::clone(&self.banners),
        );

        PageContext {
            page,
            timings: self.config.timings,
            session: self.session.clone(),
            users: Arc::clone(&self.users),
            surface: Arc::clone(&self.surface),
            confirm: Arc::clone(&self.confirm),
            notifier,
            navigator: self.navigator.clone(),
            scheduler,
        }
    }
}

/// Everything one mounted page may touch. Dropping it tears the page down.
pub struct PageContext {
    pub page: Page,
    pub timings: Timings,
    pub session: Session,
    pub users: Arc<dyn UserDirectory>,
    pub surface: Arc<dyn Surface>,
    pub confirm: Arc<dyn Confirm>,
    pub notifier: Notifier,
    pub navigator: Navigator,
    pub scheduler: Scheduler,
}

impl PageContext {
    /// Navigates to `page` once `delay` has passed, unless torn down first.
    pub fn redirect_after(&self, delay: Duration, page: Page) {
        let navigator = self.navigator.clone();
        self.scheduler.after(delay, move || navigator.navigate(page));
    }
}

impl Drop for PageContext {
    fn drop(&mut self) {
        debug!(page = %self.page, "page torn down");
        self.scheduler.cancel_all();
        self.notifier.dismiss();
    }
}

impl fmt::Debug for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageContext")
            .field("page", &self.page)
            .field("session", &self.session)
            .field("pending_tasks", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeDirectory, Harness};
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn page_names() {
        assert_eq!(Page::Landing.to_string(), "landing");
        assert_eq!(Page::Welcome.name(), "welcome");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_context_cancels_redirect() {
        let mut harness = Harness::new(FakeDirectory::default());
        let context = harness.shell.mount(Page::Login);
        context.redirect_after(Duration::from_millis(1500), Page::Welcome);
        drop(context);

        sleep(Duration::from_secs(2)).await;
        assert!(harness.navigation.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn redirect_arrives_after_delay() {
        let mut harness = Harness::new(FakeDirectory::default());
        let context = harness.shell.mount(Page::Signup);
        context.redirect_after(Duration::from_secs(2), Page::Login);

        sleep(Duration::from_millis(1900)).await;
        assert!(harness.navigation.try_recv().is_err());
        assert_eq!(harness.navigation.recv().await, Some(Page::Login));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_takes_the_banner_with_it() {
        let harness = Harness::new(FakeDirectory::default());
        let login = harness.shell.mount(Page::Login);
        login.notifier.success("Login successful! Redirecting...");
        drop(login);
        assert!(harness.surface.banners().is_empty());

        let welcome = harness.shell.mount(Page::Welcome);
        welcome.notifier.success("Settings feature coming soon!");
        let banners = harness.surface.banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].notification.message, "Settings feature coming soon!");
        assert_eq!(banners[0].notification.id, 2);

        sleep(Duration::from_millis(3100)).await;
        let banners = harness.surface.banners();
        assert_eq!(banners.len(), 1);
        assert!(banners[0].leaving);

        sleep(Duration::from_millis(300)).await;
        assert!(harness.surface.banners().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn next_page_replaces_banner_of_page_still_mounted() {
        let harness = Harness::new(FakeDirectory::default());
        let login = harness.shell.mount(Page::Login);
        login.notifier.success("Login successful! Redirecting...");

        let welcome = harness.shell.mount(Page::Welcome);
        welcome.notifier.error("Error loading user data");
        drop(login);

        let banners = harness.surface.banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].notification.message, "Error loading user data");
        assert_eq!(
            welcome.notifier.current().map(|shown| shown.message),
            Some("Error loading user data".to_string())
        );
    }
}
