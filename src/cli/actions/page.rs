//! Runs pages in the terminal.
//!
//! Flow Overview:
//! 1) Build the shell: backend client, file-backed session, terminal surface.
//! 2) Mount the requested page and feed it the form or interaction.
//! 3) Follow the navigation it requests, keeping the page mounted until the
//!    redirect fires, then mount the destination.

use crate::{
    cli::globals::GlobalArgs,
    pages::{
        LoginForm, LoginOutcome, LoginPage, Navigator, Page, Shell, SignupForm, SignupOutcome,
        SignupPage, WelcomeOutcome, WelcomePage,
    },
    session::{FileStorage, Session},
    terminal::{PromptConfirm, TerminalSurface},
    ui::{AutoConfirm, Confirm, Surface},
    users::{UserDirectory, UsersClient},
};
use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

#[derive(Debug)]
pub enum PageRequest {
    Login(LoginForm),
    Signup(SignupForm),
    Welcome(WelcomeIntent),
}

/// What to do on the welcome page once it has loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WelcomeIntent {
    pub card: Option<String>,
    pub card_button: Option<String>,
    pub action: Option<String>,
    pub logout: bool,
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub request: PageRequest,
    pub assume_yes: bool,
}

/// Execute a page request.
/// # Errors
/// Returns an error if the configuration is invalid or the page interaction fails.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.globals.config()?;
    debug!(api = %config.api_base_url, storage = %config.storage_path.display(), "page host");

    let users = UsersClient::new(&config)?;
    let storage = FileStorage::new(config.storage_path.clone());
    let confirm: Arc<dyn Confirm> = if args.assume_yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(PromptConfirm)
    };
    let (navigator, navigation) = Navigator::channel();

    let shell = Shell {
        config: Arc::new(config),
        session: Session::new(Arc::new(storage)),
        users: Arc::new(users) as Arc<dyn UserDirectory>,
        surface: Arc::new(TerminalSurface::new()) as Arc<dyn Surface>,
        banners: Arc::default(),
        confirm,
        navigator,
    };

    Host::new(shell, navigation).run(args.request).await
}

/// Mounts pages on a shell and follows their navigation.
pub struct Host {
    shell: Shell,
    navigation: UnboundedReceiver<Page>,
}

impl Host {
    #[must_use]
    pub fn new(shell: Shell, navigation: UnboundedReceiver<Page>) -> Self {
        Self { shell, navigation }
    }

    /// # Errors
    /// Returns an error when the page reports a failure.
    pub async fn run(&mut self, request: PageRequest) -> Result<()> {
        match request {
            PageRequest::Login(form) => self.login(form).await,
            PageRequest::Signup(form) => self.signup(form).await,
            PageRequest::Welcome(intent) => self.welcome(&intent).await,
        }
    }

    async fn login(&mut self, form: LoginForm) -> Result<()> {
        let page = LoginPage::new(self.shell.mount(Page::Login));
        let outcome = page.submit(form).await;
        match outcome {
            LoginOutcome::SignedIn(_) => {
                let next = self.follow().await?;
                drop(page);
                self.arrive(next).await
            }
            LoginOutcome::Invalid(err) => Err(anyhow!(err)),
            LoginOutcome::Rejected => bail!("login rejected"),
            LoginOutcome::Unreachable(err) => {
                Err(anyhow!(err)).context("users backend unreachable")
            }
            LoginOutcome::Failed(err) => Err(anyhow!(err)).context("could not start session"),
        }
    }

    async fn signup(&mut self, form: SignupForm) -> Result<()> {
        let page = SignupPage::new(self.shell.mount(Page::Signup));
        let outcome = page.submit(form).await;
        match outcome {
            SignupOutcome::Created(user) => {
                info!(user_id = %user.id, "account ready");
                let next = self.follow().await?;
                drop(page);
                self.arrive(next).await
            }
            SignupOutcome::Invalid(err) => Err(anyhow!(err)),
            SignupOutcome::Taken => bail!("username or email already registered"),
            SignupOutcome::Unreachable(err) => {
                Err(anyhow!(err)).context("users backend unreachable")
            }
            SignupOutcome::Failed(err) => Err(anyhow!(err)).context("account not created"),
        }
    }

    async fn welcome(&mut self, intent: &WelcomeIntent) -> Result<()> {
        let page = WelcomePage::new(self.shell.mount(Page::Welcome));
        let outcome = page.mount().await;
        match outcome {
            WelcomeOutcome::Ready(_) => {}
            WelcomeOutcome::Redirected => {
                bail!("not signed in, run `doorstep login` first")
            }
            WelcomeOutcome::Failed(err) => {
                // Let the redirect play out so the banner gets its moment.
                self.follow().await?;
                return Err(anyhow!(err)).context("could not restore session");
            }
        }

        if let Some(card) = &intent.card {
            page.press_card(card);
        }
        if let Some(label) = &intent.card_button {
            page.trigger_card_button(label);
        }
        if let Some(label) = &intent.action {
            page.trigger_action(label).await;
        }
        if intent.logout && page.logout().await {
            let next = self.follow().await?;
            drop(page);
            return self.arrive(next).await;
        }

        Ok(())
    }

    /// Waits for the mounted page to request navigation.
    async fn follow(&mut self) -> Result<Page> {
        let page = self
            .navigation
            .recv()
            .await
            .context("navigation channel closed")?;
        debug!(%page, "following navigation");
        Ok(page)
    }

    /// Mounts a destination that needs no input.
    async fn arrive(&mut self, page: Page) -> Result<()> {
        match page {
            Page::Welcome => Box::pin(self.welcome(&WelcomeIntent::default())).await,
            Page::Login => {
                let _page = LoginPage::new(self.shell.mount(Page::Login));
                info!("login page ready, run `doorstep login` to sign in");
                Ok(())
            }
            Page::Landing | Page::Signup => {
                let _context = self.shell.mount(page);
                info!(%page, "page ready");
                Ok(())
            }
        }
    }
}
