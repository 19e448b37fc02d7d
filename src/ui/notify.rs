//! Transient status banners. At most one banner is visible per surface: showing
//! a new one removes the current one immediately, whichever page showed it, and
//! each banner dismisses itself after the page's dwell time followed by a short
//! exit animation.

use crate::{
    config::Timings,
    pages::Page,
    ui::{schedule::Scheduler, surface::Surface},
};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// How long banners stay up on a given page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationConfig {
    pub dwell: Duration,
    pub exit: Duration,
}

impl NotificationConfig {
    #[must_use]
    pub fn for_page(page: Page, timings: &Timings) -> Self {
        let dwell = match page {
            Page::Welcome => timings.welcome_dwell,
            Page::Landing | Page::Login | Page::Signup => timings.form_dwell,
        };
        Self {
            dwell,
            exit: timings.banner_exit,
        }
    }
}

/// The banner on screen and the id counter, shared by every page mounted on
/// the same surface. Ids are never reused, so a timer only ever matches the
/// banner it was started for.
#[derive(Debug, Default)]
pub struct BannerSlot {
    current: Mutex<Option<Notification>>,
    last_id: AtomicU64,
}

impl BannerSlot {
    fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn lock(&self) -> MutexGuard<'_, Option<Notification>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone)]
pub struct Notifier {
    surface: Arc<dyn Surface>,
    config: NotificationConfig,
    scheduler: Scheduler,
    slot: Arc<BannerSlot>,
    // 0 until this notifier shows something.
    last_shown: Arc<AtomicU64>,
}

impl Notifier {
    #[must_use]
    pub fn new(
        surface: Arc<dyn Surface>,
        config: NotificationConfig,
        scheduler: Scheduler,
        slot: Arc<BannerSlot>,
    ) -> Self {
        Self {
            surface,
            config,
            scheduler,
            slot,
            last_shown: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification {
            id: self.slot.next_id(),
            kind,
            message: message.into(),
        };
        self.last_shown.store(notification.id, Ordering::Relaxed);

        let previous = self.slot.lock().replace(notification.clone());
        if let Some(previous) = previous {
            self.surface.remove_banner(&previous);
        }
        self.surface.show_banner(&notification);

        let surface = Arc::clone(&self.surface);
        let slot = Arc::clone(&self.slot);
        let exit = self.config.exit;
        let scheduler = self.scheduler.clone();
        self.scheduler.after(self.config.dwell, move || {
            surface.retire_banner(&notification);
            scheduler.after(exit, move || {
                surface.remove_banner(&notification);
                let mut current = slot.lock();
                if current.as_ref().map(|shown| shown.id) == Some(notification.id) {
                    *current = None;
                }
            });
        });
    }

    /// The banner currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.slot.lock().clone()
    }

    /// Removes the banner this notifier showed last, if it is still on screen.
    pub fn dismiss(&self) {
        let last = self.last_shown.load(Ordering::Relaxed);
        let mut current = self.slot.lock();
        if current.as_ref().is_some_and(|shown| shown.id == last) {
            if let Some(shown) = current.take() {
                self.surface.remove_banner(&shown);
            }
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("config", &self.config)
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
