//! Presentation pieces shared by every page: the rendering surface, banners,
//! page-scoped timers, confirmation prompts and date formatting.

pub mod confirm;
pub mod format;
pub mod notify;
pub mod schedule;
pub mod surface;

pub use confirm::{AutoConfirm, Confirm};
pub use notify::{BannerSlot, Notification, NotificationConfig, NotificationKind, Notifier};
pub use schedule::Scheduler;
pub use surface::{ids, Animation, MemorySurface, Surface};
