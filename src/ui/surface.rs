//! The rendering target of a page. Controllers address elements by id and never
//! read form values back from the surface; form input arrives with the submit.

use crate::ui::notify::Notification;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Element ids shared by the controllers and the hosts that render them.
pub mod ids {
    pub const LOGIN_FORM: &str = "login-form";
    pub const SIGNUP_FORM: &str = "signup-form";
    pub const SIGNUP_SUBMIT: &str = "signup-submit";
    pub const USERNAME_DISPLAY: &str = "username-display";
    pub const USER_NAME: &str = "user-name";
    pub const INFO_USERNAME: &str = "info-username";
    pub const INFO_EMAIL: &str = "info-email";
    pub const INFO_DATE: &str = "info-date";
    pub const CURRENT_TIME: &str = "current-time";

    /// Every slot that shows the signed-in username.
    pub const USERNAME_SLOTS: [&str; 3] = [USERNAME_DISPLAY, USER_NAME, INFO_USERNAME];
}

/// Cosmetic animations; none of them changes page state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animation {
    Shake,
    Press,
}

pub trait Surface: Send + Sync {
    fn set_text(&self, element: &str, text: &str);
    fn text(&self, element: &str) -> Option<String>;
    fn set_disabled(&self, element: &str, disabled: bool);
    fn reset_form(&self, form: &str);
    /// Starts `animation` on `element`, or clears it with `None`.
    fn animate(&self, element: &str, animation: Option<Animation>);
    fn show_banner(&self, notification: &Notification);
    /// Starts the banner's exit animation.
    fn retire_banner(&self, notification: &Notification);
    /// Removes the banner; a no-op if it is already gone.
    fn remove_banner(&self, notification: &Notification);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementState {
    pub text: Option<String>,
    pub disabled: bool,
    pub animation: Option<Animation>,
    pub resets: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub notification: Notification,
    pub leaving: bool,
}

/// A surface that only keeps state. Tests assert against it and the terminal
/// surface wraps it.
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: Mutex<HashMap<String, ElementState>>,
    banners: Mutex<Vec<Banner>>,
    history: Mutex<Vec<Notification>>,
    animations: Mutex<Vec<(String, Animation)>>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an element's text, e.g. a submit button label.
    #[must_use]
    pub fn with_text(self, element: &str, text: &str) -> Self {
        self.set_text(element, text);
        self
    }

    #[must_use]
    pub fn element(&self, element: &str) -> ElementState {
        let elements = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        elements.get(element).cloned().unwrap_or_default()
    }

    /// Banners currently in the document, including ones mid-exit.
    #[must_use]
    pub fn banners(&self) -> Vec<Banner> {
        self.banners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every banner ever shown, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last_notification(&self) -> Option<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Animations started so far, in order.
    #[must_use]
    pub fn animations(&self) -> Vec<(String, Animation)> {
        self.animations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, element: &str, apply: impl FnOnce(&mut ElementState)) {
        let mut elements = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        apply(elements.entry(element.to_string()).or_default());
    }
}

impl Surface for MemorySurface {
    fn set_text(&self, element: &str, text: &str) {
        self.update(element, |state| state.text = Some(text.to_string()));
    }

    fn text(&self, element: &str) -> Option<String> {
        let elements = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        elements.get(element).and_then(|state| state.text.clone())
    }

    fn set_disabled(&self, element: &str, disabled: bool) {
        self.update(element, |state| state.disabled = disabled);
    }

    fn reset_form(&self, form: &str) {
        self.update(form, |state| state.resets += 1);
    }

    fn animate(&self, element: &str, animation: Option<Animation>) {
        self.update(element, |state| state.animation = animation);
        if let Some(animation) = animation {
            self.animations
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((element.to_string(), animation));
        }
    }

    fn show_banner(&self, notification: &Notification) {
        self.banners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Banner {
                notification: notification.clone(),
                leaving: false,
            });
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }

    fn retire_banner(&self, notification: &Notification) {
        let mut banners = self.banners.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(banner) = banners
            .iter_mut()
            .find(|banner| banner.notification.id == notification.id)
        {
            banner.leaving = true;
        }
    }

    fn remove_banner(&self, notification: &Notification) {
        self.banners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|banner| banner.notification.id != notification.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notify::NotificationKind;

    fn notification(id: u64) -> Notification {
        Notification {
            id,
            kind: NotificationKind::Success,
            message: format!("message {id}"),
        }
    }

    #[test]
    fn element_state_tracks_text_disabled_and_resets() {
        let surface = MemorySurface::new().with_text(ids::SIGNUP_SUBMIT, "Sign Up");
        surface.set_disabled(ids::SIGNUP_SUBMIT, true);
        surface.reset_form(ids::SIGNUP_FORM);

        assert_eq!(surface.text(ids::SIGNUP_SUBMIT).as_deref(), Some("Sign Up"));
        assert!(surface.element(ids::SIGNUP_SUBMIT).disabled);
        assert_eq!(surface.element(ids::SIGNUP_FORM).resets, 1);
        assert_eq!(surface.text("missing"), None);
    }

    #[test]
    fn animations_are_recorded_and_cleared() {
        let surface = MemorySurface::new();
        surface.animate(ids::LOGIN_FORM, Some(Animation::Shake));
        assert_eq!(
            surface.element(ids::LOGIN_FORM).animation,
            Some(Animation::Shake)
        );

        surface.animate(ids::LOGIN_FORM, None);
        assert_eq!(surface.element(ids::LOGIN_FORM).animation, None);
        assert_eq!(
            surface.animations(),
            vec![(ids::LOGIN_FORM.to_string(), Animation::Shake)]
        );
    }

    #[test]
    fn banners_retire_then_remove() {
        let surface = MemorySurface::new();
        let first = notification(1);
        surface.show_banner(&first);
        surface.retire_banner(&first);
        assert!(surface.banners()[0].leaving);

        surface.remove_banner(&first);
        surface.remove_banner(&first);
        assert!(surface.banners().is_empty());
        assert_eq!(surface.history(), vec![first]);
    }
}
