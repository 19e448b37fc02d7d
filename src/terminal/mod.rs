//! Terminal host pieces: a surface that prints what a user would see and a
//! stdin-backed confirmation prompt.

use crate::ui::{ids, Animation, MemorySurface, Notification, NotificationKind, Surface};
use async_trait::async_trait;
use std::{
    io::{self, BufRead, Write},
    sync::{Mutex, PoisonError},
};
use tracing::{debug, warn};

/// Elements worth printing, with their caption.
const CAPTIONS: [(&str, &str); 5] = [
    (ids::USERNAME_DISPLAY, "Welcome"),
    (ids::INFO_EMAIL, "Email"),
    (ids::INFO_DATE, "Member since"),
    (ids::CURRENT_TIME, "Current time"),
    (ids::INFO_USERNAME, "Username"),
];

/// Prints banners and page content to a writer, stdout by default, and keeps
/// the full element state in a [`MemorySurface`].
///
/// The clock slot is printed once; later ticks only update state.
pub struct TerminalSurface {
    state: MemorySurface,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    #[must_use]
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: MemorySurface::new(),
            out: Mutex::new(out),
        }
    }

    #[must_use]
    pub fn state(&self) -> &MemorySurface {
        &self.state
    }

    fn print(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            debug!("Failed to write to terminal: {err}");
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn set_text(&self, element: &str, text: &str) {
        let previous = self.state.text(element);
        self.state.set_text(element, text);

        let Some((_, caption)) = CAPTIONS.iter().find(|(id, _)| *id == element) else {
            return;
        };
        let first = previous.is_none();
        let changed = previous.as_deref() != Some(text);
        if (element == ids::CURRENT_TIME && first) || (element != ids::CURRENT_TIME && changed) {
            self.print(&format!("{caption}: {text}"));
        }
    }

    fn text(&self, element: &str) -> Option<String> {
        self.state.text(element)
    }

    fn set_disabled(&self, element: &str, disabled: bool) {
        self.state.set_disabled(element, disabled);
    }

    fn reset_form(&self, form: &str) {
        self.state.reset_form(form);
    }

    fn animate(&self, element: &str, animation: Option<Animation>) {
        self.state.animate(element, animation);
    }

    fn show_banner(&self, notification: &Notification) {
        self.state.show_banner(notification);
        let marker = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✖",
        };
        self.print(&format!("{marker} {}", notification.message));
    }

    fn retire_banner(&self, notification: &Notification) {
        self.state.retire_banner(notification);
    }

    fn remove_banner(&self, notification: &Notification) {
        self.state.remove_banner(notification);
    }
}

impl std::fmt::Debug for TerminalSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// `y` or `yes`, any case, surrounding whitespace ignored.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Asks on stdout and reads the answer from stdin. End of input declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptConfirm;

#[async_trait]
impl crate::ui::Confirm for PromptConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let prompt = format!("{message} [y/N] ");
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stdout = io::stdout();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(err)) => {
                warn!("Failed to read confirmation: {err}");
                false
            }
            Err(err) => {
                warn!("Confirmation prompt aborted: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn prints_banners_and_captioned_slots() {
        let capture = Capture::default();
        let surface = TerminalSurface::with_writer(Box::new(capture.clone()));

        surface.show_banner(&Notification {
            id: 1,
            kind: NotificationKind::Error,
            message: "Invalid username or password".to_string(),
        });
        surface.set_text(ids::USERNAME_DISPLAY, "ann");
        surface.set_text(ids::USER_NAME, "ann");
        surface.set_text(ids::INFO_EMAIL, "ann@x.com");
        surface.set_text(ids::SIGNUP_SUBMIT, "Processing...");

        assert_eq!(
            capture.lines(),
            [
                "✖ Invalid username or password",
                "Welcome: ann",
                "Email: ann@x.com"
            ]
        );
        assert_eq!(
            surface.text(ids::SIGNUP_SUBMIT).as_deref(),
            Some("Processing...")
        );
    }

    #[test]
    fn clock_is_printed_once() {
        let capture = Capture::default();
        let surface = TerminalSurface::with_writer(Box::new(capture.clone()));

        surface.set_text(ids::CURRENT_TIME, "Tuesday, March 5, 2024 at 02:05:09 PM");
        surface.set_text(ids::CURRENT_TIME, "Tuesday, March 5, 2024 at 02:05:10 PM");

        assert_eq!(
            capture.lines(),
            ["Current time: Tuesday, March 5, 2024 at 02:05:09 PM"]
        );
        assert_eq!(
            surface.text(ids::CURRENT_TIME).as_deref(),
            Some("Tuesday, March 5, 2024 at 02:05:10 PM")
        );
    }

    #[test]
    fn affirmative_answers() {
        for answer in ["y", "Y", "yes", " YES \n"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "n", "no", "yep", "\n"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }
}
