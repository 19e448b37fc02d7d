//! Confirmation prompts, the async counterpart of a blocking confirm dialog.

use async_trait::async_trait;

#[async_trait]
pub trait Confirm: Send + Sync {
    /// Asks the user to confirm `message`; `false` means declined.
    async fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt the same way, e.g. for `--yes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
