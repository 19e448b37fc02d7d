use crate::cli::actions::{mock, page, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Page(args) => page::execute(args).await,
        Action::MockBackend(args) => mock::execute(args).await,
    }
}
