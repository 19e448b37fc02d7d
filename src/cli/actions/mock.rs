use anyhow::Result;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args {
    pub port: u16,
}

/// Execute the mock-backend action.
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn execute(args: Args) -> Result<()> {
    info!(port = args.port, "starting mock users backend");
    crate::mock::start(args.port).await
}
