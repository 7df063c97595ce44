use crate::cli::actions::{serve, users, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Users(args) => users::execute(args).await,
        Action::Serve(args) => serve::execute(args).await,
    }
}
