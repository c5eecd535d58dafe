//! Profile display.

use resell_client::{BackendClient, ClientConfig, StorageClient};
use resell_core::RecordOutcome;

use crate::output;
use crate::store;

/// Run `resell account`: bootstrap the session and print the profile, plus
/// the last generation when one is on record and viewable.
///
/// # Errors
///
/// Returns an error on configuration or backend failures.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = BackendClient::new(&config)?;
    let storage = StorageClient::new(&config)?;

    let session = client.bootstrap(store::load()).await?;
    if session.rotated {
        store::save(&session.token)?;
    }

    output::render_account(&session.user);

    if let Some(generation) = session.user.last_generation.as_ref()
        && generation.outcome() == RecordOutcome::Valid
        && session.user.is_signed_in()
    {
        println!();
        println!("last generation:");
        println!();
        output::render_generation(generation, &storage);
    }

    Ok(())
}
