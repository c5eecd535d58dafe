//! Local session removal.

use crate::store;

/// Run `resell logout`: forget the locally stored session token. The
/// backend-held user record is untouched; this is the client-side analog of
/// cookie expiry.
///
/// # Errors
///
/// Returns an error if the session file exists but cannot be removed.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    if store::clear()? {
        println!("session forgotten");
    } else {
        println!("no stored session");
    }
    Ok(())
}
