//! The main flow: upload a photo, submit the generation job, poll until the
//! record appears, then render by status.

use std::path::Path;

use resell_client::{
    BackendClient, ClientConfig, ClientError, ListingSubmission, StorageClient, poll, upload,
};
use resell_core::flow::{self, FlowStatus};

use crate::output;
use crate::store;

/// Run `resell generate`.
///
/// # Errors
///
/// Returns an error on configuration, I/O, or unexpected backend failures.
/// Modeled advisories (missing brand, overload, image quality, timeout) are
/// reported to the user and are not errors.
pub async fn run(image: &Path, brand: &str, rare: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = BackendClient::new(&config)?;
    let storage = StorageClient::new(&config)?;

    // Validated here as well as in submit_listing, so a missing brand never
    // costs the user an upload.
    if brand.trim().is_empty() {
        println!("{}", flow::Advisory::BrandMissing);
        return Ok(());
    }

    let session = client.bootstrap(store::load()).await?;
    if session.rotated {
        store::save(&session.token)?;
    }

    let key = upload::object_key(&session.user.user_id, image)?;
    let bytes = tokio::fs::read(image).await?;
    storage.put_image(&key, bytes).await?;

    let submission = ListingSubmission::new(key, brand, rare);
    if let Err(e) = client.submit_listing(&session.token, &submission).await {
        return report_or_fail(e);
    }

    println!(
        "We're generating the information for this product. Hold tight, it \
         shouldn't take longer than 30s."
    );

    let mut last_printed_secs = 0;
    let mut warned = false;
    let polled = poll::await_generation(&client, &session.token, &config.poll, |progress| {
        let secs = progress.elapsed.as_secs();
        if secs > last_printed_secs {
            last_printed_secs = secs;
            println!("Time elapsed: {secs}s");
        }
        if progress.slow && !warned {
            warned = true;
            println!(
                "Hmm, our backend seems to be taking a while. Feel free to \
                 keep waiting, but you might wanna try again in a bit."
            );
        }
    })
    .await;

    let (user, generation) = match polled {
        Ok(result) => result,
        Err(e) => return report_or_fail(e),
    };

    let resolution = flow::resolve_generation(&user, &generation);
    match resolution.status {
        FlowStatus::ResultReady => {
            println!();
            output::render_generation(&generation, &storage);
            output::render_quota_footer(&user);
        }
        FlowStatus::LoginRequired => {
            println!(
                "Your generation is ready! To view it, sign in on the Resell \
                 site and run `resell account`."
            );
        }
        FlowStatus::QuotaExceeded => {
            println!(
                "You're out of generations. To continue generating \
                 descriptions, please subscribe to a cheap plan."
            );
        }
        FlowStatus::Idle => {
            if let Some(advisory) = resolution.advisory {
                println!("{advisory}");
            }
        }
        // The poll loop only returns once a record is present.
        FlowStatus::Generating => unreachable!("resolution never yields Generating"),
    }

    Ok(())
}

/// Print a modeled advisory, or propagate anything unexpected.
fn report_or_fail(e: ClientError) -> Result<(), Box<dyn std::error::Error>> {
    match e.advisory() {
        Some(advisory) => {
            println!("{advisory}");
            Ok(())
        }
        None => Err(e.into()),
    }
}
