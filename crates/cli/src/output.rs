//! Rendering for generated listings and profiles.
//!
//! Each listing field is printed as its own block with an underlined
//! heading, so any field can be selected and copied on its own - the
//! terminal version of the original's copy-to-clipboard areas.

use resell_client::StorageClient;
use resell_core::{Generation, SubscriptionTier, User};

/// Print a generated listing: the image URL, then every field in display
/// order.
pub fn render_generation(generation: &Generation, storage: &StorageClient) {
    if let Some(pic_url) = generation.pic_url.as_deref() {
        println!("photo: {}", storage.image_url(pic_url));
        println!();
    }

    for (category, value) in generation.display_fields() {
        let heading = category.replace('_', " ");
        println!("{heading}");
        println!("{}", "-".repeat(heading.len()));
        println!("{value}");
        println!();
    }
}

/// Print the profile summary shown by `resell account`.
pub fn render_account(user: &User) {
    match user.email.as_ref() {
        Some(email) => println!("signed in as {email}"),
        None => println!("anonymous user (not signed in)"),
    }

    println!("tier: {}", user.tier());

    if !user.tier().is_unlimited() {
        // New users get the default free allowance server-side.
        let left = user.generations_left.unwrap_or(3);
        println!("generations left: {left}");
    }

    if let Some(expires) = user.subscription_expires {
        println!("subscription renews: {expires}");
    }
}

/// Print the free-generations footer shown under a result.
pub fn render_quota_footer(user: &User) {
    if user.tier() == SubscriptionTier::Plus {
        return;
    }
    let left = user.generations_left.unwrap_or(3);
    println!("You have {left}x free generations left. Need more? Buy credits on your profile page.");
}
