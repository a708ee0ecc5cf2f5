//! Recipient guard sequence.
//!
//! Applied once a recipient identifier is known, in this order:
//! the profile must exist, must have at least one device token, and must
//! not have push explicitly disabled. The first failing check wins.

use notifier_core::models::UserProfile;

use crate::outcome::SkipReason;

/// Runs the guard sequence over a looked-up profile.
pub fn check_recipient(profile: Option<UserProfile>) -> Result<UserProfile, SkipReason> {
    let profile = profile.ok_or(SkipReason::ProfileNotFound)?;

    if !profile.has_device_tokens() {
        return Err(SkipReason::NoDeviceTokens);
    }

    if !profile.push_enabled() {
        return Err(SkipReason::PushDisabled);
    }

    Ok(profile)
}
