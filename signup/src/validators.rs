//! Custom validators for the signup form.
//!
//! Both validators capture the list they check against as a shared
//! [`State`], handed in by the form that owns it.

use std::time::Duration;

use reform::State;
use reform::validation::{self, AsyncValidatorFn, ValidationErrors, ValidatorFn};

/// Reason reported for a blocklisted username.
pub const NAME_IS_FORBIDDEN: &str = "nameIsForbidden";

/// Reason reported for a blocklisted email address.
pub const EMAIL_IS_FORBIDDEN: &str = "emailIsForbidden";

/// Reject usernames that exactly match an entry of `blocklist`.
///
/// The blocklist is read on every evaluation, so later changes to it apply
/// from the next validation run on.
pub fn forbidden_names(blocklist: State<Vec<String>>) -> ValidatorFn {
    validation::validator(move |value| {
        let name = value.as_str()?;
        blocklist
            .read(|names| names.iter().any(|forbidden| forbidden == name))
            .then(|| ValidationErrors::single(NAME_IS_FORBIDDEN))
    })
}

/// Simulated remote check rejecting blocklisted email addresses.
///
/// Resolves after `delay` using the value it was called with. It never
/// cancels itself; the control discards results that arrive after a newer
/// check started.
pub fn forbidden_emails(blocklist: State<Vec<String>>, delay: Duration) -> AsyncValidatorFn {
    validation::async_validator(move |value| {
        let blocklist = blocklist.clone();
        async move {
            tokio::time::sleep(delay).await;
            let Some(email) = value.as_str() else {
                return None;
            };
            let forbidden = blocklist.read(|emails| emails.iter().any(|blocked| blocked == email));
            log::debug!("email check for {:?} resolved (forbidden: {})", email, forbidden);
            forbidden.then(|| ValidationErrors::single(EMAIL_IS_FORBIDDEN))
        }
    })
}
