//! Signup form configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::SignupError;

/// Configuration for a [`SignupForm`](crate::SignupForm).
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use signup_form::SignupConfig;
///
/// let config = SignupConfig::default()
///     .with_forbidden_usernames(["root", "admin"])
///     .with_email_check_delay(Duration::from_millis(200));
///
/// let from_json = SignupConfig::from_json(r#"{ "email_check_delay_ms": 200 }"#).unwrap();
/// assert_eq!(from_json.email_check_delay, config.email_check_delay);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    /// Usernames rejected with `nameIsForbidden` (exact, case-sensitive).
    ///
    /// Default: `Chris`, `Anna`
    pub forbidden_usernames: Vec<String>,

    /// Addresses rejected with `emailIsForbidden` once the simulated
    /// remote check resolves.
    ///
    /// Default: `test@test.com`
    pub forbidden_emails: Vec<String>,

    /// How long the simulated remote email check takes.
    ///
    /// Default: 1500 ms
    #[serde(rename = "email_check_delay_ms", deserialize_with = "millis")]
    pub email_check_delay: Duration,

    /// Choices offered for the gender field.
    ///
    /// Default: `male`, `female`
    pub genders: Vec<String>,

    /// Initial gender value. Not checked against `genders`.
    ///
    /// Default: `male`
    pub default_gender: String,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            forbidden_usernames: vec!["Chris".to_string(), "Anna".to_string()],
            forbidden_emails: vec!["test@test.com".to_string()],
            email_check_delay: Duration::from_millis(1500),
            genders: vec!["male".to_string(), "female".to_string()],
            default_gender: "male".to_string(),
        }
    }
}

impl SignupConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON, filling missing keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, SignupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SignupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded signup config from {}", path.display());
        Self::from_json(&json)
    }

    /// Sets the forbidden usernames.
    pub fn with_forbidden_usernames<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.forbidden_usernames = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the forbidden email addresses.
    pub fn with_forbidden_emails<S: Into<String>>(
        mut self,
        emails: impl IntoIterator<Item = S>,
    ) -> Self {
        self.forbidden_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the simulated email check delay.
    pub fn with_email_check_delay(mut self, delay: Duration) -> Self {
        self.email_check_delay = delay;
        self
    }

    /// Sets the gender choices.
    pub fn with_genders<S: Into<String>>(mut self, genders: impl IntoIterator<Item = S>) -> Self {
        self.genders = genders.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the initial gender.
    pub fn with_default_gender(mut self, gender: impl Into<String>) -> Self {
        self.default_gender = gender.into();
        self
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}
