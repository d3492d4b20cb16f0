use std::sync::atomic::{AtomicUsize, Ordering};

use reform::validation;
use reform::{FieldValue, FormArray, FormControl, FormGroup, FormSnapshot, State};

use crate::config::SignupConfig;
use crate::error::SignupError;
use crate::validators::{forbidden_emails, forbidden_names};

/// Key of the nested user data group.
pub const USER_DATA: &str = "userData";
pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const GENDER: &str = "gender";
pub const HOBBIES: &str = "hobbies";

/// The signup form component.
///
/// Owns a form model shaped as
///
/// ```text
/// userData
///   username   required, not blocklisted
///   email      required, email shaped, not blocklisted (async)
/// gender       initial value from config
/// hobbies      list of required entries, grown by `append_hobby`
/// ```
///
/// plus the blocklists its custom validators read.
///
/// # Example
///
/// ```
/// use signup_form::{SignupConfig, SignupForm};
///
/// # fn main() -> Result<(), signup_form::SignupError> {
/// let form = SignupForm::new(&SignupConfig::default())?;
/// form.username().set_value("Anna")?;
/// assert!(form.username().has_error("nameIsForbidden"));
///
/// form.append_hobby()?;
/// assert_eq!(form.hobbies().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SignupForm {
    form: FormGroup,
    username: FormControl,
    email: FormControl,
    gender: FormControl,
    hobbies: FormArray,
    genders: Vec<String>,
    forbidden_usernames: State<Vec<String>>,
    forbidden_emails: State<Vec<String>>,
    submissions: AtomicUsize,
}

impl SignupForm {
    /// Build the form model and run every control's initial validation.
    pub fn new(config: &SignupConfig) -> Result<Self, SignupError> {
        let forbidden_usernames = State::new(config.forbidden_usernames.clone());
        let forbidden_emails_list = State::new(config.forbidden_emails.clone());

        let username = FormControl::builder(FieldValue::Null)
            .validator(validation::required())
            .validator(forbidden_names(forbidden_usernames.clone()))
            .build()?;

        let email = FormControl::builder(FieldValue::Null)
            .validators([validation::required(), validation::email()])
            .async_validator(forbidden_emails(
                forbidden_emails_list.clone(),
                config.email_check_delay,
            ))
            .build()?;

        let gender = FormControl::new(config.default_gender.as_str());
        let hobbies = FormArray::new();

        let form = FormGroup::new()
            .with(
                USER_DATA,
                FormGroup::new()
                    .with(USERNAME, username.clone())
                    .with(EMAIL, email.clone()),
            )
            .with(GENDER, gender.clone())
            .with(HOBBIES, hobbies.clone());

        log::debug!("signup form built with status {}", form.status());

        Ok(Self {
            form,
            username,
            email,
            gender,
            hobbies,
            genders: config.genders.clone(),
            forbidden_usernames,
            forbidden_emails: forbidden_emails_list,
            submissions: AtomicUsize::new(0),
        })
    }

    /// The whole form model, for binding and path lookups.
    pub fn form(&self) -> &FormGroup {
        &self.form
    }

    pub fn username(&self) -> &FormControl {
        &self.username
    }

    pub fn email(&self) -> &FormControl {
        &self.email
    }

    pub fn gender(&self) -> &FormControl {
        &self.gender
    }

    /// Choices offered for the gender field.
    pub fn genders(&self) -> &[String] {
        &self.genders
    }

    /// The username blocklist. Changes apply from the next validation run on.
    pub fn forbidden_usernames(&self) -> &State<Vec<String>> {
        &self.forbidden_usernames
    }

    /// The email blocklist consulted by the async check.
    pub fn forbidden_emails(&self) -> &State<Vec<String>> {
        &self.forbidden_emails
    }

    /// Hobby entries in insertion order.
    pub fn hobbies(&self) -> Vec<FormControl> {
        self.hobbies
            .controls()
            .iter()
            .filter_map(|entry| entry.as_control().cloned())
            .collect()
    }

    /// Append a blank, required hobby entry and return it.
    pub fn append_hobby(&self) -> Result<FormControl, SignupError> {
        let hobby = FormControl::builder(FieldValue::Null)
            .validator(validation::required())
            .build()?;
        self.hobbies.push(hobby.clone());
        log::debug!("hobby {} appended", self.hobbies.len() - 1);
        Ok(hobby)
    }

    /// Log and return a snapshot of the whole form.
    ///
    /// Submission is not gated on validity and leaves the model unchanged.
    pub fn submit(&self) -> FormSnapshot {
        let snapshot = self.form.snapshot();
        let count = self.submissions.fetch_add(1, Ordering::SeqCst) + 1;

        match snapshot.to_json() {
            Ok(json) => log::info!("signup submitted (#{}): {}", count, json),
            Err(e) => log::warn!(
                "signup submitted (#{}), snapshot not serialisable: {}: {:?}",
                count,
                e,
                snapshot
            ),
        }

        snapshot
    }

    /// How many times `submit` has been called.
    pub fn submit_count(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}
