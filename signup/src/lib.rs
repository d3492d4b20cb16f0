//! Signup form component.
//!
//! Builds a nested form model (`userData.username`, `userData.email`,
//! `gender`, `hobbies`) on top of [`reform`], wires the built-in and custom
//! validators, and exposes the two view actions: appending a hobby and
//! submitting.

pub mod config;
pub mod error;
pub mod form;
pub mod validators;

pub use config::SignupConfig;
pub use error::SignupError;
pub use form::SignupForm;
pub use validators::{EMAIL_IS_FORBIDDEN, NAME_IS_FORBIDDEN};
