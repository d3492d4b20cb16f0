//! Validation protocol for form controls.
//!
//! A validator is a function from the current [`FieldValue`](crate::FieldValue)
//! to `Option<ValidationErrors>`: `None` means the value passed. Async
//! validators return a boxed future with the same output and only run once
//! every sync validator on the control has passed.
//!
//! # Example
//!
//! ```
//! use reform::validation::{self, keys};
//! use reform::FieldValue;
//!
//! let check = validation::compose(vec![validation::required(), validation::email()]);
//!
//! let errors = check(&FieldValue::Null).unwrap();
//! assert!(errors.contains(keys::REQUIRED));
//!
//! assert!(check(&FieldValue::from("someone@example.com")).is_none());
//! ```

mod builtins;
mod errors;
mod validator;

pub use builtins::{compose, email, keys, max_length, min_length, pattern, required};
pub use errors::ValidationErrors;
pub use validator::{
    AsyncValidatorFn, BoxFuture, ValidatorFn, async_validator, run_async_validators,
    run_validators, validator,
};
