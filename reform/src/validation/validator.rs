//! Validator function types and the helpers that run them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::errors::ValidationErrors;
use crate::value::FieldValue;

/// Type alias for boxed futures used in async validation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A synchronous validator.
///
/// Returns `None` when the value passes and the failure reasons otherwise.
pub type ValidatorFn = Arc<dyn Fn(&FieldValue) -> Option<ValidationErrors> + Send + Sync>;

/// An asynchronous validator.
///
/// Receives an owned copy of the value it validates and resolves exactly once.
pub type AsyncValidatorFn =
    Arc<dyn Fn(FieldValue) -> BoxFuture<'static, Option<ValidationErrors>> + Send + Sync>;

/// Wrap a closure as a [`ValidatorFn`].
pub fn validator<F>(f: F) -> ValidatorFn
where
    F: Fn(&FieldValue) -> Option<ValidationErrors> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap an async closure as an [`AsyncValidatorFn`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reform::validation::{async_validator, ValidationErrors};
///
/// let taken = async_validator(|value| async move {
///     tokio::time::sleep(Duration::from_millis(10)).await;
///     (value.as_str() == Some("admin")).then(|| ValidationErrors::single("taken"))
/// });
/// # let _ = taken;
/// ```
pub fn async_validator<F, Fut>(f: F) -> AsyncValidatorFn
where
    F: Fn(FieldValue) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<ValidationErrors>> + Send + 'static,
{
    Arc::new(move |value| Box::pin(f(value)))
}

/// Run every sync validator and merge the failures.
pub fn run_validators(validators: &[ValidatorFn], value: &FieldValue) -> Option<ValidationErrors> {
    ValidationErrors::merge_all(validators.iter().map(|validate| validate(value)))
}

/// Run every async validator concurrently and merge the failures.
pub async fn run_async_validators(
    validators: &[AsyncValidatorFn],
    value: FieldValue,
) -> Option<ValidationErrors> {
    let checks = validators.iter().map(|validate| validate(value.clone()));
    ValidationErrors::merge_all(futures::future::join_all(checks).await)
}
