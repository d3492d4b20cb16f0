use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::error::FormError;
use crate::status::ControlStatus;
use crate::validation::{
    AsyncValidatorFn, ValidationErrors, ValidatorFn, run_async_validators, run_validators,
};
use crate::value::FieldValue;

/// Unique identifier for a FormControl instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl ControlId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__control_{}", self.0)
    }
}

/// Internal state for a FormControl
#[derive(Debug, Default)]
struct ControlInner {
    value: FieldValue,
    /// Failures from the latest completed validation, `None` when it passed
    errors: Option<ValidationErrors>,
    /// No user edit has happened yet
    pristine: bool,
    /// The user has visited (blurred) the control
    touched: bool,
    /// Bumped on every validation run; async results from older runs are dropped
    generation: u64,
}

/// A single form field with its validators.
///
/// `FormControl` is a handle: clones share the same value, errors and
/// status, so the view layer and the owning form can both hold one.
///
/// Every value change runs the sync validators immediately. When they all
/// pass and the control has async validators, the control turns
/// [`ControlStatus::Pending`] and the async validators run on the current
/// tokio runtime. Only the newest run may write its result back; a run that
/// finishes after a newer one started is discarded.
///
/// # Example
///
/// ```
/// use reform::{ControlStatus, FormControl};
/// use reform::validation::{self, keys};
///
/// # fn main() -> Result<(), reform::FormError> {
/// let username = FormControl::builder(None::<&str>)
///     .validator(validation::required())
///     .build()?;
/// assert!(username.has_error(keys::REQUIRED));
///
/// username.set_value("Max")?;
/// assert_eq!(username.status(), ControlStatus::Valid);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FormControl {
    id: ControlId,
    inner: Arc<RwLock<ControlInner>>,
    validators: Arc<[ValidatorFn]>,
    async_validators: Arc<[AsyncValidatorFn]>,
    status: Arc<watch::Sender<ControlStatus>>,
}

impl FormControl {
    /// Create a control without validators. It is always valid.
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self::with_validators(value.into(), Vec::new(), Vec::new())
    }

    /// Start building a control with validators.
    pub fn builder(value: impl Into<FieldValue>) -> FormControlBuilder {
        FormControlBuilder {
            value: value.into(),
            validators: Vec::new(),
            async_validators: Vec::new(),
        }
    }

    fn with_validators(
        value: FieldValue,
        validators: Vec<ValidatorFn>,
        async_validators: Vec<AsyncValidatorFn>,
    ) -> Self {
        let (status, _) = watch::channel(ControlStatus::Valid);
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(ControlInner {
                value,
                pristine: true,
                ..Default::default()
            })),
            validators: validators.into(),
            async_validators: async_validators.into(),
            status: Arc::new(status),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ControlInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ControlInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    /// Get the current value
    pub fn value(&self) -> FieldValue {
        self.read().value.clone()
    }

    /// Set a new value and revalidate.
    ///
    /// Fails only when async validation has to start outside a tokio
    /// runtime. The value and the sync result are stored either way, and the
    /// control is left [`ControlStatus::Invalid`] with no errors.
    pub fn set_value(&self, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into();
        log::debug!("{} <- {}", self.id, value);
        self.write().value = value;
        self.update_value_and_validity()
    }

    /// Rerun all validators against the current value.
    ///
    /// Useful after state captured by a validator (a blocklist, say) changed.
    pub fn update_value_and_validity(&self) -> Result<(), FormError> {
        let value = self.value();
        let errors = run_validators(&self.validators, &value);
        let needs_async = errors.is_none() && !self.async_validators.is_empty();
        let runtime = needs_async.then(Handle::try_current).and_then(Result::ok);

        // An async check that cannot start leaves the value unconfirmed.
        let status = match (&errors, needs_async, &runtime) {
            (Some(_), _, _) => ControlStatus::Invalid,
            (None, false, _) => ControlStatus::Valid,
            (None, true, Some(_)) => ControlStatus::Pending,
            (None, true, None) => ControlStatus::Invalid,
        };

        let generation = {
            let mut inner = self.write();
            inner.generation += 1;
            inner.errors = errors;
            self.status.send_replace(status);
            inner.generation
        };
        log::debug!("{} validated {} -> {} (run {})", self.id, value, status, generation);

        match runtime {
            Some(runtime) => {
                let control = self.clone();
                runtime.spawn(async move {
                    let errors = run_async_validators(&control.async_validators, value).await;
                    control.finish_async(generation, errors);
                });
                Ok(())
            }
            None if needs_async => {
                log::warn!("{} cannot run async validators outside a tokio runtime", self.id);
                Err(FormError::NoRuntime {
                    control: self.id.to_string(),
                })
            }
            None => Ok(()),
        }
    }

    fn finish_async(&self, generation: u64, errors: Option<ValidationErrors>) {
        let mut inner = self.write();
        if inner.generation != generation {
            log::debug!(
                "{} discarding async result of run {} (current run {})",
                self.id,
                generation,
                inner.generation
            );
            return;
        }

        let status = if errors.is_some() {
            ControlStatus::Invalid
        } else {
            ControlStatus::Valid
        };
        inner.errors = errors;
        self.status.send_replace(status);
        log::debug!("{} async validation run {} -> {}", self.id, generation, status);
    }

    /// Failures from the latest completed validation.
    ///
    /// `None` while valid or pending.
    pub fn errors(&self) -> Option<ValidationErrors> {
        self.read().errors.clone()
    }

    /// Check if a specific failure reason is present.
    pub fn has_error(&self, key: &str) -> bool {
        self.read()
            .errors
            .as_ref()
            .is_some_and(|errors| errors.contains(key))
    }

    pub fn status(&self) -> ControlStatus {
        *self.status.borrow()
    }

    pub fn is_valid(&self) -> bool {
        self.status().is_valid()
    }

    pub fn is_invalid(&self) -> bool {
        self.status().is_invalid()
    }

    pub fn is_pending(&self) -> bool {
        self.status().is_pending()
    }

    /// Subscribe to status transitions.
    pub fn status_changes(&self) -> watch::Receiver<ControlStatus> {
        self.status.subscribe()
    }

    /// Wait until no async validation is outstanding and return the status.
    pub async fn settled(&self) -> ControlStatus {
        let mut changes = self.status.subscribe();
        match changes.wait_for(|status| !status.is_pending()).await {
            Ok(status) => *status,
            Err(_) => self.status(),
        }
    }

    pub fn is_pristine(&self) -> bool {
        self.read().pristine
    }

    pub fn is_dirty(&self) -> bool {
        !self.is_pristine()
    }

    /// Record that the user edited the value.
    pub fn mark_as_dirty(&self) {
        self.write().pristine = false;
    }

    pub fn is_touched(&self) -> bool {
        self.read().touched
    }

    pub fn is_untouched(&self) -> bool {
        !self.is_touched()
    }

    /// Record that the user left the control.
    pub fn mark_as_touched(&self) {
        self.write().touched = true;
    }
}

impl std::fmt::Debug for FormControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("FormControl")
            .field("id", &self.id)
            .field("value", &inner.value)
            .field("status", &self.status())
            .field("errors", &inner.errors)
            .field("validators", &self.validators.len())
            .field("async_validators", &self.async_validators.len())
            .finish()
    }
}

/// Builder for a [`FormControl`] with validators.
pub struct FormControlBuilder {
    value: FieldValue,
    validators: Vec<ValidatorFn>,
    async_validators: Vec<AsyncValidatorFn>,
}

impl FormControlBuilder {
    /// Add a sync validator.
    pub fn validator(mut self, validator: ValidatorFn) -> Self {
        self.validators.push(validator);
        self
    }

    /// Add several sync validators.
    pub fn validators(mut self, validators: impl IntoIterator<Item = ValidatorFn>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Add an async validator.
    pub fn async_validator(mut self, validator: AsyncValidatorFn) -> Self {
        self.async_validators.push(validator);
        self
    }

    /// Build the control and run its initial validation.
    pub fn build(self) -> Result<FormControl, FormError> {
        let control =
            FormControl::with_validators(self.value, self.validators, self.async_validators);
        control.update_value_and_validity()?;
        Ok(control)
    }
}
