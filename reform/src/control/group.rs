use std::collections::BTreeMap;
use std::sync::Arc;

use super::{AbstractControl, FormArray, FormControl};
use crate::error::FormError;
use crate::snapshot::FormSnapshot;
use crate::status::ControlStatus;
use crate::validation::ValidationErrors;

/// A fixed set of named children.
///
/// The shape of a group is decided when it is built; children keep their own
/// state, so cloning a group clones handles, not values. Status is derived
/// from the children on every read.
///
/// # Example
///
/// ```
/// use reform::{FormControl, FormGroup};
///
/// let form = FormGroup::new()
///     .with("userData", FormGroup::new().with("username", FormControl::new("Max")))
///     .with("gender", FormControl::new("male"));
///
/// let username = form.control("userData.username").unwrap();
/// assert_eq!(username.value().as_str(), Some("Max"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormGroup {
    controls: Arc<Vec<(String, AbstractControl)>>,
}

impl FormGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child, replacing any existing child with the same name.
    pub fn with(mut self, name: impl Into<String>, control: impl Into<AbstractControl>) -> Self {
        let name = name.into();
        let control = control.into();
        let controls = Arc::make_mut(&mut self.controls);
        match controls.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = control,
            None => controls.push((name, control)),
        }
        self
    }

    /// Children in insertion order.
    pub fn controls(&self) -> impl Iterator<Item = (&str, &AbstractControl)> {
        self.controls
            .iter()
            .map(|(name, control)| (name.as_str(), control))
    }

    /// Child names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(name, _)| name.as_str())
    }

    /// Get a direct child by name.
    pub fn child(&self, name: &str) -> Option<&AbstractControl> {
        self.controls
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, control)| control)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Resolve a dot-separated path below this group.
    pub fn get(&self, path: &str) -> Option<AbstractControl> {
        AbstractControl::from(self.clone()).get(path)
    }

    /// Resolve a path that must lead to a leaf control.
    pub fn control(&self, path: &str) -> Result<FormControl, FormError> {
        match self.resolve(path)? {
            AbstractControl::Control(control) => Ok(control),
            other => Err(FormError::kind_mismatch(path, "control", other.kind())),
        }
    }

    /// Resolve a path that must lead to a nested group.
    pub fn group(&self, path: &str) -> Result<FormGroup, FormError> {
        match self.resolve(path)? {
            AbstractControl::Group(group) => Ok(group),
            other => Err(FormError::kind_mismatch(path, "group", other.kind())),
        }
    }

    /// Resolve a path that must lead to an array.
    pub fn array(&self, path: &str) -> Result<FormArray, FormError> {
        match self.resolve(path)? {
            AbstractControl::Array(array) => Ok(array),
            other => Err(FormError::kind_mismatch(path, "array", other.kind())),
        }
    }

    fn resolve(&self, path: &str) -> Result<AbstractControl, FormError> {
        self.get(path)
            .ok_or_else(|| FormError::UnknownPath(path.to_string()))
    }

    pub fn status(&self) -> ControlStatus {
        ControlStatus::aggregate(self.controls.iter().map(|(_, control)| control.status()))
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

    /// The group's values as a JSON object.
    pub fn value(&self) -> serde_json::Value {
        let map = self
            .controls
            .iter()
            .map(|(name, control)| (name.clone(), control.value()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    /// Errors of every invalid leaf, keyed by dotted path.
    pub fn errors_by_path(&self) -> BTreeMap<String, ValidationErrors> {
        AbstractControl::from(self.clone()).errors_by_path()
    }

    /// Capture values, aggregate status and errors in one read.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(&AbstractControl::from(self.clone()))
    }

    /// Wait for all outstanding async validation below this group.
    pub async fn settled(&self) -> ControlStatus {
        AbstractControl::from(self.clone()).settled().await
    }

    /// Mark every leaf as touched.
    pub fn mark_all_as_touched(&self) {
        AbstractControl::from(self.clone()).mark_all_as_touched();
    }
}
