use std::sync::{Arc, PoisonError, RwLock};

use super::AbstractControl;
use crate::status::ControlStatus;

/// An ordered, growable list of children.
///
/// Clones share the same list, so a control pushed through one handle is
/// visible through every other.
#[derive(Debug, Clone, Default)]
pub struct FormArray {
    controls: Arc<RwLock<Vec<AbstractControl>>>,
}

impl FormArray {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array from existing children.
    pub fn from_controls(controls: impl IntoIterator<Item = AbstractControl>) -> Self {
        Self {
            controls: Arc::new(RwLock::new(controls.into_iter().collect())),
        }
    }

    /// Append a child at the end.
    pub fn push(&self, control: impl Into<AbstractControl>) {
        let mut controls = self.controls.write().unwrap_or_else(PoisonError::into_inner);
        controls.push(control.into());
        log::debug!("form array grew to {} entries", controls.len());
    }

    /// Get the child at an index.
    pub fn at(&self, index: usize) -> Option<AbstractControl> {
        self.read(|controls| controls.get(index).cloned())
    }

    /// Handles to all children in order.
    pub fn controls(&self) -> Vec<AbstractControl> {
        self.read(<[AbstractControl]>::to_vec)
    }

    pub fn len(&self) -> usize {
        self.read(<[AbstractControl]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self) -> ControlStatus {
        self.read(|controls| ControlStatus::aggregate(controls.iter().map(AbstractControl::status)))
    }

    pub fn is_valid(&self) -> bool {
        self.status().is_valid()
    }

    /// The array's values as a JSON array.
    pub fn value(&self) -> serde_json::Value {
        serde_json::Value::Array(self.read(|controls| {
            controls.iter().map(AbstractControl::value).collect()
        }))
    }

    fn read<R>(&self, f: impl FnOnce(&[AbstractControl]) -> R) -> R {
        let controls = self.controls.read().unwrap_or_else(PoisonError::into_inner);
        f(&controls)
    }
}
