use std::collections::BTreeMap;

use serde::Serialize;

use crate::control::AbstractControl;
use crate::status::ControlStatus;
use crate::validation::ValidationErrors;

/// A point-in-time copy of a form: values, aggregate status and the
/// failure reasons of every invalid field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub value: serde_json::Value,
    pub status: ControlStatus,
    /// Keyed by dotted path, e.g. `userData.email` or `hobbies.0`.
    pub errors: BTreeMap<String, ValidationErrors>,
}

impl FormSnapshot {
    /// Read the current state below a node.
    pub fn capture(root: &AbstractControl) -> Self {
        Self {
            value: root.value(),
            status: root.status(),
            errors: root.errors_by_path(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Failure reasons recorded for a path, if any.
    pub fn errors_at(&self, path: &str) -> Option<&ValidationErrors> {
        self.errors.get(path)
    }

    /// Serialise to a single-line JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
