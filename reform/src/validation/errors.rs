use std::collections::BTreeMap;

use serde::Serialize;

/// Failure reasons reported by validators, keyed by reason name.
///
/// Simple reasons (`required`, `email`) carry `true`; reasons with context
/// such as `minlength` carry a JSON object describing the failure.
///
/// A `ValidationErrors` is never empty once handed out by a validator:
/// validators signal success by returning `None`, not an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    reasons: BTreeMap<String, serde_json::Value>,
}

impl ValidationErrors {
    /// Errors holding a single plain reason.
    pub fn single(key: impl Into<String>) -> Self {
        Self::with_detail(key, serde_json::Value::Bool(true))
    }

    /// Errors holding a single reason with detail.
    pub fn with_detail(key: impl Into<String>, detail: serde_json::Value) -> Self {
        let mut reasons = BTreeMap::new();
        reasons.insert(key.into(), detail);
        Self { reasons }
    }

    /// Check if a reason is present.
    pub fn contains(&self, key: &str) -> bool {
        self.reasons.contains_key(key)
    }

    /// Get the detail recorded for a reason.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.reasons.get(key)
    }

    /// Reason names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reasons.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Fold another set of reasons into this one.
    ///
    /// On a key collision the later detail wins.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.reasons.extend(other.reasons);
    }

    /// Merge a batch of optional validator outputs.
    ///
    /// Returns `None` when no validator failed.
    pub fn merge_all(results: impl IntoIterator<Item = Option<ValidationErrors>>) -> Option<Self> {
        let mut merged: Option<ValidationErrors> = None;
        for errors in results.into_iter().flatten() {
            match merged.as_mut() {
                Some(acc) => acc.merge(errors),
                None => merged = Some(errors),
            }
        }
        merged.filter(|errors| !errors.is_empty())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.keys().collect();
        write!(f, "{{{}}}", keys.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_all_none_when_everything_passes() {
        assert_eq!(ValidationErrors::merge_all([None, None]), None);
        assert_eq!(ValidationErrors::merge_all([]), None);
    }

    #[test]
    fn test_merge_all_keeps_every_reason() {
        let merged = ValidationErrors::merge_all([
            Some(ValidationErrors::single("required")),
            None,
            Some(ValidationErrors::single("email")),
        ])
        .unwrap();

        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["email", "required"]);
        assert_eq!(merged.to_string(), "{email, required}");
    }

    #[test]
    fn test_serializes_as_map() {
        let errors = ValidationErrors::single("nameIsForbidden");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "nameIsForbidden": true })
        );
    }
}
