//! The form model tree: controls, groups and arrays.

mod array;
mod field;
mod group;

use std::collections::BTreeMap;

pub use array::FormArray;
pub use field::{ControlId, FormControl, FormControlBuilder};
pub use group::FormGroup;

use crate::status::ControlStatus;
use crate::validation::ValidationErrors;

/// Any node in a form model.
#[derive(Debug, Clone)]
pub enum AbstractControl {
    Control(FormControl),
    Group(FormGroup),
    Array(FormArray),
}

impl AbstractControl {
    /// Name of the node kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Control(_) => "control",
            Self::Group(_) => "group",
            Self::Array(_) => "array",
        }
    }

    pub fn status(&self) -> ControlStatus {
        match self {
            Self::Control(control) => control.status(),
            Self::Group(group) => group.status(),
            Self::Array(array) => array.status(),
        }
    }

    /// The value tree below this node as JSON.
    pub fn value(&self) -> serde_json::Value {
        match self {
            Self::Control(control) => control.value().to_json(),
            Self::Group(group) => group.value(),
            Self::Array(array) => array.value(),
        }
    }

    pub fn as_control(&self) -> Option<&FormControl> {
        match self {
            Self::Control(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&FormGroup> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&FormArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Look up a direct child: a name for groups, an index for arrays.
    pub fn child(&self, segment: &str) -> Option<AbstractControl> {
        match self {
            Self::Control(_) => None,
            Self::Group(group) => group.child(segment).cloned(),
            Self::Array(array) => segment.parse().ok().and_then(|index| array.at(index)),
        }
    }

    /// Resolve a dot-separated path such as `"userData.email"` or `"hobbies.0"`.
    ///
    /// The empty path resolves to this node. Any other empty segment, as in
    /// `"userData..email"` or `".userData"`, resolves to nothing.
    pub fn get(&self, path: &str) -> Option<AbstractControl> {
        if path.is_empty() {
            return Some(self.clone());
        }
        path.split('.').try_fold(self.clone(), |node, segment| node.child(segment))
    }

    /// Every leaf control below this node, in display order.
    pub fn leaves(&self) -> Vec<FormControl> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, out: &mut Vec<FormControl>) {
        match self {
            Self::Control(control) => out.push(control.clone()),
            Self::Group(group) => {
                for (_, child) in group.controls() {
                    child.collect_leaves(out);
                }
            }
            Self::Array(array) => {
                for child in array.controls() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Errors of every invalid leaf, keyed by dotted path from this node.
    pub fn errors_by_path(&self) -> BTreeMap<String, ValidationErrors> {
        let mut out = BTreeMap::new();
        self.collect_errors("", &mut out);
        out
    }

    fn collect_errors(&self, prefix: &str, out: &mut BTreeMap<String, ValidationErrors>) {
        match self {
            Self::Control(control) => {
                if let Some(errors) = control.errors() {
                    out.insert(prefix.to_string(), errors);
                }
            }
            Self::Group(group) => {
                for (name, child) in group.controls() {
                    child.collect_errors(&join_path(prefix, name), out);
                }
            }
            Self::Array(array) => {
                for (index, child) in array.controls().iter().enumerate() {
                    child.collect_errors(&join_path(prefix, &index.to_string()), out);
                }
            }
        }
    }

    /// Wait until no leaf below this node has async validation outstanding.
    pub async fn settled(&self) -> ControlStatus {
        for leaf in self.leaves() {
            leaf.settled().await;
        }
        self.status()
    }

    /// Mark every leaf as touched.
    pub fn mark_all_as_touched(&self) {
        for leaf in self.leaves() {
            leaf.mark_as_touched();
        }
    }
}

impl From<FormControl> for AbstractControl {
    fn from(control: FormControl) -> Self {
        Self::Control(control)
    }
}

impl From<FormGroup> for AbstractControl {
    fn from(group: FormGroup) -> Self {
        Self::Group(group)
    }
}

impl From<FormArray> for AbstractControl {
    fn from(array: FormArray) -> Self {
        Self::Array(array)
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "userData"), "userData");
        assert_eq!(join_path("userData", "email"), "userData.email");
        assert_eq!(join_path("hobbies", "0"), "hobbies.0");
    }
}
