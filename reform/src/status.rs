use serde::Serialize;

/// Validation status of a control or of an aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlStatus {
    /// All validators passed.
    #[default]
    Valid,
    /// At least one validator reported a failure.
    Invalid,
    /// Sync validators passed and async validators have not resolved yet.
    Pending,
}

impl ControlStatus {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    pub fn is_invalid(self) -> bool {
        self == Self::Invalid
    }

    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    /// Combine the statuses of a group's children.
    ///
    /// Any invalid child makes the aggregate invalid; otherwise any pending
    /// child makes it pending. An empty aggregate is valid.
    pub fn aggregate(statuses: impl IntoIterator<Item = ControlStatus>) -> Self {
        let mut pending = false;
        for status in statuses {
            match status {
                Self::Invalid => return Self::Invalid,
                Self::Pending => pending = true,
                Self::Valid => {}
            }
        }
        if pending { Self::Pending } else { Self::Valid }
    }
}

impl std::fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
            Self::Pending => "PENDING",
        };
        f.write_str(label)
    }
}
