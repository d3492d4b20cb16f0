/// Errors raised by form operations.
///
/// Field validity is never reported through this type; failed validators
/// produce [`ValidationErrors`](crate::validation::ValidationErrors) on the
/// control instead.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Async validation had to start but no tokio runtime was available.
    #[error("async validation for control {control} requires a tokio runtime")]
    NoRuntime { control: String },

    /// No control exists at the given path.
    #[error("no control at path '{0}'")]
    UnknownPath(String),

    /// A control exists at the path but has a different kind.
    #[error("control at '{path}' is a {actual}, expected a {expected}")]
    KindMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A pattern validator was built from an invalid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl FormError {
    /// Creates a kind mismatch error.
    pub fn kind_mismatch(
        path: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::KindMismatch {
            path: path.into(),
            expected,
            actual,
        }
    }
}
