use reform::FormError;

/// Error type for signup form operations.
///
/// Invalid field values are not errors; they show up as validation
/// failures on the affected controls.
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("invalid signup config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read signup config: {0}")]
    Io(#[from] std::io::Error),
}
