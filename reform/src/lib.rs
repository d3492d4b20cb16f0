//! Reactive form model.
//!
//! A form is a tree of [`FormGroup`]s, [`FormArray`]s and leaf
//! [`FormControl`]s. Controls carry sync and async validators (see
//! [`validation`]); groups and arrays derive their status from their
//! children. [`FormSnapshot`] captures a whole tree for submission.

pub mod control;
pub mod error;
pub mod snapshot;
pub mod state;
pub mod status;
pub mod validation;
pub mod value;

pub use control::{
    AbstractControl, ControlId, FormArray, FormControl, FormControlBuilder, FormGroup,
};
pub use error::FormError;
pub use snapshot::FormSnapshot;
pub use state::State;
pub use status::ControlStatus;
pub use value::FieldValue;

pub mod prelude {
    pub use crate::control::{AbstractControl, FormArray, FormControl, FormGroup};
    pub use crate::error::FormError;
    pub use crate::snapshot::FormSnapshot;
    pub use crate::state::State;
    pub use crate::status::ControlStatus;
    pub use crate::validation::{self, AsyncValidatorFn, ValidationErrors, ValidatorFn};
    pub use crate::value::FieldValue;
}
