//! Form domain layer
//!
//! Type-safe form handling for the province create page: field value
//! objects, the editable form state and the background submission helper.

mod field;
mod form_state;
mod submitter;

pub use field::{CountrySelect, FormField};
pub use form_state::{
    FieldErrors, FieldName, Focus, Form, FormButton, ProvinceCreateForm, ProvinceForm,
    REQUIRED_HINT,
};
pub use submitter::FormSubmitter;
