//! Storefront Validation
//!
//! Pure field validation rules for storefront forms. Markup attributes are
//! read once into a typed [`FieldConstraints`] and checked against a field's
//! current value in a fixed order; the first failing rule wins.
//!
//! Used by the `storefront-forms` engine and by the WASM binding's
//! stateless `validateField` helper.

pub mod constraints;
pub mod email;
pub mod error;
pub mod rules;
pub mod string;

pub use constraints::{FieldAttributes, FieldConstraints, FieldKind, DEFAULT_FIELD_LABEL};
pub use email::is_valid_email;
pub use error::{ConstraintError, FieldError};
pub use rules::{check_field, Verdict};
pub use string::text_length;
