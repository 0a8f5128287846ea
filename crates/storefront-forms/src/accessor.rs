//! The form capability the validator is given
//!
//! The engine never touches a document directly. A host (the browser
//! binding, or [`MemoryForm`](crate::memory::MemoryForm)) implements
//! [`FormAccessor`] over one form element and [`FormHost`] over the page
//! that contains it.

use crate::state::{FieldId, FieldState};
use storefront_validation::FieldAttributes;

/// Access to one bound form
///
/// Fields are the controls flagged for validation (`data-validate`), in
/// document order; `FieldId::new(i)` refers to the `i`-th entry returned by
/// [`validated_fields`](Self::validated_fields). Hosts snapshot that set
/// when the accessor is created.
pub trait FormAccessor {
    /// Validation attributes of every tracked field
    fn validated_fields(&self) -> Vec<FieldAttributes>;

    /// Current raw value of a tracked field
    fn value(&self, field: FieldId) -> String;

    /// Current raw value of the first control in the form with this name,
    /// tracked or not
    fn value_of(&self, name: &str) -> Option<String>;

    /// Make the field's inline indicators match `state` exactly
    fn render(&self, field: FieldId, state: &FieldState);

    /// Smooth-scroll the field to the center of the viewport
    fn scroll_into_view(&self, field: FieldId);

    /// Every named control's name/value pair, in document order
    fn entries(&self) -> Vec<(String, String)>;

    /// Clear all field values
    fn reset(&self);

    /// A form-level attribute such as `data-success-message`
    fn attribute(&self, name: &str) -> Option<String>;

    /// Label of the submit control, or `None` when the form has none
    fn submit_label(&self) -> Option<String>;

    /// Disable or enable the submit control and set its label
    fn set_submit_control(&self, disabled: bool, label: &str);
}

/// A page that forms can be located in
pub trait FormHost {
    type Form: FormAccessor;

    fn form(&self, id: &str) -> Option<Self::Form>;
}
