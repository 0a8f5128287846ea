//! Per-field UI state

/// What a field currently shows beneath it.
///
/// A field is in exactly one state at a time; moving into one retires the
/// others, so an error message and the success marker never coexist and a
/// field never carries two error messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Neutral,
    Error(String),
    Success,
}

impl FieldState {
    pub fn is_error(&self) -> bool {
        matches!(self, FieldState::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FieldState::Success)
    }

    /// The inline message, when in error
    pub fn message(&self) -> Option<&str> {
        match self {
            FieldState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Position of a validated field in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}
