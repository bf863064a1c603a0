use thiserror::Error;

/// Registry errors returned by [`crate::Ui`].
///
/// Both are local and non-fatal: the registry is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("view '{name}' already exists")]
    DuplicateName { name: String },

    #[error("view '{name}' does not exist")]
    UnknownElement { name: String },
}

impl UiError {
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    #[must_use]
    pub fn unknown_element(name: impl Into<String>) -> Self {
        Self::UnknownElement { name: name.into() }
    }
}

/// Returned when a key identifier string names no known [`crate::Key`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key id '{input}'")]
pub struct ParseKeyError {
    input: String,
}

impl ParseKeyError {
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
