//! Active-element slot.
//!
//! The slot holds the active element by name; the registry owns the element. Transitions are
//! planned here and executed by the controller in deactivate-then-activate order.

#[derive(Debug, Default)]
pub(crate) struct FocusState {
    active: Option<String>,
}

/// Hooks to run for one focus change, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FocusTransition {
    /// Previously active element, when it differs from the target.
    pub deactivate: Option<String>,
    /// Target element, when it exists (also when it was already active).
    pub activate: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Plan a change to `target`; `None` means the requested element does not exist.
    pub fn plan(&self, target: Option<&str>) -> FocusTransition {
        let deactivate = match (self.active.as_deref(), target) {
            (Some(prev), Some(next)) if prev == next => None,
            (prev, _) => prev.map(str::to_owned),
        };
        FocusTransition {
            deactivate,
            activate: target.map(str::to_owned),
        }
    }

    pub fn commit(&mut self, target: Option<String>) {
        self.active = target;
    }
}
