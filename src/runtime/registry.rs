//! Element registry: unique names bound to views and bounds.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::geom::Bounds;
use crate::error::UiError;
use crate::runtime::view::{View, ViewRc};

pub(crate) struct Element {
    pub(crate) bounds: Bounds,
    pub(crate) view: ViewRc,
}

/// Additive-only map from element name to view. Iteration order is unspecified.
#[derive(Default)]
pub(crate) struct ElementRegistry {
    elements: HashMap<String, Element>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new element with zero bounds. Rejects duplicates without touching the map.
    pub fn insert(&mut self, name: &str, view: Box<dyn View>) -> Result<ViewRc, UiError> {
        if self.elements.contains_key(name) {
            return Err(UiError::duplicate_name(name));
        }
        let view: ViewRc = Rc::new(RefCell::new(view));
        self.elements.insert(
            name.to_owned(),
            Element {
                bounds: Bounds::default(),
                view: Rc::clone(&view),
            },
        );
        Ok(view)
    }

    /// Replace the stored bounds, returning the view to notify.
    pub fn set_bounds(&mut self, name: &str, bounds: Bounds) -> Result<ViewRc, UiError> {
        let element = self
            .elements
            .get_mut(name)
            .ok_or_else(|| UiError::unknown_element(name))?;
        element.bounds = bounds;
        Ok(Rc::clone(&element.view))
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    pub fn view(&self, name: &str) -> Option<ViewRc> {
        self.get(name).map(|element| Rc::clone(&element.view))
    }

    pub fn bounds(&self, name: &str) -> Option<Bounds> {
        self.get(name).map(|element| element.bounds)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.elements.keys().cloned().collect()
    }

    /// Snapshot of every view so hooks can run without holding the registry borrowed.
    pub fn views(&self) -> Vec<ViewRc> {
        self.elements
            .values()
            .map(|element| Rc::clone(&element.view))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
