//! Global key listeners.

use std::collections::HashMap;
use std::rc::Rc;

use crate::core::key::Key;
use crate::runtime::ui::Ui;

/// Callback run for every matching key event before the active view sees it.
pub type KeyListener = Rc<dyn Fn(&Ui, Key)>;

#[derive(Default)]
pub(crate) struct KeyListeners {
    by_key: HashMap<Key, Vec<KeyListener>>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: Key, listener: KeyListener) {
        self.by_key.entry(key.normalized()).or_default().push(listener);
    }

    /// Listeners for `key` in registration order.
    ///
    /// Returned as a snapshot: listeners added while dispatching fire from the next event.
    pub fn for_key(&self, key: Key) -> Vec<KeyListener> {
        self.by_key.get(&key.normalized()).cloned().unwrap_or_default()
    }

    pub fn len(&self, key: Key) -> usize {
        self.by_key.get(&key.normalized()).map_or(0, Vec::len)
    }
}
