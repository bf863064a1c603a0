//! Cross-thread event queue and the single-shot close signal.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::core::key::{Key, Modifier};

/// Event delivered to the controller, usually by the input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Character(char),
    Key(Modifier, Key),
    Resize { width: i32, height: i32 },
    Refresh,
    SetActive(String),
}

#[derive(Default)]
struct WakeState {
    pending: VecDeque<UiEvent>,
    close_requested: bool,
}

/// Work handed back by [`UiWake::wait`].
#[derive(Debug, Default)]
pub(crate) struct WakeBatch {
    pub events: Vec<UiEvent>,
    pub close: bool,
}

#[derive(Default)]
pub(crate) struct UiWake {
    state: Mutex<WakeState>,
    cvar: Condvar,
}

impl UiWake {
    fn lock(&self) -> MutexGuard<'_, WakeState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue an event. Returns `false` once close has been requested.
    pub fn enqueue(&self, event: UiEvent) -> bool {
        let mut state = self.lock();
        if state.close_requested {
            return false;
        }
        state.pending.push_back(event);
        self.cvar.notify_one();
        true
    }

    /// Raise the close signal. Repeated requests are absorbed.
    pub fn request_close(&self) {
        let mut state = self.lock();
        state.close_requested = true;
        self.cvar.notify_all();
    }

    pub fn is_close_requested(&self) -> bool {
        self.lock().close_requested
    }

    /// Block until events are queued or close is requested, then drain everything queued.
    pub fn wait(&self) -> WakeBatch {
        let mut state = self.lock();
        while !state.close_requested && state.pending.is_empty() {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        WakeBatch {
            events: state.pending.drain(..).collect(),
            close: state.close_requested,
        }
    }
}
