//! Thread-safe handle for posting events and closing the controller.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::backend::Backend;
use crate::core::key::{Key, Modifier};
use crate::runtime::wake::{UiEvent, UiWake};

pub(crate) type SharedBackend = Arc<Mutex<Box<dyn Backend + Send>>>;

pub(crate) fn lock_backend(backend: &SharedBackend) -> MutexGuard<'_, Box<dyn Backend + Send>> {
    match backend.lock() {
        Ok(backend) => backend,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// `Send + Sync` handle to a [`crate::Ui`].
///
/// Events posted here are dispatched on the thread blocked in [`crate::Ui::run`], in the
/// order they were sent. Posting returns `false` once close has been requested.
#[derive(Clone)]
pub struct UiHandle {
    wake: Arc<UiWake>,
    backend: SharedBackend,
}

impl UiHandle {
    pub(crate) fn new(wake: Arc<UiWake>, backend: SharedBackend) -> Self {
        Self { wake, backend }
    }

    pub fn send(&self, event: UiEvent) -> bool {
        self.wake.enqueue(event)
    }

    pub fn character(&self, ch: char) -> bool {
        self.send(UiEvent::Character(ch))
    }

    pub fn key(&self, modifier: Modifier, key: Key) -> bool {
        self.send(UiEvent::Key(modifier, key))
    }

    pub fn resize(&self, width: i32, height: i32) -> bool {
        self.send(UiEvent::Resize { width, height })
    }

    pub fn request_refresh(&self) -> bool {
        self.send(UiEvent::Refresh)
    }

    pub fn set_active(&self, name: impl Into<String>) -> bool {
        self.send(UiEvent::SetActive(name.into()))
    }

    /// Raise the close signal if the backend is initialized; otherwise do nothing.
    ///
    /// Returns whether the signal is raised, including by an earlier call.
    pub fn close(&self) -> bool {
        if !lock_backend(&self.backend).is_initialized() {
            tracing::debug!("close ignored: backend not initialized");
            return false;
        }
        self.wake.request_close();
        tracing::debug!("close requested");
        true
    }

    pub fn is_closed(&self) -> bool {
        self.wake.is_close_requested()
    }
}

impl std::fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{SharedBackend, UiHandle};
    use crate::render::MemoryBackend;
    use crate::runtime::wake::{UiEvent, UiWake};
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn handle_for(backend: &MemoryBackend) -> (UiHandle, Arc<UiWake>) {
        let wake = Arc::new(UiWake::default());
        let shared: SharedBackend = Arc::new(Mutex::new(Box::new(backend.clone())));
        (UiHandle::new(Arc::clone(&wake), shared), wake)
    }

    #[test]
    fn close_before_backend_init_is_ignored() {
        let backend = MemoryBackend::new(10, 2);
        let (handle, wake) = handle_for(&backend);

        assert!(!handle.close());
        assert!(!handle.is_closed());
        assert!(!wake.is_close_requested());

        backend.init();
        assert!(handle.close());
        assert!(handle.close());
        assert!(handle.is_closed());
    }

    #[test]
    fn events_cross_threads_in_order() {
        let backend = MemoryBackend::new(10, 2);
        let (handle, wake) = handle_for(&backend);

        let sender = handle.clone();
        thread::spawn(move || {
            sender.character('a');
            sender.resize(100, 40);
            sender.request_refresh();
        })
        .join()
        .expect("sender panicked");

        let batch = wake.wait();
        assert_eq!(
            batch.events,
            vec![
                UiEvent::Character('a'),
                UiEvent::Resize {
                    width: 100,
                    height: 40
                },
                UiEvent::Refresh,
            ]
        );
    }
}
