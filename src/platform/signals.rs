//! SIGINT/SIGTERM wired to the controller's close signal.

use std::io;
use std::thread::{self, JoinHandle};

use signal_hook::iterator::Signals;
use signal_hook::low_level;

use crate::runtime::UiHandle;

/// Unregisters the signal listener and joins its thread on drop.
pub struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl std::fmt::Debug for SignalGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalGuard")
            .field("closed", &self.handle.is_closed())
            .finish()
    }
}

/// Close the controller behind `ui` when the process receives SIGINT or SIGTERM.
///
/// Installing the listener replaces the default action for both signals. The first signal
/// raises close. When close cannot take effect (the backend is not initialized) or was
/// already raised (a second Ctrl-C, or `run` has returned), the signal's default action
/// runs instead, so the process still terminates.
pub fn install_close_on_signal(ui: UiHandle) -> io::Result<SignalGuard> {
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])?;
    let handle = signals.handle();

    let thread = thread::Builder::new()
        .name("uiterm-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                tracing::info!(signal, "termination signal received");
                if !close_or_fall_through(&ui) {
                    tracing::warn!(signal, "close not possible; running default signal action");
                    if let Err(err) = low_level::emulate_default_handler(signal) {
                        tracing::error!(signal, %err, "default signal action failed");
                    }
                }
            }
        })?;

    Ok(SignalGuard {
        handle,
        thread: Some(thread),
    })
}

/// Raise close unless it is already raised or cannot be. Returns whether the signal was
/// consumed by the close.
fn close_or_fall_through(ui: &UiHandle) -> bool {
    !ui.is_closed() && ui.close()
}
