//! Platform-specific integrations.

#[cfg(unix)]
pub mod signals;

#[cfg(unix)]
pub use signals::{install_close_on_signal, SignalGuard};
