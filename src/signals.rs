//! Interrupt handling
//!
//! A terminal break key must not kill the interpreter; it only causes the
//! prompt to be redrawn. The handler records the interrupt in an atomic
//! flag which the read loop checks at its single suspension point, so
//! nothing is written from signal context.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the Ctrl-C handler. Call once at startup.
pub fn install() {
    if let Err(err) = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst)) {
        log::warn!("could not install interrupt handler: {}", err);
    }
}

/// Check whether an interrupt arrived since the last call, clearing the flag.
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
