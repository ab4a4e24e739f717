//! Outside-click detection.
//!
//! [`attach`] registers a capture-phase listener on a [`ClickTarget`] that
//! calls back whenever a click lands outside a reference [`Node`]. The
//! returned [`ClickOutside`] owns the registration: [`ClickOutside::release`]
//! or dropping the handle removes it with the same options it was added with.

use crate::{
    events::{ClickTarget, ListenerOptions, Registration},
    types::Node,
};
use tracing::{debug, trace};

const OPTIONS: ListenerOptions = ListenerOptions::CAPTURE;

/// Calls `on_outside_click` for every click on `target` that `reference`
/// does not contain.
///
/// An absent or unset reference contains nothing, so every click counts as
/// outside. The callback runs synchronously during dispatch and may itself
/// dispatch further clicks on `target`.
pub fn attach<N, F>(target: &ClickTarget, reference: N, on_outside_click: F) -> ClickOutside
where
    N: Node + 'static,
    F: Fn() + 'static,
{
    let registration = target.add_listener(OPTIONS, move |event| {
        if !reference.contains(event.column, event.row) {
            trace!(column = event.column, row = event.row, "click outside");
            on_outside_click();
        }
    });

    debug!(listener = ?registration.id(), "click-outside watcher attached");

    ClickOutside {
        registration: Some(registration),
    }
}

/// Handle to an attached watcher. Attached until released or dropped.
#[derive(Debug)]
pub struct ClickOutside {
    registration: Option<Registration>,
}

impl ClickOutside {
    /// Detaches the watcher. Safe to call more than once, and after the
    /// target is gone.
    pub fn release(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.remove();
            debug!(listener = ?registration.id(), "click-outside watcher released");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.registration.is_some()
    }
}

impl Drop for ClickOutside {
    fn drop(&mut self) {
        self.release();
    }
}
