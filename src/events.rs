//! Global click dispatch.
//!
//! [`ClickTarget`] stands in for the host's window-level event target. Terminal
//! mouse events are turned into [`ClickEvent`]s and dispatched through it in
//! two phases: capture listeners run before the clicked element's own handler,
//! bubble listeners after it. The element's handler can stop propagation,
//! which keeps the bubble listeners from seeing the click but never the
//! capture listeners.

use crossterm::event::MouseButton;
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub column: u16,
    pub row: u16,
    pub button: MouseButton,
    stopped: Cell<bool>,
}

impl ClickEvent {
    pub fn new(column: u16, row: u16, button: MouseButton) -> Self {
        Self {
            column,
            row,
            button,
            stopped: Cell::new(false),
        }
    }

    pub fn left(column: u16, row: u16) -> Self {
        Self::new(column, row, MouseButton::Left)
    }

    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Options a listener is registered with. Removal has to pass the same
/// `capture` flag or the listener stays put.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
}

impl ListenerOptions {
    pub const CAPTURE: Self = Self { capture: true };
    pub const BUBBLE: Self = Self { capture: false };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<dyn Fn(&ClickEvent)>;

struct Listener {
    id: ListenerId,
    capture: bool,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Inner {
    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|listener| listener.id == id)
    }
}

/// Shared handle to the global click target. Clones refer to the same
/// listener list.
#[derive(Clone, Default)]
pub struct ClickTarget(Rc<RefCell<Inner>>);

impl fmt::Debug for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ClickTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &self,
        options: ListenerOptions,
        handler: impl Fn(&ClickEvent) + 'static,
    ) -> Registration {
        let mut inner = self.0.borrow_mut();

        let id = ListenerId(inner.next_id);
        inner.next_id += 1;

        inner.listeners.push(Listener {
            id,
            capture: options.capture,
            handler: Rc::new(handler),
        });

        Registration {
            id,
            options,
            target: Rc::downgrade(&self.0),
        }
    }

    /// Removes the listener matching both `id` and `options.capture`.
    /// Returns false, and changes nothing, if there is no such listener.
    pub fn remove_listener(&self, id: ListenerId, options: ListenerOptions) -> bool {
        remove(&self.0, id, options)
    }

    pub fn listener_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    /// Dispatches a click that hit no element with a handler of its own.
    pub fn dispatch(&self, event: &ClickEvent) {
        self.dispatch_to(event, |_| ());
    }

    /// Dispatches a click whose target element handles it with `on_target`.
    pub fn dispatch_to(&self, event: &ClickEvent, on_target: impl FnOnce(&ClickEvent)) {
        trace!(column = event.column, row = event.row, "dispatching click");

        self.run_phase(event, true);

        if event.propagation_stopped() {
            return;
        }

        on_target(event);

        if event.propagation_stopped() {
            trace!("propagation stopped at target");
            return;
        }

        self.run_phase(event, false);
    }

    fn run_phase(&self, event: &ClickEvent, capture: bool) {
        // Snapshot first so handlers are free to add or remove listeners
        let snapshot: Vec<(ListenerId, Handler)> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.capture == capture)
            .map(|listener| (listener.id, listener.handler.clone()))
            .collect();

        for (id, handler) in snapshot {
            // Removed by an earlier handler in this dispatch
            if !self.0.borrow().is_registered(id) {
                continue;
            }

            handler(event);
        }
    }
}

fn remove(inner: &RefCell<Inner>, id: ListenerId, options: ListenerOptions) -> bool {
    let mut inner = inner.borrow_mut();

    let position = inner
        .listeners
        .iter()
        .position(|listener| listener.id == id && listener.capture == options.capture);

    match position {
        Some(index) => {
            // Dropping the handler can run arbitrary Drop code, so release
            // the borrow first
            let listener = inner.listeners.remove(index);
            drop(inner);
            drop(listener);
            true
        }
        None => false,
    }
}

/// A listener's id together with the options it was registered with, so
/// removing it always uses the right phase.
pub struct Registration {
    id: ListenerId,
    options: ListenerOptions,
    target: Weak<RefCell<Inner>>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("options", &self.options)
            .finish()
    }
}

impl Registration {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn options(&self) -> ListenerOptions {
        self.options
    }

    /// Removes the listener. A no-op if it is already gone or the target
    /// has been dropped.
    pub fn remove(&self) -> bool {
        match self.target.upgrade() {
            Some(inner) => remove(&inner, self.id, self.options),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder() -> (Log, impl Fn(&'static str) -> Box<dyn Fn(&ClickEvent)>) {
        let log = Rc::new(RefCell::new(vec![]));
        let make = {
            let log = log.clone();
            move |name: &'static str| -> Box<dyn Fn(&ClickEvent)> {
                let log = log.clone();
                Box::new(move |_: &ClickEvent| log.borrow_mut().push(name))
            }
        };
        (log, make)
    }

    #[test]
    fn test_capture_runs_before_target_and_bubble() {
        let target = ClickTarget::new();
        let (log, make) = recorder();

        let _bubble = target.add_listener(ListenerOptions::BUBBLE, make("bubble"));
        let _capture = target.add_listener(ListenerOptions::CAPTURE, make("capture"));

        let on_target = make("target");
        target.dispatch_to(&ClickEvent::left(1, 1), |event| on_target(event));

        assert_eq!(*log.borrow(), vec!["capture", "target", "bubble"]);
    }

    #[test]
    fn test_stop_propagation_at_target_skips_bubble_only() {
        let target = ClickTarget::new();
        let (log, make) = recorder();

        let _bubble = target.add_listener(ListenerOptions::BUBBLE, make("bubble"));
        let _capture = target.add_listener(ListenerOptions::CAPTURE, make("capture"));

        target.dispatch_to(&ClickEvent::left(1, 1), |event| event.stop_propagation());

        assert_eq!(*log.borrow(), vec!["capture"]);
    }

    #[test]
    fn test_remove_with_mismatched_capture_flag_keeps_listener() {
        let target = ClickTarget::new();
        let (log, make) = recorder();

        let registration = target.add_listener(ListenerOptions::CAPTURE, make("capture"));

        assert!(!target.remove_listener(registration.id(), ListenerOptions::BUBBLE));
        assert_eq!(target.listener_count(), 1);

        target.dispatch(&ClickEvent::left(0, 0));
        assert_eq!(log.borrow().len(), 1);

        assert!(target.remove_listener(registration.id(), registration.options()));
        assert_eq!(target.listener_count(), 0);
    }

    #[test]
    fn test_registration_remove_is_idempotent() {
        let target = ClickTarget::new();
        let registration = target.add_listener(ListenerOptions::CAPTURE, |_| ());

        assert!(registration.remove());
        assert!(!registration.remove());
        assert_eq!(target.listener_count(), 0);
    }

    #[test]
    fn test_registration_outlives_target() {
        let target = ClickTarget::new();
        let registration = target.add_listener(ListenerOptions::BUBBLE, |_| ());

        drop(target);

        assert!(!registration.remove());
    }

    #[test]
    fn test_listener_removed_mid_dispatch_is_skipped() {
        let target = ClickTarget::new();
        let (log, make) = recorder();

        let second: Rc<RefCell<Option<Registration>>> = Rc::new(RefCell::new(None));

        let _first = {
            let second = second.clone();
            let log = log.clone();
            target.add_listener(ListenerOptions::CAPTURE, move |_| {
                log.borrow_mut().push("first");
                if let Some(registration) = second.borrow().as_ref() {
                    registration.remove();
                }
            })
        };
        *second.borrow_mut() = Some(target.add_listener(ListenerOptions::CAPTURE, make("second")));

        target.dispatch(&ClickEvent::left(0, 0));

        assert_eq!(*log.borrow(), vec!["first"]);
        assert_eq!(target.listener_count(), 1);
    }

    #[test]
    fn test_listener_added_mid_dispatch_waits_for_next_click() {
        let target = ClickTarget::new();
        let count = Rc::new(Cell::new(0));

        let _adder = {
            let handle = target.clone();
            let count = count.clone();
            target.add_listener(ListenerOptions::CAPTURE, move |_| {
                let count = count.clone();
                // Leaked on purpose: registrations don't remove on drop
                let _ = handle.add_listener(ListenerOptions::CAPTURE, move |_| {
                    count.set(count.get() + 1)
                });
            })
        };

        target.dispatch(&ClickEvent::left(0, 0));
        assert_eq!(count.get(), 0);

        target.dispatch(&ClickEvent::left(0, 0));
        assert_eq!(count.get(), 1);
    }
}
