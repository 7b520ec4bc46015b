//! Caller-owned broadcast channel for warning records.
//!
//! A [`LogChannel`] replaces an ambient process-wide emitter: the command
//! that owns the channel hands it to `load` as a sink, and listeners are
//! attached through [`Subscription`] guards that detach on drop.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Warning, WarningSink};

type Listener = Rc<RefCell<dyn FnMut(&Warning)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Broadcasts each record to every subscribed listener, in subscription
/// order.
///
/// Listeners may subscribe or unsubscribe from inside a callback. Each
/// record goes to the listeners attached when publishing started, minus any
/// detached along the way; a listener is never re-entered by records it
/// publishes itself.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use layered_config::{ConfigData, Location, LogChannel};
/// use serde_json::{Map, json};
///
/// let channel = LogChannel::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let subscription = channel.subscribe(move |warning| {
///     sink.borrow_mut().push(warning.message());
/// });
///
/// let mut raw = Map::new();
/// raw.insert("colour".into(), json!("blue"));
/// let mut cli = ConfigData::new(Location::Cli);
/// cli.load(raw, &mut &channel);
/// drop(subscription);
///
/// assert_eq!(seen.borrow().len(), 1);
/// assert_eq!(channel.listener_count(), 0);
/// ```
#[derive(Default)]
pub struct LogChannel {
    listeners: Rc<RefCell<Listeners>>,
}

impl LogChannel {
    /// Create a channel without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` until the returned guard is dropped.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Warning) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        listeners.entries.push((id, listener));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Deliver `warning` to every listener.
    pub fn publish(&self, warning: &Warning) {
        let snapshot: Vec<(u64, Listener)> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();
        for (id, listener) in snapshot {
            if !self.is_attached(id) {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(warning);
            }
        }
    }

    fn is_attached(&self, id: u64) -> bool {
        self.listeners
            .borrow()
            .entries
            .iter()
            .any(|(attached, _)| *attached == id)
    }
}

impl fmt::Debug for LogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogChannel")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl WarningSink for LogChannel {
    fn emit(&mut self, warning: Warning) {
        self.publish(&warning);
    }
}

impl WarningSink for &LogChannel {
    fn emit(&mut self, warning: Warning) {
        self.publish(&warning);
    }
}

/// Guard keeping a listener attached to a [`LogChannel`].
///
/// Dropping the guard detaches the listener, so a listener registered for
/// one command never leaks into the next.
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Detach the listener now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            // Released after the borrow ends; the closure may own subscriptions.
            let removed = {
                let mut guard = listeners.borrow_mut();
                guard
                    .entries
                    .iter()
                    .position(|(id, _)| *id == self.id)
                    .map(|index| guard.entries.remove(index))
            };
            drop(removed);
        }
    }
}
