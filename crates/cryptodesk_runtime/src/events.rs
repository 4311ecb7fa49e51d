//! Change notifications for push-based hosts.

use std::fmt;

use cryptodesk_app_contract::{AppKind, AppLifecycleEvent};
use serde::{Deserialize, Serialize};

use crate::model::WindowId;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Notification sent to window-manager subscribers after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesktopEvent {
    /// Lifecycle transition of one window, forwarded to its hosted app.
    Lifecycle {
        window_id: WindowId,
        app_kind: AppKind,
        event: AppLifecycleEvent,
    },
    /// Window received a fresh z-index and is now on top.
    Raised { window_id: WindowId, z_index: u64 },
    /// Position or size changed without a lifecycle transition.
    GeometryChanged { window_id: WindowId },
    /// The active window moved; either side may be `None`.
    ActiveWindowChanged {
        previous: Option<WindowId>,
        current: Option<WindowId>,
    },
}

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered listener list. Listeners run in subscription order.
pub struct Subscribers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            listeners: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl<E> Subscribers<E> {
    /// Appends `listener` and returns its handle. Ids are never reused.
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `event` to every listener.
    pub fn notify(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Delivers `events` in order; each event reaches all listeners before the next.
    pub fn notify_all(&mut self, events: &[E]) {
        for event in events {
            self.notify(event);
        }
    }
}
