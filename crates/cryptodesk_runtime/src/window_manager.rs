//! Window-manager state machine: open windows, stacking order, and the active window.
//!
//! Every operation that takes a [`WindowId`] is a silent no-op when the id is unknown. UI events
//! can reference a window that an earlier event in the same tick already closed, so a missing id
//! is expected and never an error. Those operations return `false` when nothing was found.

use cryptodesk_app_contract::AppLifecycleEvent;
use tracing::debug;

use crate::events::{DesktopEvent, SubscriptionId, Subscribers};
use crate::model::{OpenWindowRequest, Point, Rect, Size, WindowId, WindowRecord};

/// Default first z-index handed out by [`WindowManager::default`].
pub const DEFAULT_Z_INDEX_BASE: u64 = 1000;

/// Owns every open window record, the z-index and id counters, and the active window.
///
/// Both counters only ever move forward, so ids are never reused and every open or focus lands
/// strictly above all other windows.
#[derive(Debug)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    next_window_id: u64,
    next_z_index: u64,
    active_window_id: Option<WindowId>,
    subscribers: Subscribers<DesktopEvent>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(DEFAULT_Z_INDEX_BASE)
    }
}

impl WindowManager {
    /// Creates an empty manager whose first window receives `z_index_base`.
    pub fn new(z_index_base: u64) -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            next_z_index: z_index_base,
            active_window_id: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Open windows in insertion order. Paint order comes from `z_index`, see [`Self::paint_order`].
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Looks up an open window by id.
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    /// The window that receives keyboard input, if any.
    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active_window_id
    }

    /// Record of [`Self::active_window_id`].
    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id.and_then(|id| self.window(id))
    }

    /// Number of open windows, minimized ones included.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The z-index the next open or focus will receive.
    pub fn next_z_index(&self) -> u64 {
        self.next_z_index
    }

    /// Visible windows from bottom to top.
    pub fn paint_order(&self) -> Vec<&WindowRecord> {
        let mut visible = self
            .windows
            .iter()
            .filter(|w| !w.is_minimized)
            .collect::<Vec<_>>();
        // Stable sort keeps insertion order for equal z values.
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// The highest non-minimized window.
    pub fn topmost_visible(&self) -> Option<&WindowRecord> {
        self.paint_order().last().copied()
    }

    /// Registers `listener` for every [`DesktopEvent`] emitted after a mutation is applied.
    pub fn subscribe(&mut self, listener: impl FnMut(&DesktopEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Removes a listener. Returns `false` when `id` was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Opens a new window on top of the stack and makes it active. Never fails.
    pub fn open(&mut self, req: OpenWindowRequest) -> WindowId {
        let window_id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        let z_index = self.allocate_z_index();

        let app_kind = req.app_kind.clone();
        self.windows.push(WindowRecord {
            id: window_id,
            title: req.title,
            app_kind: req.app_kind,
            position: req.position,
            size: req.size,
            z_index,
            is_minimized: false,
            is_maximized: false,
            restore_geometry: None,
            requires_wallet: req.requires_wallet,
        });
        debug!(%window_id, app_kind = %app_kind, z_index, "window opened");

        let mut events = vec![DesktopEvent::Lifecycle {
            window_id,
            app_kind,
            event: AppLifecycleEvent::Opened,
        }];
        self.change_active(Some(window_id), &mut events);
        self.subscribers.notify_all(&events);
        window_id
    }

    /// Removes the window. When it was active, activity falls back to the highest remaining
    /// z-index, minimized or not.
    pub fn close(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let closed = self.windows.remove(index);
        debug!(%window_id, "window closed");

        let mut events = vec![DesktopEvent::Lifecycle {
            window_id,
            app_kind: closed.app_kind,
            event: AppLifecycleEvent::Closed,
        }];
        if self.active_window_id == Some(window_id) {
            let fallback = self.windows.iter().max_by_key(|w| w.z_index).map(|w| w.id);
            self.change_active(fallback, &mut events);
        }
        self.subscribers.notify_all(&events);
        true
    }

    /// Toggles minimized state. Geometry and z-index are left alone.
    ///
    /// Minimizing the active window hands activity to the highest visible window (or none).
    /// Restoring never activates the window; call [`Self::focus`] for that.
    pub fn minimize(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let window = &mut self.windows[index];
        window.is_minimized = !window.is_minimized;
        let now_minimized = window.is_minimized;
        let app_kind = window.app_kind.clone();
        debug!(%window_id, minimized = now_minimized, "window minimize toggled");

        let mut events = vec![DesktopEvent::Lifecycle {
            window_id,
            app_kind,
            event: if now_minimized {
                AppLifecycleEvent::Minimized
            } else {
                AppLifecycleEvent::Restored
            },
        }];
        if now_minimized && self.active_window_id == Some(window_id) {
            let fallback = self.topmost_visible().map(|w| w.id);
            self.change_active(fallback, &mut events);
        }
        self.subscribers.notify_all(&events);
        true
    }

    /// Raises the window above every other window and makes it active. Does not restore a
    /// minimized window.
    pub fn focus(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let z_index = self.allocate_z_index();
        self.windows[index].z_index = z_index;
        debug!(%window_id, z_index, "window focused");

        let mut events = vec![DesktopEvent::Raised { window_id, z_index }];
        self.change_active(Some(window_id), &mut events);
        self.subscribers.notify_all(&events);
        true
    }

    /// Stores `position` as given. Bounds clamping belongs to the UI layer.
    pub fn move_to(&mut self, window_id: WindowId, position: Point) -> bool {
        let Some(window) = self.windows.iter_mut().find(|w| w.id == window_id) else {
            return false;
        };
        if window.position != position {
            window.position = position;
            self.subscribers
                .notify(&DesktopEvent::GeometryChanged { window_id });
        }
        true
    }

    /// Stores `size` as given. Minimum-size clamping belongs to the UI layer.
    pub fn resize(&mut self, window_id: WindowId, size: Size) -> bool {
        let Some(window) = self.windows.iter_mut().find(|w| w.id == window_id) else {
            return false;
        };
        if window.size != size {
            window.size = size;
            self.subscribers
                .notify(&DesktopEvent::GeometryChanged { window_id });
        }
        true
    }

    /// Fills `viewport` with the window, or puts it back where it was before maximizing.
    /// Stacking and activity are not touched.
    pub fn toggle_maximize(&mut self, window_id: WindowId, viewport: Rect) -> bool {
        let Some(window) = self.windows.iter_mut().find(|w| w.id == window_id) else {
            return false;
        };

        let event = if window.is_maximized {
            if let Some((position, size)) = window.restore_geometry.take() {
                window.position = position;
                window.size = size;
            }
            window.is_maximized = false;
            AppLifecycleEvent::Unmaximized
        } else {
            window.restore_geometry = Some((window.position, window.size));
            window.position = viewport.origin;
            window.size = viewport.size;
            window.is_maximized = true;
            AppLifecycleEvent::Maximized
        };
        debug!(%window_id, event = event.token(), "window maximize toggled");

        let lifecycle = DesktopEvent::Lifecycle {
            window_id,
            app_kind: window.app_kind.clone(),
            event,
        };
        self.subscribers.notify(&lifecycle);
        true
    }

    fn index_of(&self, window_id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == window_id)
    }

    fn allocate_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index = self.next_z_index.saturating_add(1);
        z_index
    }

    fn change_active(&mut self, next: Option<WindowId>, events: &mut Vec<DesktopEvent>) {
        let previous = self.active_window_id;
        if previous == next {
            return;
        }
        self.active_window_id = next;

        if let Some(prev) = previous.and_then(|id| self.window(id)) {
            events.push(DesktopEvent::Lifecycle {
                window_id: prev.id,
                app_kind: prev.app_kind.clone(),
                event: AppLifecycleEvent::Blurred,
            });
        }
        if let Some(current) = next.and_then(|id| self.window(id)) {
            events.push(DesktopEvent::Lifecycle {
                window_id: current.id,
                app_kind: current.app_kind.clone(),
                event: AppLifecycleEvent::Focused,
            });
        }
        events.push(DesktopEvent::ActiveWindowChanged {
            previous,
            current: next,
        });
    }
}
