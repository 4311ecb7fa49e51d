//! Value types shared by the window manager, launcher and reducer.

use std::fmt;

use cryptodesk_app_contract::{AppKind, WindowRuntimeId};
use serde::{Deserialize, Serialize};

/// Runtime id of an open window, displayed as `w<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub WindowRuntimeId);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Top-left corner of a window in desktop pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point with both coordinates pushed to at least zero.
    pub fn clamped_non_negative(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
        }
    }
}

/// Window dimensions in desktop pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the size grown to at least `min_width` x `min_height`.
    pub fn clamped_min(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
        }
    }
}

/// Desktop viewport area used as the maximize target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
}

/// One open application window as tracked by the window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub app_kind: AppKind,
    pub position: Point,
    pub size: Size,
    pub z_index: u64,
    pub is_minimized: bool,
    pub is_maximized: bool,
    /// Geometry to return to when a maximized window is toggled back.
    pub restore_geometry: Option<(Point, Size)>,
    pub requires_wallet: bool,
}

/// Descriptor handed to [`crate::WindowManager::open`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_kind: AppKind,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub requires_wallet: bool,
}

impl OpenWindowRequest {
    /// Request at the origin with zero size; chain [`Self::at`] and [`Self::sized`].
    pub fn new(app_kind: AppKind, title: impl Into<String>) -> Self {
        Self {
            app_kind,
            title: title.into(),
            position: Point::default(),
            size: Size::default(),
            requires_wallet: false,
        }
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn sized(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn requiring_wallet(mut self, requires_wallet: bool) -> Self {
        self.requires_wallet = requires_wallet;
        self
    }
}

/// Connected wallet as seen by the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalletSession {
    pub public_key: Option<String>,
}

impl WalletSession {
    pub fn connected(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.public_key.is_some()
    }
}
