//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! Hosted apps are opaque to the window manager: it only knows an app by its [`AppKind`] and
//! reports window transitions to it as [`AppLifecycleEvent`] values.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable numeric identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Maximum accepted length for an [`AppKind`] identifier.
pub const APP_KIND_MAX_LEN: usize = 64;

/// Stable identifier for a hosted application (for example `solana-raffle`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppKind(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Rejection reasons for malformed [`AppKind`] identifiers.
pub enum AppKindError {
    /// The identifier was empty or longer than [`APP_KIND_MAX_LEN`].
    #[error("app kind must be 1 to 64 characters, got {0}")]
    Length(usize),
    /// The identifier did not follow the lowercase kebab-case policy.
    #[error("invalid app kind `{0}`; expected lowercase kebab-case")]
    Format(String),
}

impl AppKind {
    /// Returns an app kind when `raw` is lowercase kebab-case (`token-tracker`).
    ///
    /// # Errors
    ///
    /// Returns [`AppKindError`] when `raw` is empty, too long, or malformed.
    pub fn new(raw: impl Into<String>) -> Result<Self, AppKindError> {
        let raw = raw.into();
        if raw.is_empty() || raw.len() > APP_KIND_MAX_LEN {
            return Err(AppKindError::Length(raw.len()));
        }
        if is_valid_app_kind(&raw) {
            Ok(Self(raw))
        } else {
            Err(AppKindError::Format(raw))
        }
    }

    /// Creates a kind without validation for trusted catalog constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AppKind {
    type Error = AppKindError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<AppKind> for String {
    fn from(kind: AppKind) -> Self {
        kind.0
    }
}

fn is_valid_app_kind(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') || raw.contains("--") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Lifecycle events emitted by the desktop window manager for a hosted app window.
pub enum AppLifecycleEvent {
    /// A window hosting the app was opened.
    Opened,
    /// Window became the active window.
    Focused,
    /// Window stopped being the active window.
    Blurred,
    /// Window was hidden from the desktop surface.
    Minimized,
    /// Window was shown again after being minimized.
    Restored,
    /// Window took the full viewport.
    Maximized,
    /// Window returned to its geometry from before maximizing.
    Unmaximized,
    /// Window was closed and its record removed.
    Closed,
}

impl AppLifecycleEvent {
    /// Returns a stable string token for logging/debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Focused => "focused",
            Self::Blurred => "blurred",
            Self::Minimized => "minimized",
            Self::Restored => "restored",
            Self::Maximized => "maximized",
            Self::Unmaximized => "unmaximized",
            Self::Closed => "closed",
        }
    }
}
