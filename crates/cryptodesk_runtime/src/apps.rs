//! Application catalog and the launcher that gates opening windows.
//!
//! Wallet and admin checks live here, in front of the window manager. The manager opens
//! whatever it is asked to open.

use std::sync::OnceLock;

use cryptodesk_app_contract::AppKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::DesktopConfig;
use crate::model::{OpenWindowRequest, Size, WalletSession, WindowId};
use crate::window_manager::WindowManager;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub app_kind: AppKind,
    pub title: String,
    pub icon_id: String,
    pub requires_wallet: bool,
    pub admin_only: bool,
    pub show_in_launcher: bool,
    /// Overrides the configured default window size.
    pub window_size: Option<Size>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("application `{0}` is not available")]
    UnknownApp(String),
    #[error("wallet connection required to open `{0}`")]
    WalletRequired(AppKind),
    #[error("wallet is not allowed to open `{0}`")]
    AccessDenied(AppKind),
}

impl LaunchError {
    /// Title shown to the user when a launch is refused.
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnknownApp(_) => "Application Error",
            Self::WalletRequired(_) => "Wallet Required",
            Self::AccessDenied(_) => "Access Denied",
        }
    }

    /// Body shown to the user when a launch is refused.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnknownApp(_) => "This application is not available.",
            Self::WalletRequired(_) => "Please connect your wallet to use this application.",
            Self::AccessDenied(_) => "You do not have permission to access the admin panel.",
        }
    }
}

pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        serde_json::from_str(APP_CATALOG_JSON).unwrap_or_else(|err| {
            error!("embedded app catalog is unreadable: {err}");
            Vec::new()
        })
    })
}

pub fn app_descriptor(app_kind: &str) -> Option<&'static AppDescriptor> {
    app_registry()
        .iter()
        .find(|entry| entry.app_kind.as_str() == app_kind)
}

pub fn launcher_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_in_launcher)
        .collect()
}

/// Applies the launch policy for `app_kind` and builds the window request.
///
/// # Errors
///
/// Returns [`LaunchError`] when the app is unknown, is admin-only and the wallet is not an
/// admin wallet, or requires a wallet and none is connected.
pub fn build_open_request(
    config: &DesktopConfig,
    wallet: &WalletSession,
    app_kind: &str,
    open_count: usize,
) -> Result<OpenWindowRequest, LaunchError> {
    let descriptor =
        app_descriptor(app_kind).ok_or_else(|| LaunchError::UnknownApp(app_kind.to_string()))?;

    if descriptor.admin_only {
        let is_admin = wallet
            .public_key
            .as_deref()
            .is_some_and(|key| config.launcher.is_admin_wallet(key));
        if !is_admin {
            return Err(LaunchError::AccessDenied(descriptor.app_kind.clone()));
        }
    }
    if descriptor.requires_wallet && !wallet.is_connected() {
        return Err(LaunchError::WalletRequired(descriptor.app_kind.clone()));
    }

    let size = descriptor
        .window_size
        .unwrap_or_else(|| config.windows.default_size());
    Ok(
        OpenWindowRequest::new(descriptor.app_kind.clone(), descriptor.title.clone())
            .at(config.windows.cascade_position(open_count))
            .sized(size)
            .requiring_wallet(descriptor.requires_wallet),
    )
}

/// Opens `app_kind` in `manager` if the launch policy allows it.
///
/// # Errors
///
/// See [`build_open_request`].
pub fn launch(
    manager: &mut WindowManager,
    config: &DesktopConfig,
    wallet: &WalletSession,
    app_kind: &str,
) -> Result<WindowId, LaunchError> {
    match build_open_request(config, wallet, app_kind, manager.len()) {
        Ok(req) => {
            let window_id = manager.open(req);
            info!(%window_id, app_kind, "application launched");
            Ok(window_id)
        }
        Err(err) => {
            warn!(app_kind, "launch refused: {err}");
            Err(err)
        }
    }
}
