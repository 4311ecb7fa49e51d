//! Long-lived runtime container owned by the host shell.
//!
//! The host keeps one [`DesktopRuntime`] per desktop, feeds it [`DesktopAction`] values from UI
//! events, and executes the returned [`RuntimeEffect`] values. Independent desktops (for example
//! two browser tabs) each own their own runtime and share nothing.

use cryptodesk_host::PrefsStore;
use tracing::debug;

use crate::config::DesktopConfig;
use crate::feature_flags::FeatureFlags;
use crate::model::WalletSession;
use crate::persistence::{load_feature_flags, load_system_settings};
use crate::reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
use crate::settings::SystemSettings;
use crate::window_manager::WindowManager;

#[derive(Debug)]
pub struct DesktopRuntime {
    pub config: DesktopConfig,
    pub windows: WindowManager,
    pub settings: SystemSettings,
    pub flags: FeatureFlags,
    pub wallet: WalletSession,
}

impl DesktopRuntime {
    /// Fresh runtime with default settings, all flags off, and no wallet.
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            windows: WindowManager::new(config.windows.z_index_base),
            settings: SystemSettings::default(),
            flags: FeatureFlags::default(),
            wallet: WalletSession::default(),
            config,
        }
    }

    /// Builds a runtime with settings and feature flags hydrated from `store`.
    ///
    /// Windows are never restored; every session starts with an empty desktop.
    pub async fn boot(
        config: DesktopConfig,
        store: &dyn PrefsStore,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut runtime = Self::new(config);
        runtime.settings = load_system_settings(store).await;
        runtime.flags = load_feature_flags(store, env).await;
        runtime
    }

    /// Runs `action` through the reducer. A refused launch becomes a
    /// [`RuntimeEffect::NotifyLaunchDenied`] effect instead of an error.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        debug!(?action, "dispatch");
        match reduce_desktop(self, action) {
            Ok(effects) => effects,
            Err(ReducerError::Launch(err)) => {
                vec![RuntimeEffect::NotifyLaunchDenied {
                    title: err.title(),
                    description: err.description(),
                }]
            }
        }
    }
}
