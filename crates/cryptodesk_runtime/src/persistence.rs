//! Preference persistence for system settings and feature flags.
//!
//! Window layout is deliberately absent here: the desktop starts empty every session.

use std::collections::BTreeMap;

use cryptodesk_host::{load_pref_with, save_pref_with, PrefsStore};
use tracing::warn;

use crate::feature_flags::FeatureFlags;
use crate::reducer::RuntimeEffect;
use crate::runtime_context::DesktopRuntime;
use crate::settings::SystemSettings;

pub const SYSTEM_SETTINGS_KEY: &str = "cryptodesk.system_settings.v1";
pub const FEATURE_FLAGS_KEY: &str = "cryptodesk.feature_flags.v1";

/// Loads persisted settings, falling back to defaults when absent or unreadable.
pub async fn load_system_settings(store: &dyn PrefsStore) -> SystemSettings {
    match load_pref_with::<_, SystemSettings>(store, SYSTEM_SETTINGS_KEY).await {
        Ok(settings) => settings.unwrap_or_default(),
        Err(err) => {
            warn!("system settings load failed: {err}");
            SystemSettings::default()
        }
    }
}

/// Loads feature flags from `env` plus the persisted overrides.
pub async fn load_feature_flags(
    store: &dyn PrefsStore,
    env: impl Fn(&str) -> Option<String>,
) -> FeatureFlags {
    let persisted =
        match load_pref_with::<_, BTreeMap<String, bool>>(store, FEATURE_FLAGS_KEY).await {
            Ok(persisted) => persisted,
            Err(err) => {
                warn!("feature flag overrides load failed: {err}");
                None
            }
        };
    FeatureFlags::initialize(env, persisted.as_ref())
}

pub async fn persist_system_settings(
    store: &dyn PrefsStore,
    settings: &SystemSettings,
) -> Result<(), String> {
    save_pref_with(store, SYSTEM_SETTINGS_KEY, settings).await
}

pub async fn persist_feature_flags(
    store: &dyn PrefsStore,
    flags: &FeatureFlags,
) -> Result<(), String> {
    save_pref_with(store, FEATURE_FLAGS_KEY, &flags.persisted_form()).await
}

/// Executes the persistence effects in `effects`, in order. Other effects are left to the host.
/// Failures are logged, not returned.
pub async fn run_persistence_effects(
    store: &dyn PrefsStore,
    runtime: &DesktopRuntime,
    effects: &[RuntimeEffect],
) {
    for effect in effects {
        let result = match effect {
            RuntimeEffect::PersistSettings => {
                persist_system_settings(store, &runtime.settings).await
            }
            RuntimeEffect::PersistFeatureFlags => persist_feature_flags(store, &runtime.flags).await,
            RuntimeEffect::FocusWindowInput(_) | RuntimeEffect::NotifyLaunchDenied { .. } => {
                continue
            }
        };
        if let Err(err) = result {
            warn!(?effect, "persistence effect failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use cryptodesk_host::MemoryPrefsStore;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::DesktopConfig;
    use crate::feature_flags::FeatureFlag;
    use crate::reducer::DesktopAction;
    use crate::settings::Theme;

    #[test]
    fn missing_or_corrupt_settings_fall_back_to_defaults() {
        let store = MemoryPrefsStore::with_entries([(SYSTEM_SETTINGS_KEY, "[1,2")]);
        assert_eq!(
            block_on(load_system_settings(&store)),
            SystemSettings::default()
        );
        assert_eq!(
            block_on(load_system_settings(&MemoryPrefsStore::default())),
            SystemSettings::default()
        );
    }

    #[test]
    fn corrupt_flag_overrides_keep_env_values() {
        let store = MemoryPrefsStore::with_entries([(FEATURE_FLAGS_KEY, "nope")]);
        let flags = block_on(load_feature_flags(&store, |key| {
            (key == "ENABLE_SENTINEL").then(|| "true".to_string())
        }));
        assert!(flags.enabled(FeatureFlag::Sentinel));
    }

    #[test]
    fn dispatched_effects_are_written_back() {
        let store = MemoryPrefsStore::default();
        let mut runtime = DesktopRuntime::new(DesktopConfig::default());

        let mut effects = runtime.dispatch(DesktopAction::SetTheme {
            theme: Theme::Light,
        });
        effects.extend(runtime.dispatch(DesktopAction::EnableFeature {
            flag: FeatureFlag::AlphaCalendar,
        }));
        block_on(run_persistence_effects(&store, &runtime, &effects));

        assert_eq!(
            store.keys(),
            vec![FEATURE_FLAGS_KEY.to_string(), SYSTEM_SETTINGS_KEY.to_string()]
        );
        let reloaded = block_on(DesktopRuntime::boot(
            DesktopConfig::default(),
            &store,
            |_| None,
        ));
        assert_eq!(reloaded.settings.theme, Theme::Light);
        assert!(reloaded.flags.enabled(FeatureFlag::AlphaCalendar));
    }
}
